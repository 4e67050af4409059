//! Tag -> texture slot registry.
//!
//! Entries keep their registration order; that order is the texture unit each
//! one is bound to, and the slot index `objectTexture` is set to.

use std::path::Path;

use crate::{error::TextureError, render::TextureDevice, resources::decode_image};

/// Number of texture units available to the scene.
pub const CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: u32,
}

#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path`, upload it through `device` and register it under `tag`.
    ///
    /// Returns the slot of the new entry. On any error the registry is left
    /// as it was.
    pub fn load_texture<D: TextureDevice + ?Sized>(
        &mut self,
        device: &mut D,
        path: &Path,
        tag: &str,
    ) -> Result<usize, TextureError> {
        if self.entries.len() >= CAPACITY {
            return Err(TextureError::RegistryFull(CAPACITY));
        }
        if self.find_slot(tag).is_some() {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }

        let image = decode_image(path)?;
        let handle = device
            .create_texture(&image, tag)
            .map_err(|e| TextureError::Device(format!("{e:#}")))?;

        log::info!(
            "Loaded texture {tag} from {} ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(self.entries.len() - 1)
    }

    /// Bind every entry to the texture unit matching its slot.
    pub fn bind_all<D: TextureDevice + ?Sized>(&self, device: &mut D) {
        for (unit, entry) in self.entries.iter().enumerate() {
            device.bind_texture(unit, entry.handle);
        }
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn find_handle(&self, tag: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.handle)
    }

    /// Destroy every device texture and empty the registry.
    pub fn release_all<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        for entry in self.entries.drain(..) {
            log::debug!("Releasing texture {}", entry.tag);
            device.destroy_texture(entry.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use image::{GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

    use super::*;
    use crate::render::headless::HeadlessRenderer;

    fn rgb_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(4, 2, image::Rgb([200, 100, 50]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn slots_follow_registration_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();

        let a = registry
            .load_texture(&mut device, &rgb_file(&dir, "a.png"), "a")
            .unwrap();
        let b = registry
            .load_texture(&mut device, &rgb_file(&dir, "b.png"), "b")
            .unwrap();

        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.find_slot("b"), Some(1));
        assert_eq!(registry.find_handle("a"), Some(1));
        assert_eq!(registry.find_slot("missing"), None);
        assert_eq!(device.textures[&1].width, 4);
    }

    #[test]
    fn bind_all_uses_the_slot_as_unit() {
        let dir = tempfile::tempdir().unwrap();
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();
        for tag in ["brick", "desk", "wood"] {
            registry
                .load_texture(&mut device, &rgb_file(&dir, &format!("{tag}.png")), tag)
                .unwrap();
        }

        registry.bind_all(&mut device);

        for (unit, entry) in registry.iter().enumerate() {
            assert_eq!(device.units[&unit], entry.handle);
        }
    }

    #[test]
    fn rgba_images_keep_four_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glass.png");
        RgbaImage::from_pixel(3, 2, image::Rgba([40, 80, 120, 100]))
            .save(&path)
            .unwrap();
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();

        let slot = registry.load_texture(&mut device, &path, "glass").unwrap();

        assert_eq!(registry.find_slot("glass"), Some(slot));
        let handle = registry.find_handle("glass").unwrap();
        let recorded = &device.textures[&handle];
        assert_eq!(recorded.channels, 4);
        assert_eq!((recorded.width, recorded.height), (3, 2));
    }

    #[test]
    fn grey_alpha_images_are_rejected_without_registering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smoke.png");
        GrayAlphaImage::from_pixel(2, 2, image::LumaA([10, 200]))
            .save(&path)
            .unwrap();
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();
        registry
            .load_texture(&mut device, &rgb_file(&dir, "wood.png"), "wood")
            .unwrap();

        let err = registry.load_texture(&mut device, &path, "smoke").unwrap_err();

        assert!(matches!(err, TextureError::UnsupportedChannels(2)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_slot("smoke"), None);
        assert_eq!(device.textures.len(), 1);
    }

    #[test]
    fn grayscale_images_are_rejected_without_registering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(2, 2, image::Luma([10])).save(&path).unwrap();
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();

        let err = registry.load_texture(&mut device, &path, "gray").unwrap_err();

        assert!(matches!(err, TextureError::UnsupportedChannels(1)));
        assert!(registry.is_empty());
        assert!(device.textures.is_empty());
    }

    #[test]
    fn missing_files_are_io_errors() {
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();
        let err = registry
            .load_texture(&mut device, Path::new("/nonexistent/brick.jpg"), "brick")
            .unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_tags_and_full_registry_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_file(&dir, "t.png");
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();

        registry.load_texture(&mut device, &path, "t0").unwrap();
        assert!(matches!(
            registry.load_texture(&mut device, &path, "t0"),
            Err(TextureError::DuplicateTag(tag)) if tag == "t0"
        ));

        for i in 1..CAPACITY {
            registry
                .load_texture(&mut device, &path, &format!("t{i}"))
                .unwrap();
        }
        assert!(matches!(
            registry.load_texture(&mut device, &path, "overflow"),
            Err(TextureError::RegistryFull(CAPACITY))
        ));
        assert_eq!(registry.len(), CAPACITY);
    }

    #[test]
    fn release_all_destroys_every_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = rgb_file(&dir, "t.png");
        let mut device = HeadlessRenderer::new();
        let mut registry = TextureRegistry::new();
        registry.load_texture(&mut device, &path, "a").unwrap();
        registry.load_texture(&mut device, &path, "b").unwrap();
        registry.bind_all(&mut device);

        registry.release_all(&mut device);

        assert!(registry.is_empty());
        assert_eq!(device.destroyed, vec![1, 2]);
        assert!(device.units.is_empty());
        assert_eq!(registry.find_slot("a"), None);
    }
}
