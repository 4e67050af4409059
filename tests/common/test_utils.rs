use std::path::Path;

use desk_scene::{config::SceneConfig, render::headless::HeadlessRenderer, scene::SceneManager};
use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// The four scene textures, each a solid colour.
pub const TEXTURES: [(&str, [u8; 3]); 4] = [
    ("brick.jpg", [150, 60, 40]),
    ("desk.jpg", [120, 80, 40]),
    ("wood.jpg", [160, 110, 60]),
    ("plastic.jpg", [20, 20, 24]),
];

/// Asset directory populated with valid RGB images for every scene texture.
pub fn asset_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create a temporary asset directory");
    for (name, colour) in TEXTURES {
        write_rgb(dir.path(), name, colour);
    }
    dir
}

pub fn write_rgb(dir: &Path, name: &str, colour: [u8; 3]) {
    RgbImage::from_pixel(8, 4, Rgb(colour))
        .save(dir.join(name))
        .expect("Failed to write a test image");
}

pub fn scene_in(dir: &Path) -> SceneManager<HeadlessRenderer> {
    let config = SceneConfig::default().with_asset_root(dir);
    SceneManager::new(HeadlessRenderer::new(), &config)
}

/// A scene that has been prepared and rendered once.
pub fn rendered_scene(dir: &Path) -> SceneManager<HeadlessRenderer> {
    let mut scene = scene_in(dir);
    scene.prepare_scene();
    scene.render_scene();
    scene
}
