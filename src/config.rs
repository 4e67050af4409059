use std::path::PathBuf;

/// Environment variable overriding [`SceneConfig::asset_root`].
pub const ASSETS_ENV: &str = "DESK_SCENE_ASSETS";

/// Start-up settings for the scene and its window.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Directory the scene textures (`brick.jpg`, `desk.jpg`, ...) are read from.
    pub asset_root: PathBuf,
    pub window_title: String,
    pub width: u32,
    pub height: u32,
    /// RGBA clear colour of the frame.
    pub clear_colour: [f64; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("./assets"),
            window_title: "Desk Scene".to_string(),
            width: 1000,
            height: 800,
            clear_colour: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SceneConfig {
    /// Defaults, with the asset root taken from `DESK_SCENE_ASSETS` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(root) = std::env::var_os(ASSETS_ENV).filter(|root| !root.is_empty()) {
            config.asset_root = PathBuf::from(root);
        }
        config
    }

    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    pub fn asset(&self, file_name: &str) -> PathBuf {
        self.asset_root.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_resolve_under_the_root() {
        let config = SceneConfig::default().with_asset_root("/tmp/desk");
        assert_eq!(config.asset("wood.jpg"), PathBuf::from("/tmp/desk/wood.jpg"));
    }
}
