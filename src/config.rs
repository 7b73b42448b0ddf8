//! Runtime settings and the fixed constants of the game world.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Cells per map row.
pub const MAP_WIDTH: usize = 21;
/// Rows per map.
pub const MAP_HEIGHT: usize = 12;
/// Edge length of one grid cell in world pixels.
pub const TILE_SIZE: f32 = 60.0;
/// Number of level slots in a level file.
pub const LEVEL_COUNT: usize = 6;

pub const SCREEN_WIDTH: usize = 1260;
pub const SCREEN_HEIGHT: usize = 720;
pub const FOV_DEGREES: f32 = 60.0;
pub const MINIMAP_SCALE: f32 = 0.2;

/// Player speeds, scaled by the measured frame delta.
pub const PLAYER_SPEED: f32 = 200.0; // px / second
pub const TURN_RATE: f32 = 90.0; // degrees / second

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about)]
pub struct Settings {
    /// Level file holding the six maps
    #[arg(long, value_name = "FILE", default_value = "worlds.txt")]
    pub levels: PathBuf,

    /// Directory with wall/floor/ceiling/enemy images
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets: PathBuf,

    /// Level slot to start in (0-based)
    #[arg(long, default_value_t = 0)]
    pub level: usize,

    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: usize,

    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: usize,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = FOV_DEGREES)]
    pub fov: f32,

    #[arg(long, default_value_t = MINIMAP_SCALE)]
    pub minimap_scale: f32,

    /// Seed for enemy placement
    #[arg(long, default_value_t = 0x5EED)]
    pub seed: u64,

    /// Solid-colour walls, sky and ground instead of textures
    #[arg(long)]
    pub flat: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: PathBuf::from("worlds.txt"),
            assets: PathBuf::from("assets"),
            level: 0,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fov: FOV_DEGREES,
            minimap_scale: MINIMAP_SCALE,
            seed: 0x5EED,
            flat: false,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("screen size {0}x{1} is empty")]
    EmptyScreen(usize, usize),

    #[error("field of view {0}° must lie strictly between 0 and 180")]
    BadFov(f32),

    #[error("minimap scale {0} must lie in (0, 1]")]
    BadMinimapScale(f32),

    #[error("start level {0} out of range ({LEVEL_COUNT} levels)")]
    BadLevel(usize),
}

impl Settings {
    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::EmptyScreen(self.width, self.height));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SettingsError::BadFov(self.fov));
        }
        if !(self.minimap_scale > 0.0 && self.minimap_scale <= 1.0) {
            return Err(SettingsError::BadMinimapScale(self.minimap_scale));
        }
        if self.level >= LEVEL_COUNT {
            return Err(SettingsError::BadLevel(self.level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn cli_defaults_match_default_impl() {
        let parsed = Settings::parse_from(["mazemania"]);
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut s = Settings::default();
        s.fov = 180.0;
        assert_eq!(s.validate(), Err(SettingsError::BadFov(180.0)));

        let mut s = Settings::default();
        s.width = 0;
        assert!(matches!(s.validate(), Err(SettingsError::EmptyScreen(0, _))));

        let mut s = Settings::default();
        s.minimap_scale = 1.5;
        assert!(matches!(s.validate(), Err(SettingsError::BadMinimapScale(_))));

        let mut s = Settings::default();
        s.level = LEVEL_COUNT;
        assert_eq!(s.validate(), Err(SettingsError::BadLevel(LEVEL_COUNT)));
    }
}
