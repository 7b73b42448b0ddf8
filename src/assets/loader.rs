// ──────────────────────────────────────────────────────────────────────────
// assets/loader.rs
//
//  *   level file   (assets::levels)     ──╮
//  *   images       (assets::images)       │   --->  world::World
//  *   TextureBank (mut)                   │          + populated TextureBank
//                                          ╯          + Surfaces
// ──────────────────────────────────────────────────────────────────────────

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    assets::{
        images::{self, ImageError},
        levels::{self, LevelFileError},
    },
    config::{Settings, SettingsError, TILE_SIZE},
    world::{
        level::{LevelError, LevelManager, World},
        texture::{NO_TEXTURE, Surfaces, Texture, TextureBank, TextureError, TextureId},
    },
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    LevelFile(#[from] LevelFileError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// File names looked up inside the asset directory.
pub const BOUNDARY_IMAGE: &str = "boundary.png";
pub const WALL_IMAGE: &str = "wall.png";
pub const EXIT_IMAGE: &str = "exit.png";
pub const FLOOR_IMAGE: &str = "floor.png";
pub const CEILING_IMAGE: &str = "ceiling.png";
pub const ENEMY_IMAGE: &str = "darklord.png";

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Load the level set named by `settings` and build the starting [`World`].
pub fn load_world(settings: &Settings) -> Result<World, LoadError> {
    settings.validate()?;

    let grids = levels::read_levels(&settings.levels)?;
    info!(path = %settings.levels.display(), "loaded {} levels", grids.len());

    let mut manager = LevelManager::new(grids)?;
    manager.switch_to(settings.level)?;

    Ok(World::new(manager, settings.fov, TILE_SIZE / 3.0)?)
}

/// Populate `bank` with every surface texture found in `dir`.
///
/// A missing or corrupt image is reported once and replaced by the bank's
/// checkerboard, so the game still runs without an asset directory.
pub fn load_surfaces(dir: &Path, bank: &mut TextureBank) -> Result<Surfaces, LoadError> {
    Ok(Surfaces {
        boundary: load_or_missing(dir, BOUNDARY_IMAGE, bank, false)?,
        wall: load_or_missing(dir, WALL_IMAGE, bank, false)?,
        exit: load_or_missing(dir, EXIT_IMAGE, bank, false)?,
        floor: load_or_missing(dir, FLOOR_IMAGE, bank, true)?,
        ceiling: load_or_missing(dir, CEILING_IMAGE, bank, true)?,
        enemy: load_or_missing(dir, ENEMY_IMAGE, bank, false)?,
    })
}

/// Floor and ceiling sampling wraps with a bitmask.
pub fn check_plane_texture(tex: &Texture) -> Result<(), TextureError> {
    if tex.is_pow2() {
        Ok(())
    } else {
        Err(TextureError::NotPowerOfTwo {
            name: tex.name.clone(),
            w: tex.w,
            h: tex.h,
        })
    }
}

/*====================================================================*/
/*                       Internals                                    */
/*====================================================================*/

fn load_or_missing(
    dir: &Path,
    file: &str,
    bank: &mut TextureBank,
    plane: bool,
) -> Result<TextureId, LoadError> {
    if let Some(id) = bank.id(file) {
        return Ok(id);
    }

    let tex = match images::load_texture(dir.join(file), file) {
        Ok(tex) => tex,
        Err(err) => {
            warn!("{err}; using checkerboard");
            return Ok(NO_TEXTURE);
        }
    };

    if plane {
        if let Err(err) = check_plane_texture(&tex) {
            warn!("{err}; using checkerboard");
            return Ok(NO_TEXTURE);
        }
    }

    Ok(bank.insert(file, tex)?)
}

/*────────────────────────────── Tests ──────────────────────────────*/
