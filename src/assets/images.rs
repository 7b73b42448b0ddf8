//! Raster images (PNG / BMP) → renderer-owned [`Texture`]s.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::world::texture::Texture;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unable to load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {0} has zero width or height")]
    Empty(PathBuf),
}

/// Pack one RGBA texel as 0xAARRGGBB.
#[inline]
pub fn pack_argb([r, g, b, a]: [u8; 4]) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Copy a decoded RGBA buffer into a texture. The decoder's buffer is
/// dropped by the caller; nothing here keeps a reference into it.
pub fn texture_from_rgba(name: &str, img: &RgbaImage) -> Texture {
    let (w, h) = img.dimensions();
    Texture {
        name: name.to_string(),
        w: w as usize,
        h: h as usize,
        pixels: img.pixels().map(|p| pack_argb(p.0)).collect(),
    }
}

/// Decode an image file from disk.
pub fn load_texture<P: AsRef<Path>>(path: P, name: &str) -> Result<Texture, ImageError> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty(path.to_path_buf()));
    }
    Ok(texture_from_rgba(name, &img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn packs_as_argb() {
        assert_eq!(pack_argb([0x11, 0x22, 0x33, 0x44]), 0x44_112233);
    }

    #[test]
    fn png_round_trip_copies_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brick.png");

        let mut img = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        img.put_pixel(3, 1, Rgba([0, 0, 255, 0]));
        img.save(&path).unwrap();

        let tex = load_texture(&path, "brick").unwrap();
        assert_eq!((tex.w, tex.h), (4, 2));
        assert_eq!(tex.pixels[0], 0xFF_FF0000);
        assert_eq!(tex.sample(3, 1), 0x00_0000FF);
        assert_eq!(tex.name, "brick");
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bogus.png");
        std::fs::write(&path, b"NOTAPNG").unwrap();
        let err = load_texture(&path, "bogus").unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));
        assert!(err.to_string().contains("bogus.png"));
    }
}
