//! Decoded images and the bank that hands out ids for them.

use std::collections::HashMap;

use super::grid::Cell;

/// Index of a texture inside a [`TextureBank`].
pub type TextureId = u16;

/// The checkerboard slot.
pub const NO_TEXTURE: TextureId = 0;

/// Row-major 0xAARRGGBB pixels, owned.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

/// 8×8 magenta/black checkerboard, shown wherever an image is missing.
impl Default for Texture {
    fn default() -> Self {
        const SIDE: usize = 8;
        let pixels = (0..SIDE * SIDE)
            .map(|i| if (i % SIDE + i / SIDE) % 2 == 0 { 0xFF_FF00FF } else { 0xFF_000000 })
            .collect();
        Texture {
            name: "CHECKER".to_owned(),
            w: SIDE,
            h: SIDE,
            pixels,
        }
    }
}

impl Texture {
    /// Fetch texel `(x mod w, y mod h)`; negative coordinates wrap too.
    #[inline]
    pub fn sample(&self, x: i32, y: i32) -> u32 {
        let u = x.rem_euclid(self.w as i32) as usize;
        let v = y.rem_euclid(self.h as i32) as usize;
        self.pixels[v * self.w + u]
    }

    /// Fetch with bitmask wrapping; only valid for power-of-two sizes.
    #[inline]
    pub fn sample_masked(&self, x: i32, y: i32) -> u32 {
        debug_assert!(self.is_pow2());
        let u = (x & (self.w as i32 - 1)) as usize;
        let v = (y & (self.h as i32 - 1)) as usize;
        self.pixels[v * self.w + u]
    }

    #[inline]
    pub fn is_pow2(&self) -> bool {
        self.w.is_power_of_two() && self.h.is_power_of_two()
    }

    /// Single-colour texture, handy for tests and placeholders.
    pub fn solid(name: &str, w: usize, h: usize, color: u32) -> Self {
        Texture {
            name: name.to_string(),
            w,
            h,
            pixels: vec![color; w * h],
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Floor/ceiling sampling wraps with a bitmask.
    #[error("texture `{name}` is {w}x{h}; floor and ceiling textures need power-of-two sizes")]
    NotPowerOfTwo { name: String, w: usize, h: usize },

    #[error("texture `{0}` has no pixels")]
    Empty(String),
}

/// Every texture a session uses, addressed by [`TextureId`].
///
/// Slot 0 holds the checkerboard that stands in for anything missing;
/// images are registered under their asset file name.
pub struct TextureBank {
    slots: Vec<Texture>,
    names: HashMap<String, TextureId>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::default_with_checker()
    }
}

impl TextureBank {
    /// Bank whose fallback slot is `fallback`, registered as `"MISSING"`.
    pub fn new(fallback: Texture) -> Self {
        Self {
            slots: vec![fallback],
            names: HashMap::from([("MISSING".to_owned(), NO_TEXTURE)]),
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Slot count, fallback included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True while only the fallback is present.
    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.slots.get(usize::from(id)).ok_or(TextureError::BadId(id))
    }

    /// Like [`texture`](Self::texture) but unknown ids draw the checkerboard.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        match self.slots.get(usize::from(id)) {
            Some(tex) => tex,
            None => &self.slots[usize::from(NO_TEXTURE)],
        }
    }

    /// Register `tex` under `name` and hand back its id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if tex.w == 0 || tex.h == 0 || tex.pixels.len() != tex.w * tex.h {
            return Err(TextureError::Empty(name));
        }
        let id = TextureId::try_from(self.slots.len()).map_err(|_| TextureError::BadId(TextureId::MAX))?;
        self.slots.push(tex);
        self.names.insert(name, id);
        Ok(id)
    }
}

/// Texture handles for every drawable surface of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Surfaces {
    pub boundary: TextureId,
    pub wall: TextureId,
    pub exit: TextureId,
    pub floor: TextureId,
    pub ceiling: TextureId,
    pub enemy: TextureId,
}

impl Surfaces {
    /// Wall texture for an opaque cell.
    pub fn wall_for(&self, cell: Cell) -> TextureId {
        match cell {
            Cell::Boundary => self.boundary,
            Cell::Exit => self.exit,
            _ => self.wall,
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn graded(name: &str, w: usize, h: usize) -> Texture {
        let mut tex = Texture::solid(name, w, h, 0);
        for (i, p) in tex.pixels.iter_mut().enumerate() {
            *p = i as u32;
        }
        tex
    }

    #[test]
    fn registered_images_get_fresh_ids() {
        let mut bank = TextureBank::default_with_checker();
        assert!(bank.is_empty());
        let wall = bank.insert("wall.png", Texture::solid("wall", 2, 2, 0xFF_00AA00)).unwrap();
        let exit = bank.insert("exit.png", Texture::solid("exit", 2, 2, 0xFF_FFFDD0)).unwrap();

        assert_eq!((wall, exit), (1, 2));
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.id("exit.png"), Some(exit));
        assert_eq!(bank.id("floor.png"), None);
        assert_eq!(bank.texture(wall).unwrap().pixels[0], 0xFF_00AA00);
    }

    #[test]
    fn duplicate_and_empty_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("wall.png", Texture::solid("wall", 1, 1, 1)).unwrap();
        assert_eq!(
            bank.insert("wall.png", Texture::solid("wall", 1, 1, 2)),
            Err(TextureError::Duplicate("wall.png".into()))
        );
        assert_eq!(
            bank.insert("blank.png", Texture::solid("blank", 0, 4, 0)),
            Err(TextureError::Empty("blank.png".into()))
        );
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn unknown_id_draws_checker() {
        let bank = TextureBank::default_with_checker();
        assert_eq!(bank.texture(9), Err(TextureError::BadId(9)));
        assert_eq!(bank.texture_or_missing(9).name, "CHECKER");
        assert_eq!(bank.id("MISSING"), Some(NO_TEXTURE));
    }

    #[test]
    fn surfaces_pick_wall_texture_by_cell() {
        let s = Surfaces {
            boundary: 1,
            wall: 2,
            exit: 3,
            ..Surfaces::default()
        };
        assert_eq!(s.wall_for(Cell::Boundary), 1);
        assert_eq!(s.wall_for(Cell::Wall), 2);
        assert_eq!(s.wall_for(Cell::Exit), 3);
    }

    #[test]
    fn sampling_wraps_both_ways() {
        let tex = graded("odd", 3, 5);
        assert_eq!(tex.sample(3, 5), tex.sample(0, 0));
        assert_eq!(tex.sample(-1, 0), tex.sample(2, 0));
        assert_eq!(tex.sample(4, 6), tex.sample(1, 1));
    }

    #[test]
    fn masked_sampling_agrees_on_pow2() {
        let tex = graded("p2", 4, 8);
        assert!(tex.is_pow2());
        assert!(!graded("odd", 3, 4).is_pow2());
        for (x, y) in [(0, 0), (4, 8), (5, 9), (-1, -1), (13, 2)] {
            assert_eq!(tex.sample_masked(x, y), tex.sample(x, y));
        }
    }
}
