//! Rendering abstraction layer.
//!
//! *The ray-casting engine never touches a pixel buffer directly.*
//! It paints through a type that implements [`Renderer`], a small
//! SDL-style drawing surface: a current draw colour, filled rectangles,
//! lines, points and a `present` that hands the finished frame on.
//!
//! * You can plug another back-end without changing engine code.
//! * A blanket [`RendererExt`] adds a few composite helpers so call-sites
//!   stay short.

/// Pixel format of the frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Pack an opaque colour.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Integer screen rectangle; `w`/`h` may be zero (nothing drawn).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// A drawing surface that owns an internal scratch buffer for the frame.
///
/// `present` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution.
    fn begin_frame(&mut self, width: usize, height: usize);

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn set_draw_color(&mut self, color: Rgba);

    /// Fill `rect` (clipped to the surface) with the draw colour.
    fn fill_rect(&mut self, rect: ScreenRect);

    /// Draw a line with the draw colour; both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Plot one pixel with the draw colour; off-surface points are ignored.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Plot one pixel in an explicit colour. Back-ends with direct buffer
    /// access should override this; it is the hot path of every texturer.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        self.set_draw_color(color);
        self.draw_point(x, y);
    }

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn present<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T;
}

/// Composite helpers available on every [`Renderer`].
pub trait RendererExt: Renderer {
    /// Fill the whole surface.
    fn clear(&mut self, color: Rgba) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        self.set_draw_color(color);
        self.fill_rect(ScreenRect::new(0, 0, w, h));
    }

    /// Vertical run `y0..=y1` in column `x`.
    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba) {
        self.set_draw_color(color);
        self.draw_line(x, y0, x, y1);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
