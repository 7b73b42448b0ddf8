//! CPU frame-buffer backend.
//!
//! Pixels are 0xAARRGGBB; every primitive clips against the buffer.

use crate::renderer::{Renderer, Rgba, ScreenRect};

/// Colour every frame starts from.
pub const CLEAR: Rgba = 0xFF_202020;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    color: Rgba,
    width: usize,
    height: usize,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        let mut sw = Self::default();
        sw.begin_frame(width, height);
        sw
    }

    /// Finished pixels of the current frame, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Read back one pixel (tests / debugging).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }

    /// Write one pixel; off-surface coordinates are dropped.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Rgba) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.scratch[y * self.width + x] = color;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if (w, h) != (self.width, self.height) {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_draw_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn fill_rect(&mut self, r: ScreenRect) {
        let x0 = r.x.max(0);
        let y0 = r.y.max(0);
        let x1 = (r.x + r.w).min(self.width as i32);
        let y1 = (r.y + r.h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let row = y as usize * self.width;
            self.scratch[row + x0 as usize..row + x1 as usize].fill(self.color);
        }
    }

    /// Bresenham, both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        let color = self.color;
        loop {
            self.plot(x, y, color);
            if (x, y) == (x1, y1) {
                return;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    #[inline]
    fn draw_point(&mut self, x: i32, y: i32) {
        self.plot(x, y, self.color);
    }

    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        self.plot(x, y, color);
    }

    fn present<F, T>(&mut self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
