use crate::{
    engine::{projection::Screen, ray::Orientation, sweep::Column},
    renderer::{Renderer, RendererExt, Rgba, rgb},
    world::texture::Texture,
};

/// Flat-shaded slice colours.
pub const FLAT_HORIZONTAL: Rgba = rgb(64, 64, 64);
pub const FLAT_VERTICAL: Rgba = rgb(255, 253, 208);

/// Paint a textured wall slice centred on mid-screen.
///
/// The slice spans `wall_h` rows before clipping; every visible row maps
/// back into the texture through its offset in that unclipped span:
///
/// ```text
/// tex_y = (y − H/2 + wall_h/2) · tex_h / wall_h
/// ```
pub fn draw_textured_column<R: Renderer>(
    r: &mut R,
    screen: &Screen,
    x: i32,
    wall_h: f32,
    tex: &Texture,
    tex_x: i32,
) {
    let wall_h = wall_h as i64;
    if wall_h <= 0 || x < 0 || x >= screen.w as i32 {
        return;
    }
    let h = screen.h as i64;
    let top = h / 2 - wall_h / 2;
    let y0 = top.max(0);
    let y1 = (top + wall_h).min(h);
    let tex_h = tex.h as i64;

    for y in y0..y1 {
        let tex_y = (y - h / 2 + wall_h / 2) * tex_h / wall_h;
        r.put_pixel(x, y as i32, tex.sample(tex_x, tex_y as i32));
    }
}

/// Flat-shaded alternative: a solid line, shaded by the face it hit.
pub fn draw_flat_column<R: Renderer>(r: &mut R, screen: &Screen, x: i32, wall_h: f32, face: Orientation) {
    if wall_h <= 0.0 {
        return;
    }
    let half = (wall_h * 0.5) as i32;
    let mid = screen.h as i32 / 2;
    let y0 = (mid - half).max(0);
    let y1 = (mid + half).min(screen.h as i32 - 1);
    if y0 > y1 {
        return;
    }
    let color = match face {
        Orientation::Horizontal => FLAT_HORIZONTAL,
        Orientation::Vertical => FLAT_VERTICAL,
    };
    r.vline(x, y0, y1, color);
}

/// Paint a whole sweep, one column per screen x. Columns without a hit
/// are left alone.
pub fn draw_walls<'t, R, F>(r: &mut R, screen: &Screen, columns: &[Column], flat: bool, texture_for: F)
where
    R: Renderer,
    F: Fn(&Column) -> &'t Texture,
{
    for (x, col) in columns.iter().enumerate() {
        if !col.hit.is_hit() {
            continue;
        }
        if flat {
            draw_flat_column(r, screen, x as i32, col.height, col.hit.orientation);
        } else {
            let tex = texture_for(col);
            draw_textured_column(r, screen, x as i32, col.height, tex, col.tex_x(tex.w));
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Software;

    const BG: Rgba = 0xFF_202020;

    /// 1×4 texture with one colour per row.
    fn stripes() -> Texture {
        Texture {
            name: "STRIPES".into(),
            w: 1,
            h: 4,
            pixels: vec![0xFF_000001, 0xFF_000002, 0xFF_000003, 0xFF_000004],
        }
    }

    #[test]
    fn full_height_slice_maps_whole_texture() {
        let screen = Screen::new(4, 8);
        let mut sw = Software::new(4, 8);
        draw_textured_column(&mut sw, &screen, 1, 8.0, &stripes(), 0);
        let col: Vec<_> = (0..8).map(|y| sw.pixel(1, y).unwrap()).collect();
        assert_eq!(
            col,
            vec![1, 1, 2, 2, 3, 3, 4, 4]
                .into_iter()
                .map(|v| 0xFF_000000 | v)
                .collect::<Vec<_>>()
        );
        assert_eq!(sw.pixel(0, 0), Some(BG));
    }

    #[test]
    fn tall_slice_is_clipped_but_keeps_mapping() {
        // 16-row slice on an 8-row screen: only the middle half of the
        // texture is visible.
        let screen = Screen::new(2, 8);
        let mut sw = Software::new(2, 8);
        draw_textured_column(&mut sw, &screen, 0, 16.0, &stripes(), 0);
        assert_eq!(sw.pixel(0, 0), Some(0xFF_000002));
        assert_eq!(sw.pixel(0, 7), Some(0xFF_000003));
    }

    #[test]
    fn short_slice_is_centred() {
        let screen = Screen::new(1, 10);
        let mut sw = Software::new(1, 10);
        draw_textured_column(&mut sw, &screen, 0, 4.0, &stripes(), 0);
        assert_eq!(sw.pixel(0, 2), Some(BG));
        assert_eq!(sw.pixel(0, 3), Some(0xFF_000001));
        assert_eq!(sw.pixel(0, 6), Some(0xFF_000004));
        assert_eq!(sw.pixel(0, 7), Some(BG));
    }

    #[test]
    fn flat_slices_shade_by_face() {
        let screen = Screen::new(2, 6);
        let mut sw = Software::new(2, 6);
        draw_flat_column(&mut sw, &screen, 0, 2.0, Orientation::Horizontal);
        draw_flat_column(&mut sw, &screen, 1, 2.0, Orientation::Vertical);
        assert_eq!(sw.pixel(0, 3), Some(FLAT_HORIZONTAL));
        assert_eq!(sw.pixel(1, 3), Some(FLAT_VERTICAL));
        assert_eq!(sw.pixel(0, 0), Some(BG));
    }
}
