use crate::{
    config::{Settings, TILE_SIZE},
    engine::{
        minimap::{ENEMY_COLOR, Minimap, PLAYER_COLOR},
        planes::{PlaneView, draw_flat_backdrop, draw_floor_ceiling},
        projection::{Projection, Screen},
        sprites::{Billboard, collect_visible, draw_sprites},
        sweep::{Column, DepthBuffer, sweep},
        walls::draw_walls,
    },
    renderer::{Renderer, Rgba},
    sim::components::{Body, Sprite},
    world::{
        grid::Cell,
        level::World,
        texture::{Surfaces, TextureBank},
    },
};

/// Draws one complete frame of a [`World`] through a [`Renderer`].
///
/// Per frame, in order: sweep, floor/ceiling (or flat backdrop), walls,
/// sprites, minimap, present.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub screen: Screen,
    pub minimap: Minimap,
    pub show_minimap: bool,
    pub flat: bool,
    columns: Vec<Column>,
    depth: DepthBuffer,
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, w: usize, h: usize, minimap_scale: f32) -> Self {
        Self {
            renderer,
            screen: Screen::new(w, h),
            minimap: Minimap::new(minimap_scale, TILE_SIZE),
            show_minimap: true,
            flat: false,
            columns: Vec::with_capacity(w),
            depth: DepthBuffer::new(w),
        }
    }

    pub fn from_settings(renderer: R, settings: &Settings) -> Self {
        let mut engine = Self::new(renderer, settings.width, settings.height, settings.minimap_scale);
        engine.flat = settings.flat;
        engine
    }

    /// Depth buffer of the last rendered frame.
    #[inline]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Column records of the last rendered frame.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn toggle_minimap(&mut self) {
        self.show_minimap = !self.show_minimap;
    }

    /// Render `world` and hand the finished buffer to `submit`.
    pub fn render_frame<T>(
        &mut self,
        world: &World,
        bank: &TextureBank,
        surfaces: &Surfaces,
        submit: impl FnOnce(&[Rgba], usize, usize) -> T,
    ) -> T {
        let screen = self.screen;
        self.renderer.begin_frame(screen.w, screen.h);

        let grid = world.grid();
        let player = &world.player;
        let proj = Projection::new(player.fov(), screen.w, TILE_SIZE);

        sweep(grid, player, &proj, &mut self.columns, &mut self.depth);

        if self.flat {
            draw_flat_backdrop(&mut self.renderer, &screen);
        } else {
            let view = PlaneView::new(player, TILE_SIZE, proj.plane_dist);
            draw_floor_ceiling(
                &mut self.renderer,
                &screen,
                &view,
                bank.texture_or_missing(surfaces.floor),
                bank.texture_or_missing(surfaces.ceiling),
            );
        }

        draw_walls(&mut self.renderer, &screen, &self.columns, self.flat, |col| {
            bank.texture_or_missing(surfaces.wall_for(col.hit.cell.unwrap_or(Cell::Wall)))
        });

        let billboards = Self::billboards(world);
        let visible = collect_visible(&billboards, player, &proj, &screen, &self.depth);
        draw_sprites(&mut self.renderer, &screen, &visible, bank);

        if self.show_minimap {
            self.draw_minimap(world, &billboards);
        }

        self.renderer.present(submit)
    }

    fn billboards(world: &World) -> Vec<Billboard> {
        world
            .actors
            .query::<(&Body, &Sprite)>()
            .iter()
            .map(|(_, (body, sprite))| Billboard {
                center: body.0.center(),
                size: body.0.size.y,
                tex: sprite.0,
            })
            .collect()
    }

    fn draw_minimap(&mut self, world: &World, billboards: &[Billboard]) {
        let mm = self.minimap;
        mm.draw_tiles(&mut self.renderer, world.grid());
        mm.draw_rays(&mut self.renderer, world.grid(), &world.player, self.screen.w);
        for b in billboards {
            mm.draw_marker(&mut self.renderer, b.center, b.size, ENEMY_COLOR);
        }
        mm.draw_marker(&mut self.renderer, world.player.pos, world.player_size, PLAYER_COLOR);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
