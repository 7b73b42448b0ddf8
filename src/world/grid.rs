//! The tile map: a fixed-size matrix of cell codes.

use glam::{IVec2, Vec2};

use crate::config::{MAP_HEIGHT, MAP_WIDTH, TILE_SIZE};

/// One map cell. Discriminants are the codes used by level files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Open = 0,
    Boundary = 1,
    Wall = 2,
    Exit = 3,
    Spawn = 4,
}

impl Cell {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Cell::Open,
            1 => Cell::Boundary,
            2 => Cell::Wall,
            3 => Cell::Exit,
            4 => Cell::Spawn,
            _ => return None,
        })
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Stops rays (and is drawn as a wall face).
    #[inline]
    pub fn is_opaque(self) -> bool {
        matches!(self, Cell::Boundary | Cell::Wall | Cell::Exit)
    }

    /// Stops bodies.
    #[inline]
    pub fn is_blocking(self) -> bool {
        matches!(self, Cell::Boundary | Cell::Wall)
    }
}

/// Row-major grid of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for GridMap {
    /// Standard-size map: boundary ring around an open interior.
    fn default() -> Self {
        Self::bordered(MAP_WIDTH, MAP_HEIGHT)
    }
}

impl GridMap {
    /// All-open grid of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Open; width * height],
        }
    }

    /// Open interior enclosed by a single ring of boundary cells.
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut g = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    g.cells[y * width + x] = Cell::Boundary;
                }
            }
        }
        g
    }

    /// Build from rows of cells; `None` if the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Map extent in world pixels for a given tile size.
    #[inline]
    pub fn extent(&self, tile: f32) -> Vec2 {
        Vec2::new(self.width as f32 * tile, self.height as f32 * tile)
    }

    #[inline]
    pub fn in_bounds(&self, cx: i32, cy: i32) -> bool {
        cx >= 0 && cy >= 0 && (cx as usize) < self.width && (cy as usize) < self.height
    }

    /// Bounds-checked lookup.
    #[inline]
    pub fn cell(&self, cx: i32, cy: i32) -> Option<Cell> {
        if !self.in_bounds(cx, cy) {
            return None;
        }
        Some(self.cells[cy as usize * self.width + cx as usize])
    }

    pub fn set(&mut self, cx: usize, cy: usize, cell: Cell) {
        assert!(cx < self.width && cy < self.height, "cell ({cx}, {cy}) out of bounds");
        self.cells[cy * self.width + cx] = cell;
    }

    /// Out-of-map counts as blocking.
    pub fn is_blocking(&self, cx: i32, cy: i32) -> bool {
        self.cell(cx, cy).is_none_or(Cell::is_blocking)
    }

    /// Cell index containing world point `p`.
    #[inline]
    pub fn world_to_cell(p: Vec2, tile: f32) -> IVec2 {
        (p / tile).floor().as_ivec2()
    }

    /// Centre of cell `(cx, cy)` in world pixels.
    #[inline]
    pub fn cell_center(cx: i32, cy: i32) -> Vec2 {
        Vec2::new((cx as f32 + 0.5) * TILE_SIZE, (cy as f32 + 0.5) * TILE_SIZE)
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % self.width, i / self.width, c))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Cells marked as enemy spawn points, row-major.
    pub fn spawn_points(&self) -> Vec<IVec2> {
        self.iter()
            .filter(|&(_, _, c)| c == Cell::Spawn)
            .map(|(x, y, _)| IVec2::new(x as i32, y as i32))
            .collect()
    }

    /// Where the player starts: the first open cell in row-major order.
    pub fn start_cell(&self) -> Option<IVec2> {
        self.iter()
            .find(|&(_, _, c)| c == Cell::Open)
            .map(|(x, y, _)| IVec2::new(x as i32, y as i32))
    }

    /// True when every border cell is a boundary.
    pub fn is_enclosed(&self) -> bool {
        self.iter().all(|(x, y, c)| {
            let border = x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height;
            !border || c == Cell::Boundary
        })
    }
}
