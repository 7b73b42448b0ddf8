//! Plain-text level files.
//!
//! A file holds [`LEVEL_COUNT`] maps back to back, each `MAP_HEIGHT` rows of
//! `MAP_WIDTH` whitespace-separated cell codes. Line breaks carry no meaning;
//! values are consumed in order like a stream of integers.

use std::{fmt::Write as _, fs, io, path::Path};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::{LEVEL_COUNT, MAP_HEIGHT, MAP_WIDTH},
    world::grid::{Cell, GridMap},
};

/*=======================================================================*/
/*                                Errors                                 */
/*=======================================================================*/

#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("level {level}: value `{token}` at ({row}, {col}) is not an integer")]
    BadToken {
        level: usize,
        row: usize,
        col: usize,
        token: String,
    },

    #[error("level {level}: unknown cell code {code} at ({row}, {col})")]
    UnknownCell {
        level: usize,
        row: usize,
        col: usize,
        code: i32,
    },

    #[error("could not load level {level} at ({row}, {col}): file ends early")]
    Truncated { level: usize, row: usize, col: usize },

    #[error("level {level}: rows are empty or of unequal length")]
    Ragged { level: usize },
}

/*=======================================================================*/
/*                               Reading                                 */
/*=======================================================================*/

/// Parse the six maps of a level file. `level` in errors is 1-based.
pub fn parse_levels(text: &str) -> Result<Vec<GridMap>, LevelFileError> {
    let mut tokens = text.split_whitespace();
    let mut levels = Vec::with_capacity(LEVEL_COUNT);

    for level in 1..=LEVEL_COUNT {
        let mut rows = Vec::with_capacity(MAP_HEIGHT);
        for row in 0..MAP_HEIGHT {
            let mut cells = Vec::with_capacity(MAP_WIDTH);
            for col in 0..MAP_WIDTH {
                let token = tokens
                    .next()
                    .ok_or(LevelFileError::Truncated { level, row, col })?;
                let code: i32 = token.parse().map_err(|_| LevelFileError::BadToken {
                    level,
                    row,
                    col,
                    token: token.to_owned(),
                })?;
                let cell = Cell::from_code(code).ok_or(LevelFileError::UnknownCell {
                    level,
                    row,
                    col,
                    code,
                })?;
                cells.push(cell);
            }
            rows.push(cells);
        }
        levels.push(level_grid(level, rows)?);
    }

    let extra = tokens.count();
    if extra > 0 {
        debug!(extra, "ignoring trailing values after the last level");
    }
    Ok(levels)
}

fn level_grid(level: usize, rows: Vec<Vec<Cell>>) -> Result<GridMap, LevelFileError> {
    let grid = GridMap::from_rows(rows).ok_or(LevelFileError::Ragged { level })?;
    if !grid.is_enclosed() {
        warn!(level, "level border is not fully made of boundary cells");
    }
    Ok(grid)
}

/// Read and parse a level file from disk.
pub fn read_levels<P: AsRef<Path>>(path: P) -> Result<Vec<GridMap>, LevelFileError> {
    let text = fs::read_to_string(path)?;
    parse_levels(&text)
}

/*=======================================================================*/
/*                               Writing                                 */
/*=======================================================================*/

/// Render maps in the level-file format, one blank line between maps.
pub fn format_levels(levels: &[GridMap]) -> String {
    let mut out = String::new();
    for (i, grid) in levels.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for row in grid.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    out.push(' ');
                }
                first = false;
                let _ = write!(out, "{}", cell.code());
            }
            out.push('\n');
        }
    }
    out
}

pub fn write_levels<P: AsRef<Path>>(path: P, levels: &[GridMap]) -> Result<(), LevelFileError> {
    fs::write(path, format_levels(levels))?;
    Ok(())
}

/*=======================================================================*/
/*                                Tests                                  */
/*=======================================================================*/
