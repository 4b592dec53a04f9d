//! Line-oriented map files.
//!
//! ```text
//! # comments and blank lines are ignored
//! pos_house_min_tile=(15,10)
//! !data
//! 3,1,1,4
//! 2,0,0,2
//! 6,1,1,5
//! ```
//!
//! Lines before `!data` are `key=value` properties. Each line after it is one row of
//! comma-separated numeric [`TileCode`]s, top row first.

use super::{grid::GridConversionErr, TileCode, TileGrid};
use crate::geometry::Tile;
use std::{
    fs::File,
    io::{prelude::*, BufReader},
    path::Path,
};

const DATA_MARKER: &str = "!data";

/// Load the map file at the specified path.
pub fn load(path: &Path) -> Result<TileGrid, WorldFileError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse map file contents from a string; useful for test data.
pub fn parse_str(data: &str) -> Result<TileGrid, WorldFileError> {
    parse_reader(data.as_bytes())
}

/// Parse the contents of the provided reader.
///
/// Often [`load`] or [`parse_str`] are more ergonomic.
pub fn parse_reader(reader: impl BufRead) -> Result<TileGrid, WorldFileError> {
    let mut properties = Vec::new();
    let mut rows: Vec<Vec<TileCode>> = Vec::new();
    let mut in_data = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !in_data {
            if line == DATA_MARKER {
                in_data = true;
                continue;
            }
            let (name, value) = line
                .split_once('=')
                .ok_or(WorldFileError::MalformedProperty(line_no))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(WorldFileError::MalformedProperty(line_no));
            }
            properties.push((name.to_string(), value.trim().to_string()));
            continue;
        }

        let row = line
            .split(',')
            .map(|value| {
                let value = value.trim();
                value
                    .parse::<u8>()
                    .ok()
                    .and_then(|byte| TileCode::try_from(byte).ok())
                    .ok_or_else(|| WorldFileError::InvalidTileCode {
                        line: line_no,
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(WorldFileError::NotRectangular(line_no));
            }
        }
        rows.push(row);
    }

    if !in_data {
        return Err(WorldFileError::MissingData);
    }

    let mut grid = TileGrid::from_rows(&rows)?;
    for (name, value) in properties {
        grid.set_property(name, value);
    }
    log::debug!(
        "parsed {}x{} grid with {} properties",
        grid.rows(),
        grid.cols(),
        grid.properties().count()
    );
    Ok(grid)
}

/// Write a grid in map file form.
pub fn write(grid: &TileGrid, mut writer: impl Write) -> std::io::Result<()> {
    let mut properties: Vec<_> = grid.properties().collect();
    properties.sort_unstable();
    for (name, value) in properties {
        writeln!(writer, "{}={}", name, value)?;
    }
    writeln!(writer, "{}", DATA_MARKER)?;
    for row in 0..grid.rows() as i32 {
        let codes: Vec<String> = (0..grid.cols() as i32)
            .map(|col| grid[Tile::new(row, col)])
            .map(|code| u8::from(code).to_string())
            .collect();
        writeln!(writer, "{}", codes.join(","))?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum WorldFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {0}: expected `key=value`")]
    MalformedProperty(usize),
    #[error("line {line}: {value:?} is not a tile code")]
    InvalidTileCode { line: usize, value: String },
    #[error("line {0}: row length differs from the first row")]
    NotRectangular(usize),
    #[error("no `{}` section", DATA_MARKER)]
    MissingData,
    #[error("building grid")]
    Grid(#[from] GridConversionErr),
}
