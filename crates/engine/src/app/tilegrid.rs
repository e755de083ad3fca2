use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Per-level solidity lookup. Cell identifiers come from a tilemap
/// layer where `0` is empty and any positive value blocks movement;
/// the grid never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    solid: Vec<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileGridError {
    #[error("tile size must be positive, got {width}x{height}")]
    ZeroTileSize { width: u32, height: u32 },
    #[error("map size must be positive, got {width}x{height} tiles")]
    ZeroMapSize { width: u32, height: u32 },
    #[error("cell count mismatch: expected {expected}, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

impl TileGrid {
    pub fn from_cells(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        cells: &[u32],
    ) -> Result<Self, TileGridError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(TileGridError::ZeroTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if width == 0 || height == 0 {
            return Err(TileGridError::ZeroMapSize { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(TileGridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            solid: cells.iter().map(|cell| *cell > 0).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn width_px(&self) -> f32 {
        (self.width * self.tile_width) as f32
    }

    pub fn height_px(&self) -> f32 {
        (self.height * self.tile_height) as f32
    }

    /// Out-of-bounds tiles are not solid; actors may leave the level
    /// horizontally, and the fall-death check lives with the caller.
    pub fn is_solid_tile(&self, tile_x: i64, tile_y: i64) -> bool {
        if tile_x < 0 || tile_y < 0 {
            return false;
        }
        if tile_x >= self.width as i64 || tile_y >= self.height as i64 {
            return false;
        }
        self.solid[tile_y as usize * self.width as usize + tile_x as usize]
    }

    pub fn is_solid_at_world(&self, x: f32, y: f32) -> bool {
        let tile_x = (x / self.tile_width as f32).floor() as i64;
        let tile_y = (y / self.tile_height as f32).floor() as i64;
        self.is_solid_tile(tile_x, tile_y)
    }
}

#[derive(Debug, Error)]
pub enum TmxError {
    #[error("failed to read tilemap '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tilemap xml: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("tilemap is missing required element <{0}>")]
    MissingElement(&'static str),
    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("element <{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    #[error("layer data contains invalid cell '{value}'")]
    InvalidCell { value: String },
    #[error(transparent)]
    Grid(#[from] TileGridError),
}

impl TileGrid {
    /// Parse a TMX document: the `<map>` dimensions plus the first
    /// `<layer>`'s CSV `<data>` payload, one row per line.
    pub fn from_tmx_str(text: &str) -> Result<Self, TmxError> {
        let document = roxmltree::Document::parse(text)?;
        let map = document
            .descendants()
            .find(|node| node.has_tag_name("map"))
            .ok_or(TmxError::MissingElement("map"))?;

        let width = parse_u32_attribute(&map, "map", "width")?;
        let height = parse_u32_attribute(&map, "map", "height")?;
        let tile_width = parse_u32_attribute(&map, "map", "tilewidth")?;
        let tile_height = parse_u32_attribute(&map, "map", "tileheight")?;

        let layer = map
            .descendants()
            .find(|node| node.has_tag_name("layer"))
            .ok_or(TmxError::MissingElement("layer"))?;
        let data = layer
            .descendants()
            .find(|node| node.has_tag_name("data"))
            .ok_or(TmxError::MissingElement("data"))?;
        if let Some(encoding) = data.attribute("encoding") {
            if encoding != "csv" {
                return Err(TmxError::InvalidAttribute {
                    element: "data",
                    attribute: "encoding",
                    value: encoding.to_string(),
                });
            }
        }

        let csv = data.text().unwrap_or("");
        let cells = parse_csv_cells(csv)?;
        Ok(Self::from_cells(
            width,
            height,
            tile_width,
            tile_height,
            &cells,
        )?)
    }

    pub fn load_tmx_file(path: &Path) -> Result<Self, TmxError> {
        let text = fs::read_to_string(path).map_err(|source| TmxError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tmx_str(&text)
    }
}

fn parse_u32_attribute(
    node: &roxmltree::Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<u32, TmxError> {
    let raw = node
        .attribute(attribute)
        .ok_or(TmxError::MissingAttribute { element, attribute })?;
    raw.parse::<u32>().map_err(|_| TmxError::InvalidAttribute {
        element,
        attribute,
        value: raw.to_string(),
    })
}

fn parse_csv_cells(csv: &str) -> Result<Vec<u32>, TmxError> {
    let mut cells = Vec::new();
    for row in csv.lines() {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }
        for cell in row.split(',') {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<u32>().map_err(|_| TmxError::InvalidCell {
                value: cell.to_string(),
            })?;
            cells.push(value);
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_floor_grid() -> TileGrid {
        // 4x4 map of 32px tiles with a solid bottom row.
        let mut cells = vec![0u32; 16];
        for cell in cells.iter_mut().skip(12) {
            *cell = 1;
        }
        TileGrid::from_cells(4, 4, 32, 32, &cells).expect("grid")
    }

    #[test]
    fn from_cells_rejects_count_mismatch() {
        let err = TileGrid::from_cells(2, 2, 32, 32, &[0, 1, 2]).expect_err("err");
        assert_eq!(
            err,
            TileGridError::CellCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn from_cells_rejects_zero_tile_size() {
        let err = TileGrid::from_cells(2, 2, 0, 32, &[0, 0, 0, 0]).expect_err("err");
        assert_eq!(
            err,
            TileGridError::ZeroTileSize {
                width: 0,
                height: 32
            }
        );
    }

    #[test]
    fn any_positive_cell_is_solid() {
        let grid = TileGrid::from_cells(3, 1, 16, 16, &[0, 1, 907]).expect("grid");
        assert!(!grid.is_solid_tile(0, 0));
        assert!(grid.is_solid_tile(1, 0));
        assert!(grid.is_solid_tile(2, 0));
    }

    #[test]
    fn out_of_bounds_probes_are_not_solid() {
        let grid = solid_floor_grid();
        assert!(!grid.is_solid_tile(-1, 3));
        assert!(!grid.is_solid_tile(4, 3));
        assert!(!grid.is_solid_tile(0, -1));
        assert!(!grid.is_solid_tile(0, 4));
        assert!(!grid.is_solid_at_world(-5.0, 100.0));
        assert!(!grid.is_solid_at_world(500.0, 100.0));
    }

    #[test]
    fn world_probe_uses_floor_division() {
        let grid = solid_floor_grid();
        assert!(grid.is_solid_at_world(0.0, 96.0));
        assert!(grid.is_solid_at_world(31.9, 127.9));
        assert!(!grid.is_solid_at_world(31.9, 95.9));
    }

    #[test]
    fn pixel_dimensions_multiply_tile_size() {
        let grid = solid_floor_grid();
        assert_eq!(grid.width_px(), 128.0);
        assert_eq!(grid.height_px(), 128.0);
    }

    const SAMPLE_TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" width="4" height="2" tilewidth="32" tileheight="32">
 <layer id="1" name="ground" width="4" height="2">
  <data encoding="csv">
0,0,0,0,
1,1,2,1
  </data>
 </layer>
</map>
"#;

    #[test]
    fn tmx_parse_builds_expected_grid() {
        let grid = TileGrid::from_tmx_str(SAMPLE_TMX).expect("grid");
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_width(), 32);
        assert!(!grid.is_solid_tile(0, 0));
        assert!(grid.is_solid_tile(0, 1));
        assert!(grid.is_solid_tile(2, 1));
    }

    #[test]
    fn tmx_missing_layer_is_an_error() {
        let text = r#"<map width="2" height="2" tilewidth="32" tileheight="32"></map>"#;
        let err = TileGrid::from_tmx_str(text).expect_err("err");
        assert!(matches!(err, TmxError::MissingElement("layer")));
    }

    #[test]
    fn tmx_bad_dimension_attribute_is_an_error() {
        let text = r#"<map width="wide" height="2" tilewidth="32" tileheight="32">
 <layer><data>0,0</data></layer></map>"#;
        let err = TileGrid::from_tmx_str(text).expect_err("err");
        assert!(matches!(
            err,
            TmxError::InvalidAttribute {
                element: "map",
                attribute: "width",
                ..
            }
        ));
    }

    #[test]
    fn tmx_short_csv_payload_is_an_error() {
        let text = r#"<map width="2" height="2" tilewidth="32" tileheight="32">
 <layer><data encoding="csv">0,0,1</data></layer></map>"#;
        let err = TileGrid::from_tmx_str(text).expect_err("err");
        assert!(matches!(
            err,
            TmxError::Grid(TileGridError::CellCountMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn tmx_non_csv_encoding_is_rejected() {
        let text = r#"<map width="1" height="1" tilewidth="32" tileheight="32">
 <layer><data encoding="base64">AAAA</data></layer></map>"#;
        let err = TileGrid::from_tmx_str(text).expect_err("err");
        assert!(matches!(
            err,
            TmxError::InvalidAttribute {
                element: "data",
                attribute: "encoding",
                ..
            }
        ));
    }

    #[test]
    fn tmx_negative_cell_is_rejected() {
        let text = r#"<map width="2" height="1" tilewidth="32" tileheight="32">
 <layer><data encoding="csv">0,-3</data></layer></map>"#;
        let err = TileGrid::from_tmx_str(text).expect_err("err");
        assert!(matches!(err, TmxError::InvalidCell { .. }));
    }

    #[test]
    fn load_tmx_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("level.tmx");
        std::fs::write(&path, SAMPLE_TMX).expect("write tmx");

        let grid = TileGrid::load_tmx_file(&path).expect("grid");
        assert_eq!(grid.width(), 4);
        assert!(grid.is_solid_tile(1, 1));
    }

    #[test]
    fn load_tmx_file_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = TileGrid::load_tmx_file(&dir.path().join("missing.tmx")).expect_err("err");
        assert!(matches!(err, TmxError::Read { .. }));
    }
}
