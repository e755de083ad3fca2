use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::app::{Aabb, TileGrid, TmxError, Vec2};

pub const LEVELS_MANIFEST_FILE: &str = "levels.json";

/// World-pixel spawn point, anchored at the actor's bottom center
/// (feet position), matching how level authors mark the ground.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    pub fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

/// Static zone with no behavior beyond overlap testing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TriggerRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TriggerRect {
    pub fn to_aabb(self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    pub tilemap: String,
    pub hero_spawn: SpawnPoint,
    #[serde(default)]
    pub enemy_spawns: Vec<SpawnPoint>,
    pub start_trigger: TriggerRect,
    pub end_trigger: TriggerRect,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LevelManifest {
    levels: Vec<LevelEntry>,
}

/// One playable level: its descriptor plus the solidity grid built
/// from the referenced tilemap.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLevel {
    pub entry: LevelEntry,
    pub grid: TileGrid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LoadedLevel>,
}

impl LevelCatalog {
    /// Build a catalog directly from already-loaded levels. The
    /// manifest loader is the normal entry point; this one exists for
    /// programmatic level sets.
    pub fn from_levels(levels: Vec<LoadedLevel>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LoadedLevel> {
        self.levels.get(index)
    }
}

#[derive(Debug, Error)]
pub enum LevelCatalogError {
    #[error("failed to read level manifest '{path}': {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level manifest '{path}': {source}")]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("level manifest '{path}' declares no levels")]
    EmptyManifest { path: PathBuf },
    #[error("failed to load tilemap for level '{name}': {source}")]
    Tilemap {
        name: String,
        #[source]
        source: TmxError,
    },
}

/// Load the manifest and every tilemap it references. Any failure is
/// fatal to the whole load; no partial catalog is returned.
pub fn load_level_catalog(levels_dir: &Path) -> Result<LevelCatalog, LevelCatalogError> {
    let manifest_path = levels_dir.join(LEVELS_MANIFEST_FILE);
    let raw =
        fs::read_to_string(&manifest_path).map_err(|source| LevelCatalogError::ReadManifest {
            path: manifest_path.clone(),
            source,
        })?;
    let manifest: LevelManifest =
        serde_json::from_str(&raw).map_err(|source| LevelCatalogError::ParseManifest {
            path: manifest_path.clone(),
            source,
        })?;
    if manifest.levels.is_empty() {
        return Err(LevelCatalogError::EmptyManifest {
            path: manifest_path,
        });
    }

    let mut levels = Vec::with_capacity(manifest.levels.len());
    for entry in manifest.levels {
        let tilemap_path = levels_dir.join(&entry.tilemap);
        let grid = TileGrid::load_tmx_file(&tilemap_path).map_err(|source| {
            LevelCatalogError::Tilemap {
                name: entry.name.clone(),
                source,
            }
        })?;
        info!(
            level = entry.name.as_str(),
            width_tiles = grid.width(),
            height_tiles = grid.height(),
            enemy_spawns = entry.enemy_spawns.len(),
            "level_loaded"
        );
        levels.push(LoadedLevel { entry, grid });
    }

    Ok(LevelCatalog::from_levels(levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TMX: &str = r#"<map width="4" height="2" tilewidth="32" tileheight="32">
 <layer><data encoding="csv">
0,0,0,0,
1,1,1,1
 </data></layer></map>
"#;

    fn write_manifest(dir: &Path, body: &str) {
        fs::write(dir.join(LEVELS_MANIFEST_FILE), body).expect("write manifest");
    }

    fn sample_manifest_body(tilemap: &str) -> String {
        format!(
            r#"{{
  "levels": [
    {{
      "name": "glade",
      "tilemap": "{tilemap}",
      "hero_spawn": {{ "x": 48.0, "y": 32.0 }},
      "enemy_spawns": [{{ "x": 96.0, "y": 32.0 }}],
      "start_trigger": {{ "x": 0.0, "y": 0.0, "width": 32.0, "height": 64.0 }},
      "end_trigger": {{ "x": 96.0, "y": 0.0, "width": 32.0, "height": 64.0 }}
    }}
  ]
}}"#
        )
    }

    #[test]
    fn catalog_loads_manifest_and_tilemaps() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_manifest(dir.path(), &sample_manifest_body("glade.tmx"));
        fs::write(dir.path().join("glade.tmx"), TEST_TMX).expect("write tmx");

        let catalog = load_level_catalog(dir.path()).expect("catalog");
        assert_eq!(catalog.len(), 1);
        let level = catalog.get(0).expect("level");
        assert_eq!(level.entry.name, "glade");
        assert_eq!(level.entry.enemy_spawns.len(), 1);
        assert!(level.grid.is_solid_tile(0, 1));
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_level_catalog(dir.path()).expect_err("err");
        assert!(matches!(err, LevelCatalogError::ReadManifest { .. }));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_manifest(dir.path(), "{ not json");
        let err = load_level_catalog(dir.path()).expect_err("err");
        assert!(matches!(err, LevelCatalogError::ParseManifest { .. }));
    }

    #[test]
    fn empty_level_list_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_manifest(dir.path(), r#"{ "levels": [] }"#);
        let err = load_level_catalog(dir.path()).expect_err("err");
        assert!(matches!(err, LevelCatalogError::EmptyManifest { .. }));
    }

    #[test]
    fn missing_tilemap_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_manifest(dir.path(), &sample_manifest_body("nowhere.tmx"));
        let err = load_level_catalog(dir.path()).expect_err("err");
        match err {
            LevelCatalogError::Tilemap { name, .. } => assert_eq!(name, "glade"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn trigger_rect_converts_to_aabb() {
        let rect = TriggerRect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        let aabb = rect.to_aabb();
        assert_eq!(aabb.x, 1.0);
        assert_eq!(aabb.height, 4.0);
    }
}
