use std::fs;
use std::path::Path;

use engine::{load_level_catalog, resolve_app_paths, LoopConfig, Scene};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay;

const SETTINGS_FILE: &str = "settings.json";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
struct GameSettings {
    window_width: u32,
    window_height: u32,
    start_level: usize,
    max_render_fps: Option<u32>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            start_level: 0,
            max_render_fps: None,
        }
    }
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Emberwood Startup ===");

    let app_paths = resolve_app_paths().map_err(|error| format!("resolve app paths: {error}"))?;
    let settings = load_settings(&app_paths.root);
    let catalog = load_level_catalog(&app_paths.levels_dir)
        .map_err(|error| format!("load level catalog: {error}"))?;
    info!(
        level_count = catalog.len(),
        start_level = settings.start_level,
        "catalog_ready"
    );

    let start_level = settings.start_level % catalog.len();
    let scene = gameplay::build_scene(catalog, start_level, settings.window_width as f32);
    let config = LoopConfig {
        window_width: settings.window_width,
        window_height: settings.window_height,
        max_render_fps: settings.max_render_fps,
        ..LoopConfig::default()
    };

    Ok(AppWiring { config, scene })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// `settings.json` is optional; a missing file means defaults, while a
/// present-but-broken file is reported with the offending field path.
fn load_settings(root: &Path) -> GameSettings {
    let path = root.join(SETTINGS_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return GameSettings::default(),
    };
    match parse_settings(&raw) {
        Ok(settings) => {
            info!(path = %path.display(), "settings_loaded");
            settings
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                error = %error,
                "settings_invalid_using_defaults"
            );
            GameSettings::default()
        }
    }
}

fn parse_settings(raw: &str) -> Result<GameSettings, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, GameSettings>(&mut deserializer) {
        Ok(settings) => Ok(settings),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse settings json: {source}"))
            } else {
                Err(format!("parse settings json at {path}: {source}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_parse_accepts_partial_file() {
        let settings = parse_settings(r#"{ "window_width": 800 }"#).expect("settings");
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.window_height, 720);
        assert_eq!(settings.start_level, 0);
        assert_eq!(settings.max_render_fps, None);
    }

    #[test]
    fn settings_parse_reports_field_path_on_type_error() {
        let error = parse_settings(r#"{ "window_width": "wide" }"#).expect_err("err");
        assert!(error.contains("window_width"), "error was: {error}");
    }

    #[test]
    fn settings_parse_rejects_malformed_json() {
        assert!(parse_settings("{ nope").is_err());
    }
}
