use engine::{
    aabb_overlap, resolve_collision, Aabb, ActorPose, ActorVisual, BannerKind, Body, HudState,
    InputAction, InputSnapshot, LevelCatalog, RenderableKind, Scene, SceneWorld, TileGrid, Vec2,
};
use tracing::{debug, info, warn};

#[cfg(test)]
use engine::{LevelEntry, LoadedLevel, SpawnPoint, TriggerRect};

const HERO_BODY_WIDTH_PX: f32 = 20.0;
const HERO_BODY_HEIGHT_PX: f32 = 40.0;
const HERO_MOVE_SPEED_PX_PER_SECOND: f32 = 150.0;
const HERO_JUMP_IMPULSE_PX_PER_SECOND: f32 = -400.0;
const HERO_GRAVITY_PX_PER_SECOND_SQ: f32 = 980.0;
const HERO_MAX_HEALTH: i32 = 2;
const HERO_ATTACK_DURATION_SECONDS: f32 = 0.25;
const HERO_ATTACK_RANGE_PX: f32 = 30.0;
const HERO_INVULNERABILITY_SECONDS: f32 = 0.6;
const HERO_HURT_FLASH_SECONDS: f32 = 0.3;

const ENEMY_BODY_WIDTH_PX: f32 = 24.0;
const ENEMY_BODY_HEIGHT_PX: f32 = 28.0;
const ENEMY_MOVE_SPEED_PX_PER_SECOND: f32 = 80.0;
const ENEMY_GRAVITY_PX_PER_SECOND_SQ: f32 = 2500.0;
const ENEMY_MAX_HEALTH: i32 = 1;
const ENEMY_ATTACK_DURATION_SECONDS: f32 = 0.4;
const ENEMY_ATTACK_COOLDOWN_SECONDS: f32 = 1.0;
const ENEMY_ATTACK_RANGE_PX: f32 = 25.0;
const ENEMY_AGGRO_DISTANCE_PX: f32 = 40.0;
const EDGE_PROBE_AHEAD_PX: f32 = 2.0;

const FALL_DEATH_MARGIN_PX: f32 = 100.0;
const RESPAWN_DELAY_SECONDS: f32 = 2.0;
const LEVEL_BANNER_SECONDS: f32 = 2.0;

const HERO_SPRITE_KEY: &str = "hero";
const ENEMY_SPRITE_KEY: &str = "enemies/stalker";
const TRIGGER_SPRITE_KEY: &str = "props/sign";
const HERO_TINT: [u8; 4] = [226, 120, 60, 255];
const ENEMY_TINT: [u8; 4] = [104, 150, 88, 255];
const TRIGGER_TINT: [u8; 4] = [200, 180, 120, 150];

include!("types.rs");
include!("hero.rs");
include!("enemy.rs");
include!("combat.rs");
include!("scene_state.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_scene(
    catalog: LevelCatalog,
    start_level: usize,
    viewport_width_px: f32,
) -> Box<dyn Scene> {
    Box::new(GameplayScene::new(catalog, start_level, viewport_width_px))
}
