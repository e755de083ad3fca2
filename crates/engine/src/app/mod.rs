mod input;
mod loop_runner;
mod metrics;
mod physics;
mod rendering;
mod scene;
mod tilegrid;

pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use physics::{aabb_overlap, resolve_collision, Aabb, Body};
pub use rendering::{world_to_screen_px, Renderer, Viewport};
pub use scene::{
    ActorPose, ActorVisual, BannerKind, Camera, HudState, InputSnapshot, RenderableKind, Scene,
    SceneWorld, Vec2,
};
pub use tilegrid::{TileGrid, TileGridError, TmxError};
