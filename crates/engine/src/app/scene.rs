use super::input::{ActionStates, InputAction};
use super::tilegrid::TileGrid;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Per-tick snapshot of player intent. The collector owns key mapping
/// and edge semantics; the simulation only ever sees held booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(quit_requested: bool, actions: ActionStates) -> Self {
        Self {
            quit_requested,
            actions,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }
}

/// Horizontal scroll offset in world pixels. The viewport maps world
/// x in `[offset_x, offset_x + viewport_width)` onto the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
}

impl Camera {
    /// Center the viewport on `target_center_x`, clamped so the view
    /// never leaves `[0, level_width_px - viewport_width_px]`. Levels
    /// narrower than the viewport pin the camera to 0.
    pub fn follow(&mut self, target_center_x: f32, viewport_width_px: f32, level_width_px: f32) {
        let max_offset = (level_width_px - viewport_width_px).max(0.0);
        let target = target_center_x - viewport_width_px * 0.5;
        self.offset_x = target.clamp(0.0, max_offset);
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
    }
}

/// Behavioral tag the presentation layer maps onto an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorPose {
    Idle,
    Walk,
    Jump,
    Attack,
    Hurt,
    Dead,
}

impl ActorPose {
    pub fn sprite_token(self) -> &'static str {
        match self {
            ActorPose::Idle => "idle",
            ActorPose::Walk => "walk",
            ActorPose::Jump => "jump",
            ActorPose::Attack => "attack",
            ActorPose::Hurt => "hurt",
            ActorPose::Dead => "dead",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderableKind {
    Placeholder,
    Sprite(String),
}

/// One actor's drawable state for the current frame, published by the
/// scene after its simulation tick. Position is the body's top-left in
/// world pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorVisual {
    pub position_px: Vec2,
    pub size_px: Vec2,
    pub facing_right: bool,
    pub pose: ActorPose,
    pub kind: RenderableKind,
    pub tint: [u8; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    LevelComplete,
    GameOver,
}

/// Mutable state shared between the active scene and the renderer:
/// camera, the level's tile grid, and the per-frame presentation
/// output. The scene writes, the renderer reads.
#[derive(Debug, Default)]
pub struct SceneWorld {
    camera: Camera,
    tile_grid: Option<TileGrid>,
    actor_visuals: Vec<ActorVisual>,
    hud: HudState,
    banner: Option<BannerKind>,
}

impl SceneWorld {
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_tile_grid(&mut self, grid: TileGrid) {
        self.tile_grid = Some(grid);
    }

    pub fn clear_tile_grid(&mut self) {
        self.tile_grid = None;
    }

    pub fn tile_grid(&self) -> Option<&TileGrid> {
        self.tile_grid.as_ref()
    }

    pub fn clear_actor_visuals(&mut self) {
        self.actor_visuals.clear();
    }

    pub fn push_actor_visual(&mut self, visual: ActorVisual) {
        self.actor_visuals.push(visual);
    }

    pub fn actor_visuals(&self) -> &[ActorVisual] {
        &self.actor_visuals
    }

    pub fn set_hud(&mut self, hud: HudState) {
        self.hud = hud;
    }

    pub fn hud(&self) -> HudState {
        self.hud
    }

    pub fn set_banner(&mut self, banner: Option<BannerKind>) {
        self.banner = banner;
    }

    pub fn banner(&self) -> Option<BannerKind> {
        self.banner
    }

    pub fn clear(&mut self) {
        self.camera = Camera::default();
        self.tile_grid = None;
        self.actor_visuals.clear();
        self.hud = HudState::default();
        self.banner = None;
    }
}

pub trait Scene {
    fn load(&mut self, world: &mut SceneWorld);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot, world: &mut SceneWorld);
    fn unload(&mut self, world: &mut SceneWorld);
    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        None
    }
}
