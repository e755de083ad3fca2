use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use pixels::{Error, Pixels, SurfaceTexture};
use tracing::warn;
use winit::window::Window;

use crate::app::{
    ActorPose, ActorVisual, BannerKind, Camera, HudState, RenderableKind, SceneWorld, TileGrid,
};

use super::transform::world_to_screen_px;
use super::Viewport;

const CLEAR_COLOR: [u8; 4] = [30, 44, 56, 255];
const TILE_FALLBACK_COLOR: [u8; 4] = [86, 70, 52, 255];
const TILE_FALLBACK_TOP_COLOR: [u8; 4] = [110, 134, 66, 255];
const HURT_FLASH_COLOR: [u8; 4] = [240, 240, 240, 255];
const FACING_NOTCH_HALF_PX: i32 = 2;
const HEART_SIZE_PX: i32 = 12;
const HEART_GAP_PX: i32 = 6;
const HEART_ORIGIN_PX: (i32, i32) = (12, 12);
const HEART_FULL_COLOR: [u8; 4] = [214, 58, 58, 255];
const HEART_HALF_COLOR: [u8; 4] = [214, 130, 58, 255];
const HEART_EMPTY_COLOR: [u8; 4] = [68, 62, 62, 255];
const BANNER_BACKDROP_COLOR: [u8; 4] = [10, 10, 14, 180];
const BANNER_COMPLETE_COLOR: [u8; 4] = [232, 186, 72, 255];
const BANNER_GAME_OVER_COLOR: [u8; 4] = [186, 40, 40, 255];
const BANNER_HEIGHT_PX: i32 = 56;
const BANNER_BAR_HEIGHT_PX: i32 = 8;

/// Background layers scrolled at a fraction of the camera offset, far
/// to near. Each entry: scroll factor, stripe stride, band color.
const PARALLAX_LAYERS: [(f32, i32, [u8; 4]); 3] = [
    (0.2, 96, [38, 56, 66, 255]),
    (0.5, 64, [34, 50, 58, 255]),
    (0.8, 48, [28, 40, 46, 255]),
];

struct LoadedSprite {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
    asset_root: PathBuf,
    sprite_cache: HashMap<String, Option<LoadedSprite>>,
    warned_missing_sprite_keys: HashSet<String>,
}

impl Renderer {
    pub fn new(window: Arc<Window>, asset_root: PathBuf) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
            asset_root,
            sprite_cache: HashMap::new(),
            warned_missing_sprite_keys: HashSet::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_world(&mut self, world: &SceneWorld) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        // Resolve every sprite key this frame may touch before any
        // drawing, so the frame pass can borrow the cache immutably.
        self.ensure_sprite_loaded("tiles/solid");
        let mut keys = Vec::new();
        for visual in world.actor_visuals() {
            if let RenderableKind::Sprite(base) = &visual.kind {
                keys.push(format!("{base}/{}", visual.pose.sprite_token()));
                keys.push(base.clone());
            }
        }
        for key in keys {
            self.ensure_sprite_loaded(&key);
        }

        let Renderer {
            pixels,
            viewport,
            sprite_cache,
            ..
        } = self;
        let width = viewport.width;
        let height = viewport.height;
        let frame = pixels.frame_mut();

        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }
        draw_parallax_background(frame, width, height, world.camera());
        if let Some(grid) = world.tile_grid() {
            let tile_sprite = cached_sprite(sprite_cache, "tiles/solid");
            draw_tile_grid(frame, width, height, world.camera(), grid, tile_sprite);
        }
        for visual in world.actor_visuals() {
            draw_actor(frame, width, height, world.camera(), visual, sprite_cache);
        }
        draw_hud_hearts(frame, width, height, world.hud());
        if let Some(banner) = world.banner() {
            draw_banner(frame, width, height, banner);
        }

        pixels.render()
    }

    fn ensure_sprite_loaded(&mut self, key: &str) {
        if self.sprite_cache.contains_key(key) {
            return;
        }
        let loaded = load_sprite(&self.asset_root, key);
        if loaded.is_none() && self.warned_missing_sprite_keys.insert(key.to_string()) {
            warn!(sprite_key = key, "sprite missing; using placeholder");
        }
        self.sprite_cache.insert(key.to_string(), loaded);
    }
}

fn cached_sprite<'a>(
    cache: &'a HashMap<String, Option<LoadedSprite>>,
    key: &str,
) -> Option<&'a LoadedSprite> {
    cache.get(key).and_then(|entry| entry.as_ref())
}

fn load_sprite(asset_root: &Path, key: &str) -> Option<LoadedSprite> {
    let path = asset_root.join("sprites").join(format!("{key}.png"));
    let image = ImageReader::open(&path).ok()?.decode().ok()?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(LoadedSprite {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn draw_parallax_background(frame: &mut [u8], width: u32, height: u32, camera: &Camera) {
    let band_height = (height as i32 / 2) / PARALLAX_LAYERS.len() as i32;
    for (layer_index, (factor, stride, color)) in PARALLAX_LAYERS.iter().enumerate() {
        let band_top = layer_index as i32 * band_height;
        let band_bottom = band_top + band_height;
        let scroll = (camera.offset_x * factor) as i32;
        let stripe_width = stride / 3;
        let offset = scroll.rem_euclid(*stride);

        let mut x = -offset;
        while x < width as i32 {
            fill_rect(
                frame,
                width,
                height,
                x,
                band_top,
                stripe_width,
                band_bottom - band_top,
                *color,
            );
            x += stride;
        }
    }
}

fn draw_tile_grid(
    frame: &mut [u8],
    width: u32,
    height: u32,
    camera: &Camera,
    grid: &TileGrid,
    tile_sprite: Option<&LoadedSprite>,
) {
    let tile_w = grid.tile_width() as i32;
    let tile_h = grid.tile_height() as i32;
    let first_column = (camera.offset_x / tile_w as f32).floor() as i64;
    let last_column = ((camera.offset_x + width as f32) / tile_w as f32).floor() as i64;

    for tile_y in 0..grid.height() as i64 {
        for tile_x in first_column..=last_column {
            if !grid.is_solid_tile(tile_x, tile_y) {
                continue;
            }
            let sx = (tile_x as f32 * tile_w as f32 - camera.offset_x).round() as i32;
            let sy = tile_y as i32 * tile_h;
            match tile_sprite {
                Some(sprite) => blit_sprite(frame, width, height, sx, sy, sprite, false),
                None => {
                    fill_rect(frame, width, height, sx, sy, tile_w, tile_h, TILE_FALLBACK_COLOR);
                    fill_rect(frame, width, height, sx, sy, tile_w, 3, TILE_FALLBACK_TOP_COLOR);
                }
            }
        }
    }
}

fn draw_actor(
    frame: &mut [u8],
    width: u32,
    height: u32,
    camera: &Camera,
    visual: &ActorVisual,
    sprite_cache: &HashMap<String, Option<LoadedSprite>>,
) {
    let (sx, sy) = world_to_screen_px(camera, visual.position_px);
    let body_w = visual.size_px.x.round() as i32;
    let body_h = visual.size_px.y.round() as i32;

    if let RenderableKind::Sprite(base) = &visual.kind {
        let pose_key = format!("{base}/{}", visual.pose.sprite_token());
        let sprite = cached_sprite(sprite_cache, &pose_key).or_else(|| cached_sprite(sprite_cache, base));
        if let Some(sprite) = sprite {
            // Sprite frames anchor at the body's bottom center.
            let draw_x = sx + body_w / 2 - sprite.width as i32 / 2;
            let draw_y = sy + body_h - sprite.height as i32;
            blit_sprite(frame, width, height, draw_x, draw_y, sprite, !visual.facing_right);
            return;
        }
    }

    let tint = match visual.pose {
        ActorPose::Hurt => HURT_FLASH_COLOR,
        ActorPose::Dead => {
            let [r, g, b, a] = visual.tint;
            [r / 3, g / 3, b / 3, a]
        }
        _ => visual.tint,
    };
    fill_rect(frame, width, height, sx, sy, body_w, body_h, tint);

    // Facing notch on the leading edge, mid-height.
    let notch_x = if visual.facing_right {
        sx + body_w - FACING_NOTCH_HALF_PX
    } else {
        sx - FACING_NOTCH_HALF_PX
    };
    let notch_y = sy + body_h / 2 - FACING_NOTCH_HALF_PX;
    fill_rect(
        frame,
        width,
        height,
        notch_x,
        notch_y,
        FACING_NOTCH_HALF_PX * 2,
        FACING_NOTCH_HALF_PX * 2,
        [250, 250, 250, 255],
    );
}

fn draw_hud_hearts(frame: &mut [u8], width: u32, height: u32, hud: HudState) {
    if hud.max_health <= 0 {
        return;
    }
    // One heart represents 2 hp: full, half, or empty.
    let hearts = (hud.max_health + 1) / 2;
    for heart_index in 0..hearts {
        let heart_hp = hud.health - heart_index * 2;
        let color = if heart_hp >= 2 {
            HEART_FULL_COLOR
        } else if heart_hp == 1 {
            HEART_HALF_COLOR
        } else {
            HEART_EMPTY_COLOR
        };
        let x = HEART_ORIGIN_PX.0 + heart_index * (HEART_SIZE_PX + HEART_GAP_PX);
        fill_rect(
            frame,
            width,
            height,
            x,
            HEART_ORIGIN_PX.1,
            HEART_SIZE_PX,
            HEART_SIZE_PX,
            color,
        );
    }
}

fn draw_banner(frame: &mut [u8], width: u32, height: u32, banner: BannerKind) {
    let top = height as i32 / 2 - BANNER_HEIGHT_PX / 2;
    fill_rect(
        frame,
        width,
        height,
        0,
        top,
        width as i32,
        BANNER_HEIGHT_PX,
        BANNER_BACKDROP_COLOR,
    );
    let bar_color = match banner {
        BannerKind::LevelComplete => BANNER_COMPLETE_COLOR,
        BannerKind::GameOver => BANNER_GAME_OVER_COLOR,
    };
    let bar_width = width as i32 / 3;
    fill_rect(
        frame,
        width,
        height,
        (width as i32 - bar_width) / 2,
        top + BANNER_HEIGHT_PX / 2 - BANNER_BAR_HEIGHT_PX / 2,
        bar_width,
        BANNER_BAR_HEIGHT_PX,
        bar_color,
    );
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: [u8; 4],
) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + rect_width).min(width as i32);
    let y1 = (y + rect_height).min(height as i32);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for row in y0..y1 {
        for column in x0..x1 {
            let index = (row as usize * width as usize + column as usize) * 4;
            blend_pixel(&mut frame[index..index + 4], color);
        }
    }
}

fn blit_sprite(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    sprite: &LoadedSprite,
    flip_x: bool,
) {
    for row in 0..sprite.height as i32 {
        let dest_y = y + row;
        if dest_y < 0 || dest_y >= height as i32 {
            continue;
        }
        for column in 0..sprite.width as i32 {
            let dest_x = x + column;
            if dest_x < 0 || dest_x >= width as i32 {
                continue;
            }
            let source_column = if flip_x {
                sprite.width as i32 - 1 - column
            } else {
                column
            };
            let source_index =
                (row as usize * sprite.width as usize + source_column as usize) * 4;
            let color = [
                sprite.rgba[source_index],
                sprite.rgba[source_index + 1],
                sprite.rgba[source_index + 2],
                sprite.rgba[source_index + 3],
            ];
            let dest_index = (dest_y as usize * width as usize + dest_x as usize) * 4;
            blend_pixel(&mut frame[dest_index..dest_index + 4], color);
        }
    }
}

fn blend_pixel(dest: &mut [u8], color: [u8; 4]) {
    let alpha = color[3] as u32;
    if alpha == 0 {
        return;
    }
    if alpha == 255 {
        dest.copy_from_slice(&color);
        return;
    }
    let inverse = 255 - alpha;
    for channel in 0..3 {
        let blended = (color[channel] as u32 * alpha + dest[channel] as u32 * inverse) / 255;
        dest[channel] = blended as u8;
    }
    dest[3] = 255;
}
