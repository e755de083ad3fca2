fn actor_visual(
    body: &Body,
    facing_right: bool,
    pose: ActorPose,
    sprite_key: &str,
    tint: [u8; 4],
) -> ActorVisual {
    ActorVisual {
        position_px: Vec2 {
            x: body.x,
            y: body.y,
        },
        size_px: Vec2 {
            x: body.width,
            y: body.height,
        },
        facing_right,
        pose,
        kind: RenderableKind::Sprite(sprite_key.to_string()),
        tint,
    }
}

fn trigger_visual(zone: &Aabb) -> ActorVisual {
    ActorVisual {
        position_px: Vec2 {
            x: zone.x,
            y: zone.y,
        },
        size_px: Vec2 {
            x: zone.width,
            y: zone.height,
        },
        facing_right: true,
        pose: ActorPose::Idle,
        kind: RenderableKind::Sprite(TRIGGER_SPRITE_KEY.to_string()),
        tint: TRIGGER_TINT,
    }
}
