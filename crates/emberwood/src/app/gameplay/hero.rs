/// Player actor: one body plus the movement/combat/death state
/// machine. Spawn points are feet positions (bottom center).
#[derive(Debug, Clone, PartialEq)]
struct Hero {
    body: Body,
    facing_right: bool,
    health: i32,
    max_health: i32,
    attacking: bool,
    attack_timer: f32,
    invulnerability_timer: f32,
    hurt_timer: f32,
    dead: bool,
}

impl Hero {
    fn spawn(feet: Vec2) -> Self {
        Self {
            body: Body::new(
                feet.x - HERO_BODY_WIDTH_PX * 0.5,
                feet.y - HERO_BODY_HEIGHT_PX,
                HERO_BODY_WIDTH_PX,
                HERO_BODY_HEIGHT_PX,
            ),
            facing_right: true,
            health: HERO_MAX_HEALTH,
            max_health: HERO_MAX_HEALTH,
            attacking: false,
            attack_timer: 0.0,
            invulnerability_timer: 0.0,
            hurt_timer: 0.0,
            dead: false,
        }
    }

    fn update(&mut self, dt: f32, intent: InputIntent, grid: &TileGrid) {
        if self.dead {
            // Terminal state: input is ignored, the body still settles
            // under gravity.
            self.body.vx = 0.0;
            if !self.body.on_ground {
                self.body.vy += HERO_GRAVITY_PX_PER_SECOND_SQ * dt;
            }
            resolve_collision(&mut self.body, grid, dt);
            self.tick_timers(dt);
            return;
        }

        if intent.attack && !self.attacking {
            self.attacking = true;
            self.attack_timer = HERO_ATTACK_DURATION_SECONDS;
            self.body.vx = 0.0;
        }

        if self.attacking {
            self.body.vx = 0.0;
        } else {
            self.body.vx = 0.0;
            if intent.left {
                self.body.vx = -HERO_MOVE_SPEED_PX_PER_SECOND;
                self.facing_right = false;
            }
            if intent.right {
                self.body.vx = HERO_MOVE_SPEED_PX_PER_SECOND;
                self.facing_right = true;
            }
        }

        if intent.jump && self.body.on_ground {
            self.body.vy = HERO_JUMP_IMPULSE_PX_PER_SECOND;
            self.body.on_ground = false;
        }

        if !self.body.on_ground {
            self.body.vy += HERO_GRAVITY_PX_PER_SECOND_SQ * dt;
        }

        resolve_collision(&mut self.body, grid, dt);
        self.tick_timers(dt);
    }

    fn tick_timers(&mut self, dt: f32) {
        if self.attacking {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
            if self.attack_timer <= 0.0 {
                self.attacking = false;
            }
        }
        self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);
        self.hurt_timer = (self.hurt_timer - dt).max(0.0);
    }

    /// At most one health decrement per invulnerability window; hits
    /// while invulnerable or after death are defined no-ops.
    fn take_damage(&mut self, amount: i32) {
        if self.dead || self.invulnerability_timer > 0.0 {
            return;
        }
        self.health = (self.health - amount).clamp(0, self.max_health);
        self.invulnerability_timer = HERO_INVULNERABILITY_SECONDS;
        self.hurt_timer = HERO_HURT_FLASH_SECONDS;
    }

    #[allow(dead_code)]
    fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, self.max_health);
    }

    /// Health has hit zero. Distinct from the terminal transition: the
    /// controller observes this and calls [`Hero::die`].
    fn is_dead(&self) -> bool {
        self.health <= 0
    }

    fn die(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.attacking = false;
        self.body.vx = 0.0;
    }

    fn attack_box(&self) -> Option<Aabb> {
        if !self.attacking {
            return None;
        }
        let x = if self.facing_right {
            self.body.x + self.body.width
        } else {
            self.body.x - HERO_ATTACK_RANGE_PX
        };
        Some(Aabb {
            x,
            y: self.body.y + 3.0,
            width: HERO_ATTACK_RANGE_PX,
            height: self.body.height - 6.0,
        })
    }

    fn pose(&self) -> ActorPose {
        if self.dead {
            ActorPose::Dead
        } else if self.hurt_timer > 0.0 {
            ActorPose::Hurt
        } else if self.attacking {
            ActorPose::Attack
        } else if !self.body.on_ground {
            ActorPose::Jump
        } else if self.body.vx != 0.0 {
            ActorPose::Walk
        } else {
            ActorPose::Idle
        }
    }
}
