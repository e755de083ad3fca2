/// Patrolling melee enemy: walks in its facing direction, turns at
/// platform edges, and lunges when the hero is close on the faced
/// side. Spawn points are feet positions, like the hero's.
#[derive(Debug, Clone, PartialEq)]
struct GroundEnemy {
    body: Body,
    facing_right: bool,
    health: i32,
    attacking: bool,
    attack_timer: f32,
    cooldown_timer: f32,
}

impl GroundEnemy {
    fn spawn(feet: Vec2) -> Self {
        Self {
            body: Body::new(
                feet.x - ENEMY_BODY_WIDTH_PX * 0.5,
                feet.y - ENEMY_BODY_HEIGHT_PX,
                ENEMY_BODY_WIDTH_PX,
                ENEMY_BODY_HEIGHT_PX,
            ),
            facing_right: false,
            health: ENEMY_MAX_HEALTH,
            attacking: false,
            attack_timer: 0.0,
            cooldown_timer: 0.0,
        }
    }

    fn update(&mut self, dt: f32, hero_body: &Body, grid: &TileGrid) {
        if self.is_dead() {
            return;
        }

        if self.attacking {
            self.attack_timer -= dt;
            if self.attack_timer <= 0.0 {
                self.attacking = false;
                self.attack_timer = 0.0;
            }
        } else {
            let distance = hero_body.x - self.body.x;
            if distance.abs() < ENEMY_AGGRO_DISTANCE_PX
                && self.cooldown_timer <= 0.0
                && self.hero_in_front(hero_body)
            {
                self.start_attack();
            }
        }

        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);

        self.body.vx = if self.attacking {
            0.0
        } else if self.facing_right {
            ENEMY_MOVE_SPEED_PX_PER_SECOND
        } else {
            -ENEMY_MOVE_SPEED_PX_PER_SECOND
        };
        self.body.vy += ENEMY_GRAVITY_PX_PER_SECOND_SQ * dt;

        resolve_collision(&mut self.body, grid, dt);

        // Turn before walking off the platform edge.
        if self.body.on_ground {
            let probe_x = if self.facing_right {
                self.body.x + self.body.width + EDGE_PROBE_AHEAD_PX
            } else {
                self.body.x - EDGE_PROBE_AHEAD_PX
            };
            let probe_y = self.body.y + self.body.height + EDGE_PROBE_AHEAD_PX;
            if !grid.is_solid_at_world(probe_x, probe_y) {
                self.facing_right = !self.facing_right;
            }
        }
    }

    fn hero_in_front(&self, hero_body: &Body) -> bool {
        if self.facing_right {
            hero_body.center_x() > self.body.center_x()
        } else {
            hero_body.center_x() < self.body.center_x()
        }
    }

    fn start_attack(&mut self) {
        if self.attacking {
            return;
        }
        self.attacking = true;
        self.attack_timer = ENEMY_ATTACK_DURATION_SECONDS;
        self.cooldown_timer = ENEMY_ATTACK_COOLDOWN_SECONDS;
    }

    fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Dead enemies stop updating and are pruned from the active set
    /// by the level controller at the end of the tick.
    fn is_dead(&self) -> bool {
        self.health <= 0
    }

    fn attack_box(&self) -> Option<Aabb> {
        if !self.attacking {
            return None;
        }
        let x = if self.facing_right {
            self.body.x + self.body.width
        } else {
            self.body.x - ENEMY_ATTACK_RANGE_PX
        };
        Some(Aabb {
            x,
            y: self.body.y + 4.0,
            width: ENEMY_ATTACK_RANGE_PX,
            height: self.body.height - 8.0,
        })
    }

    fn pose(&self) -> ActorPose {
        if self.is_dead() {
            ActorPose::Dead
        } else if self.attacking {
            ActorPose::Attack
        } else if self.body.vx != 0.0 {
            ActorPose::Walk
        } else {
            ActorPose::Idle
        }
    }
}
