/// World-level state machine. Owns the hero, the active enemy set, and
/// the level trigger pair; drives the Playing -> LevelTransition and
/// Playing -> PlayerDead -> Respawn cycles. Actors are torn down and
/// value-reconstructed on every transition and respawn rather than
/// reset in place.
struct GameplayScene {
    catalog: LevelCatalog,
    level_index: usize,
    viewport_width_px: f32,
    hero: Option<Hero>,
    enemies: Vec<GroundEnemy>,
    triggers: Option<LevelTriggers>,
    transitioning: bool,
    transition_timer: f32,
    player_dead: bool,
    respawn_timer: f32,
    banner: Option<BannerKind>,
    events: WorldEventBus,
}

impl GameplayScene {
    fn new(catalog: LevelCatalog, start_level: usize, viewport_width_px: f32) -> Self {
        let level_count = catalog.len();
        Self {
            catalog,
            level_index: if level_count == 0 {
                0
            } else {
                start_level % level_count
            },
            viewport_width_px,
            hero: None,
            enemies: Vec::new(),
            triggers: None,
            transitioning: false,
            transition_timer: 0.0,
            player_dead: false,
            respawn_timer: 0.0,
            banner: None,
            events: WorldEventBus::default(),
        }
    }

    fn load_level(&mut self, index: usize, world: &mut SceneWorld) {
        let Some(level) = self.catalog.get(index) else {
            warn!(index, "level_missing_from_catalog");
            return;
        };
        self.level_index = index;
        world.set_tile_grid(level.grid.clone());
        self.hero = Some(Hero::spawn(level.entry.hero_spawn.to_vec2()));
        self.enemies = level
            .entry
            .enemy_spawns
            .iter()
            .map(|spawn| GroundEnemy::spawn(spawn.to_vec2()))
            .collect();
        self.triggers = Some(LevelTriggers {
            start: level.entry.start_trigger.to_aabb(),
            end: level.entry.end_trigger.to_aabb(),
        });
        self.transitioning = false;
        self.transition_timer = 0.0;
        self.player_dead = false;
        self.respawn_timer = 0.0;
        self.banner = None;
        world.camera_mut().reset();
        self.events.emit(WorldEvent::LevelStarted { level: index });
    }

    fn advance_to_next_level(&mut self, world: &mut SceneWorld) {
        let next = (self.level_index + 1) % self.catalog.len().max(1);
        world.clear_tile_grid();
        self.load_level(next, world);
    }

    /// Discard and recreate the hero and enemy set at the current
    /// level's spawn points; the tile grid stays as loaded.
    fn respawn(&mut self, world: &mut SceneWorld) {
        let Some(level) = self.catalog.get(self.level_index) else {
            return;
        };
        self.hero = Some(Hero::spawn(level.entry.hero_spawn.to_vec2()));
        self.enemies = level
            .entry
            .enemy_spawns
            .iter()
            .map(|spawn| GroundEnemy::spawn(spawn.to_vec2()))
            .collect();
        self.player_dead = false;
        self.respawn_timer = 0.0;
        self.banner = None;
        world.camera_mut().reset();
        self.events.emit(WorldEvent::Respawned);
    }

    fn tick(&mut self, dt: f32, intent: InputIntent, world: &mut SceneWorld) {
        if self.transitioning {
            self.transition_timer = (self.transition_timer - dt).max(0.0);
            if self.transition_timer <= 0.0 {
                self.advance_to_next_level(world);
            }
        } else if self.player_dead {
            // Enemies keep patrolling and the corpse keeps settling
            // while the respawn countdown runs.
            self.update_actors(dt, intent, world);
            self.respawn_timer = (self.respawn_timer - dt).max(0.0);
            if self.respawn_timer <= 0.0 {
                self.respawn(world);
            }
        } else {
            self.update_actors(dt, intent, world);
            self.check_level_complete();
            self.check_player_death(world);
            self.enemies.retain(|enemy| !enemy.is_dead());
        }

        self.publish_presentation(world);
        self.log_and_rollover_events();
    }

    fn update_actors(&mut self, dt: f32, intent: InputIntent, world: &SceneWorld) {
        let Some(grid) = world.tile_grid() else {
            return;
        };
        let Some(hero) = self.hero.as_mut() else {
            return;
        };
        hero.update(dt, intent, grid);

        // Enemies read a snapshot of the hero body; only the hero's own
        // update mutates it.
        let hero_body = hero.body;
        for enemy in &mut self.enemies {
            enemy.update(dt, &hero_body, grid);
        }

        resolve_hero_enemy_combat(hero, &mut self.enemies);
    }

    fn check_level_complete(&mut self) {
        if self.transitioning {
            return;
        }
        let Some(hero) = self.hero.as_ref() else {
            return;
        };
        let Some(triggers) = self.triggers else {
            return;
        };
        if aabb_overlap(&hero.body.aabb(), &triggers.end) {
            self.transitioning = true;
            self.transition_timer = LEVEL_BANNER_SECONDS;
            self.banner = Some(BannerKind::LevelComplete);
            self.events.emit(WorldEvent::LevelComplete {
                level: self.level_index,
            });
        }
    }

    fn check_player_death(&mut self, world: &SceneWorld) {
        if self.player_dead {
            return;
        }
        let Some(grid) = world.tile_grid() else {
            return;
        };
        let Some(hero) = self.hero.as_mut() else {
            return;
        };
        let fell = hero.body.y > grid.height_px() + FALL_DEATH_MARGIN_PX;
        if fell || hero.is_dead() {
            hero.die();
            self.player_dead = true;
            self.respawn_timer = RESPAWN_DELAY_SECONDS;
            self.banner = Some(BannerKind::GameOver);
            self.events.emit(WorldEvent::GameOver);
        }
    }

    fn publish_presentation(&self, world: &mut SceneWorld) {
        world.clear_actor_visuals();

        if let Some(triggers) = self.triggers {
            world.push_actor_visual(trigger_visual(&triggers.start));
            world.push_actor_visual(trigger_visual(&triggers.end));
        }
        for enemy in &self.enemies {
            world.push_actor_visual(actor_visual(
                &enemy.body,
                enemy.facing_right,
                enemy.pose(),
                ENEMY_SPRITE_KEY,
                ENEMY_TINT,
            ));
        }
        if let Some(hero) = self.hero.as_ref() {
            world.push_actor_visual(actor_visual(
                &hero.body,
                hero.facing_right,
                hero.pose(),
                HERO_SPRITE_KEY,
                HERO_TINT,
            ));
            world.set_hud(HudState {
                health: hero.health,
                max_health: hero.max_health,
            });

            let level_width_px = world
                .tile_grid()
                .map(|grid| grid.width_px())
                .unwrap_or(self.viewport_width_px);
            let hero_center_x = hero.body.center_x();
            world
                .camera_mut()
                .follow(hero_center_x, self.viewport_width_px, level_width_px);
        }

        world.set_banner(self.banner);
    }

    fn log_and_rollover_events(&mut self) {
        for event in self.events.iter_emitted_so_far() {
            match *event {
                WorldEvent::LevelStarted { level } => info!(level, "level_started"),
                WorldEvent::LevelComplete { level } => info!(level, "level_complete"),
                WorldEvent::GameOver => info!("game_over"),
                WorldEvent::Respawned => info!("respawned"),
            }
        }
        self.events.finish_tick_rollover();
        let counts = self.events.last_tick_counts();
        if counts.total > 0 {
            debug!(total = counts.total, "world_events_emitted");
        }
    }
}
