impl Scene for GameplayScene {
    fn load(&mut self, world: &mut SceneWorld) {
        let start = self.level_index;
        self.load_level(start, world);
        info!(level = self.level_index, "scene_loaded");
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot, world: &mut SceneWorld) {
        let intent = InputIntent::from_snapshot(input);
        self.tick(fixed_dt_seconds, intent, world);
    }

    fn unload(&mut self, world: &mut SceneWorld) {
        info!(level = self.level_index, "scene_unload");
        self.hero = None;
        self.enemies.clear();
        self.triggers = None;
        self.transitioning = false;
        self.transition_timer = 0.0;
        self.player_dead = false;
        self.respawn_timer = 0.0;
        self.banner = None;
        self.events = WorldEventBus::default();
        world.clear();
    }

    fn debug_title(&self, _world: &SceneWorld) -> Option<String> {
        let hero = self.hero.as_ref()?;
        Some(format!(
            "Emberwood | Level {} | Hero ({:.0}, {:.0}) | HP {}/{} | Enemies {}",
            self.level_index + 1,
            hero.body.x,
            hero.body.y,
            hero.health,
            hero.max_health,
            self.enemies.len()
        ))
    }
}
