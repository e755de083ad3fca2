/// Hero-versus-enemy interaction for one tick: attack hitboxes first,
/// then plain body separation for live, non-attacking pairs. Stateless
/// across ticks; hero invulnerability is enforced by the hero itself.
fn resolve_hero_enemy_combat(hero: &mut Hero, enemies: &mut [GroundEnemy]) {
    for enemy in enemies.iter_mut() {
        if enemy.is_dead() {
            continue;
        }

        if let Some(strike) = hero.attack_box() {
            if aabb_overlap(&strike, &enemy.body.aabb()) {
                enemy.take_damage(1);
            }
        }
        if let Some(strike) = enemy.attack_box() {
            if aabb_overlap(&strike, &hero.body.aabb()) {
                hero.take_damage(1);
            }
        }

        if enemy.is_dead() {
            continue;
        }
        if !hero.attacking
            && !enemy.attacking
            && aabb_overlap(&hero.body.aabb(), &enemy.body.aabb())
        {
            // Minimal horizontal separation: move the hero to the near
            // edge of the enemy box on whichever side its center is.
            if hero.body.center_x() < enemy.body.center_x() {
                hero.body.x = enemy.body.x - hero.body.width;
            } else {
                hero.body.x = enemy.body.x + enemy.body.width;
            }
        }
    }
}
