/// Held-button snapshot the simulation consumes each tick. No edge
/// semantics at this boundary; the input collector owns those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct InputIntent {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
}

impl InputIntent {
    fn from_snapshot(snapshot: &InputSnapshot) -> Self {
        Self {
            left: snapshot.is_down(InputAction::MoveLeft),
            right: snapshot.is_down(InputAction::MoveRight),
            jump: snapshot.is_down(InputAction::Jump),
            attack: snapshot.is_down(InputAction::Attack),
        }
    }
}

/// Start/end zone pair for one level, discarded and recreated on every
/// level transition.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LevelTriggers {
    start: Aabb,
    end: Aabb,
}

/// One-shot notifications the presentation layer consumes; the
/// simulation never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldEvent {
    LevelStarted { level: usize },
    LevelComplete { level: usize },
    GameOver,
    Respawned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldEventKind {
    LevelStarted,
    LevelComplete,
    GameOver,
    Respawned,
}

impl WorldEvent {
    fn kind(self) -> WorldEventKind {
        match self {
            Self::LevelStarted { .. } => WorldEventKind::LevelStarted,
            Self::LevelComplete { .. } => WorldEventKind::LevelComplete,
            Self::GameOver => WorldEventKind::GameOver,
            Self::Respawned => WorldEventKind::Respawned,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WorldEventCounts {
    total: u32,
    level_started: u32,
    level_complete: u32,
    game_over: u32,
    respawned: u32,
}

impl WorldEventCounts {
    fn record(&mut self, kind: WorldEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            WorldEventKind::LevelStarted => {
                self.level_started = self.level_started.saturating_add(1)
            }
            WorldEventKind::LevelComplete => {
                self.level_complete = self.level_complete.saturating_add(1)
            }
            WorldEventKind::GameOver => self.game_over = self.game_over.saturating_add(1),
            WorldEventKind::Respawned => self.respawned = self.respawned.saturating_add(1),
        }
    }
}

#[derive(Default)]
struct WorldEventBus {
    current_tick_events: Vec<WorldEvent>,
    last_tick_counts: WorldEventCounts,
}

impl WorldEventBus {
    fn emit(&mut self, event: WorldEvent) {
        self.current_tick_events.push(event);
    }

    fn iter_emitted_so_far(&self) -> impl Iterator<Item = &WorldEvent> {
        self.current_tick_events.iter()
    }

    fn finish_tick_rollover(&mut self) {
        let mut counts = WorldEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(event.kind());
        }
        self.last_tick_counts = counts;
        self.current_tick_events.clear();
    }

    fn last_tick_counts(&self) -> WorldEventCounts {
        self.last_tick_counts
    }
}
