use crate::ExercisePattern;

/// Where patterns live between sessions.
///
/// This is the engine's entire persistence contract: list everything,
/// append one. A store is handed to whoever assembles a session; there is
/// no process-wide instance.
pub trait PatternStore {
    /// Every stored pattern, stock and user-created alike.
    fn patterns(&self) -> Vec<ExercisePattern>;

    /// Persist one newly created pattern.
    fn append(&mut self, pattern: ExercisePattern);
}

/// Pattern store backed by a plain vector, for tests and tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    patterns: Vec<ExercisePattern>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternStore for MemoryStore {
    fn patterns(&self) -> Vec<ExercisePattern> {
        self.patterns.clone()
    }

    fn append(&mut self, pattern: ExercisePattern) {
        self.patterns.push(pattern);
    }
}

/// Put the stock patterns into a store that has none yet.
///
/// Idempotent: any system-flagged pattern already present means seeding
/// has happened and the store is left alone. User patterns never block
/// seeding, and nothing here ever deletes a pattern.
pub fn seed_system_patterns(store: &mut impl PatternStore) {
    if store.patterns().iter().any(|pattern| pattern.is_system()) {
        return;
    }

    log::info!("seeding stock exercise patterns");

    store.append(ExercisePattern::squat());
    store.append(ExercisePattern::push_up());
}
