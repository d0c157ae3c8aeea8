use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::effects::{self, Effect};
use crate::store::Store;
use linkgraph::{RandomSource, seeded_source, thread_source};

pub struct State {
    pub store: Store,
    pub cache: Cache,
    random: Box<dyn RandomSource>,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    /// Randomness comes from the configured seed, or the thread
    /// generator when none is set.
    pub fn new(store: Store) -> Self {
        let random: Box<dyn RandomSource> = match store.settings.seed {
            Some(seed) => Box::new(seeded_source(seed)),
            None => Box::new(thread_source()),
        };
        Self::with_random(store, random)
    }

    pub fn with_random(store: Store, random: Box<dyn RandomSource>) -> Self {
        Self {
            store,
            cache: Cache::new(),
            random,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.store, effect, self.random.as_mut());
        }
    }

    pub fn flush(&mut self) {
        self.flush_actions();
        self.flush_effects();
    }
}
