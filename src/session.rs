//! State that lives for one graph construction run.

use std::collections::HashSet;

/// Interaction ids already consumed during the current run.
///
/// IntAct reports the same interaction under both partners, so an id must stay
/// excluded across every builder call of the run, not just within one call.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    seen_interactions: HashSet<String>,
    seen_binary_interactions: HashSet<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`, returning `false` if it was already seen in this run.
    pub fn first_interaction(&mut self, id: &str) -> bool {
        self.seen_interactions.insert(id.to_string())
    }

    /// Same as [`first_interaction`](Self::first_interaction) for compound-centric binary interaction ids.
    pub fn first_binary_interaction(&mut self, id: &str) -> bool {
        self.seen_binary_interactions.insert(id.to_string())
    }

    pub fn reset(&mut self) {
        self.seen_interactions.clear();
        self.seen_binary_interactions.clear();
    }
}
