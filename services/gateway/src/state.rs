use matching_engine::MatchingEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
    pub default_depth: usize,
}

impl AppState {
    pub fn new(starting_sequence: u64, default_depth: usize) -> Self {
        Self {
            engine: Arc::new(MatchingEngine::new(starting_sequence)),
            default_depth,
        }
    }
}
