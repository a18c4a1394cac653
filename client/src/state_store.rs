//! State persistence port. The embedder's address bar stands behind this
//! boundary; tests and server-side callers use the in-memory store.

use std::sync::RwLock;

use common::search_state::SearchState;


pub trait StateStore: Send + Sync {
    fn read(&self) -> SearchState;
    fn write(&self, state: SearchState);
}


#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    state: RwLock<SearchState>,
}

impl InMemoryStateStore {
    pub fn new(state: SearchState) -> Self {
        Self { state: RwLock::new(state) }
    }
}

impl StateStore for InMemoryStateStore {
    fn read(&self) -> SearchState {
        self.state.read().expect("state lock poisoned").clone()
    }

    fn write(&self, state: SearchState) {
        *self.state.write().expect("state lock poisoned") = state;
    }
}
