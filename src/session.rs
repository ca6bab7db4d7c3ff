// Copyright 2025 Felipe Torres González
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Conversation state.
//!
//! # Description
//!
//! Every multi-turn flow keeps the step of each peer in its own [SessionStore]. A missing entry means the peer is
//! idle for that flow; nothing is persisted, so a restart sends every peer back to idle.

use crate::gateway::Peer;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Step of the dean office lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeanStep {
    AwaitingFacultyName,
}

/// Per-peer state of a single flow.
///
/// # Description
///
/// Implementations must be safe to share between the tasks that serve concurrent updates. Calls never block
/// beyond acquiring an internal lock.
pub trait SessionStore<S>: Send + Sync {
    fn get(&self, peer: &Peer) -> Option<S>;

    fn set(&self, peer: Peer, state: S);

    /// Remove the entry of the peer. Returns the state that was removed, if any.
    fn clear(&self, peer: &Peer) -> Option<S>;

    fn contains(&self, peer: &Peer) -> bool {
        self.get(peer).is_some()
    }
}

/// [SessionStore] backed by a map guarded by a single reader/writer lock.
#[derive(Debug)]
pub struct InMemSessionStore<S> {
    sessions: RwLock<HashMap<Peer, S>>,
}

impl<S> InMemSessionStore<S> {
    pub fn new() -> Self {
        InMemSessionStore {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl<S> Default for InMemSessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync> SessionStore<S> for InMemSessionStore<S> {
    fn get(&self, peer: &Peer) -> Option<S> {
        self.sessions.read().get(peer).cloned()
    }

    fn set(&self, peer: Peer, state: S) {
        self.sessions.write().insert(peer, state);
    }

    fn clear(&self, peer: &Peer) -> Option<S> {
        self.sessions.write().remove(peer)
    }

    fn contains(&self, peer: &Peer) -> bool {
        self.sessions.read().contains_key(peer)
    }
}
