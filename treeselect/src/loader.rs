//! Asynchronous data loading.
//!
//! Loads are tracked as keyed pending requests. A key that is already in
//! flight is never issued twice, and a result is only merged if its ticket
//! still matches the pending entry when it resolves: resetting the tree bumps
//! the generation, so anything issued before the reset is dropped silently.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::node::TreeNodeData;

/// Loader collaborator supplying nodes on demand.
#[async_trait]
pub trait TreeLoader: Send + Sync {
    /// Load the next page of top-level nodes, appended to the forest.
    async fn load_data(&self) -> Result<Vec<TreeNodeData>, LoadError> {
        Ok(Vec::new())
    }

    /// Load the children of a node, installed as its children.
    async fn load_children(&self, id: &str) -> Result<Vec<TreeNodeData>, LoadError> {
        let _ = id;
        Ok(Vec::new())
    }
}

/// What a pending load will be merged into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadKey {
    /// Children of the node with this id.
    Children(String),
    /// Page of top-level nodes with this index.
    Page(usize),
}

/// Handle for one issued load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub key: LoadKey,
    generation: u64,
}

/// In-flight loads keyed by what they load.
#[derive(Debug, Default)]
pub struct PendingLoads {
    tasks: HashMap<LoadKey, u64>,
    generation: u64,
    /// Issued tickets nobody has started yet.
    queued: Vec<LoadTicket>,
}

impl PendingLoads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a load for `key`. Returns `None` if one is already in flight.
    pub fn begin(&mut self, key: LoadKey) -> Option<LoadTicket> {
        if self.tasks.contains_key(&key) {
            log::debug!("Load {:?} already in flight", key);
            return None;
        }
        self.tasks.insert(key.clone(), self.generation);
        Some(LoadTicket {
            key,
            generation: self.generation,
        })
    }

    /// Register a load and queue it for the next drive.
    pub fn enqueue(&mut self, key: LoadKey) -> bool {
        match self.begin(key) {
            Some(ticket) => {
                self.queued.push(ticket);
                true
            }
            None => false,
        }
    }

    /// Take every queued ticket.
    pub fn take_queued(&mut self) -> Vec<LoadTicket> {
        std::mem::take(&mut self.queued)
    }

    /// Settle a ticket. Returns whether it was still current.
    pub fn finish(&mut self, ticket: &LoadTicket) -> bool {
        match self.tasks.get(&ticket.key) {
            Some(&generation) if generation == ticket.generation => {
                self.tasks.remove(&ticket.key);
                true
            }
            _ => false,
        }
    }

    /// Whether a load for `key` is in flight.
    pub fn is_pending(&self, key: &LoadKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// Number of loads in flight.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Invalidate everything in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.tasks.clear();
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_not_issued_twice() {
        let mut pending = PendingLoads::new();
        assert!(pending.begin(LoadKey::Children("a".into())).is_some());
        assert!(pending.begin(LoadKey::Children("a".into())).is_none());
        assert!(pending.begin(LoadKey::Children("b".into())).is_some());
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_finish_clears_key() {
        let mut pending = PendingLoads::new();
        let ticket = pending.begin(LoadKey::Page(0)).unwrap();
        assert!(pending.finish(&ticket));
        assert!(!pending.finish(&ticket));
        assert!(pending.begin(LoadKey::Page(0)).is_some());
    }

    #[test]
    fn test_reset_makes_tickets_stale() {
        let mut pending = PendingLoads::new();
        let old = pending.begin(LoadKey::Children("a".into())).unwrap();
        pending.reset();
        let new = pending.begin(LoadKey::Children("a".into())).unwrap();
        assert!(!pending.finish(&old));
        assert!(pending.is_pending(&LoadKey::Children("a".into())));
        assert!(pending.finish(&new));
    }

    #[test]
    fn test_enqueue_and_take() {
        let mut pending = PendingLoads::new();
        assert!(pending.enqueue(LoadKey::Children("a".into())));
        assert!(!pending.enqueue(LoadKey::Children("a".into())));
        let queued = pending.take_queued();
        assert_eq!(queued.len(), 1);
        assert!(pending.take_queued().is_empty());
        assert!(pending.is_pending(&LoadKey::Children("a".into())));
    }
}
