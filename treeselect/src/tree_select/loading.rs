//! Loader plumbing: issuing, driving and merging keyed loads.

use futures::future::join_all;

use crate::error::LoadError;
use crate::loader::{LoadKey, LoadTicket};
use crate::node::TreeNodeData;

use super::TreeSelect;

impl TreeSelect {
    /// Issue a load for the next page of top-level nodes.
    ///
    /// Returns `None` while that page is already in flight.
    pub fn begin_page_load(&mut self) -> Option<LoadTicket> {
        self.pending.begin(LoadKey::Page(self.pages_loaded))
    }

    /// Issue a load for the children of a node.
    ///
    /// Returns `None` for unknown nodes, nodes without pending children, and
    /// nodes whose children are already in flight.
    pub fn begin_children_load(&mut self, id: &str) -> Option<LoadTicket> {
        if !self.registry.get(id)?.needs_children() {
            return None;
        }
        self.pending.begin(LoadKey::Children(id.to_string()))
    }

    /// Whether anything is in flight.
    pub fn has_pending_loads(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Merge the result of an issued load.
    ///
    /// Returns `Ok(false)` when the result was discarded because the tree was
    /// reset or the node removed since the load was issued. Loader errors are
    /// returned as-is; expansion is left exactly as it was toggled.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TreeNodeData>, LoadError>,
    ) -> Result<bool, LoadError> {
        if !self.pending.finish(&ticket) {
            log::debug!("Discarding stale load {:?}", ticket.key);
            return Ok(false);
        }
        let nodes = result?;

        match &ticket.key {
            LoadKey::Page(index) => {
                log::debug!("Appending page {} ({} nodes)", index, nodes.len());
                self.data.extend(nodes);
                self.pages_loaded = index + 1;
            }
            LoadKey::Children(id) => {
                if !self.registry.contains(id) {
                    log::debug!("Discarding children of removed node '{}'", id);
                    return Ok(false);
                }
                let Some(record) = find_record_mut(&mut self.data, id) else {
                    return Ok(false);
                };
                log::debug!("Installing {} children under '{}'", nodes.len(), id);
                record.children = nodes;
            }
        }

        self.rebuild();
        Ok(true)
    }

    /// Load the next page through the loader and append it.
    pub async fn load_data(&mut self) -> Result<(), LoadError> {
        let Some(loader) = self.loader.clone() else {
            return Ok(());
        };
        let Some(ticket) = self.begin_page_load() else {
            return Ok(());
        };
        let result = loader.load_data().await;
        self.finish_load(ticket, result).map(|_| ())
    }

    /// Load the children of a node through the loader and install them.
    pub async fn load_children(&mut self, id: &str) -> Result<(), LoadError> {
        let Some(loader) = self.loader.clone() else {
            return Ok(());
        };
        let Some(ticket) = self.begin_children_load(id) else {
            return Ok(());
        };
        let result = loader.load_children(id).await;
        self.finish_load(ticket, result).map(|_| ())
    }

    /// Run every load queued by expansion, concurrently, then merge each.
    ///
    /// All results are merged before the first error (if any) is returned.
    pub async fn process_loads(&mut self) -> Result<(), LoadError> {
        let Some(loader) = self.loader.clone() else {
            return Ok(());
        };
        let tickets = self.pending.take_queued();
        if tickets.is_empty() {
            return Ok(());
        }

        let results = join_all(tickets.iter().map(|ticket| {
            let loader = &loader;
            async move {
                match &ticket.key {
                    LoadKey::Children(id) => loader.load_children(id).await,
                    LoadKey::Page(_) => loader.load_data().await,
                }
            }
        }))
        .await;

        let mut first_error = None;
        for (ticket, result) in tickets.into_iter().zip(results) {
            if let Err(err) = self.finish_load(ticket, result) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn find_record_mut<'a>(records: &'a mut [TreeNodeData], id: &str) -> Option<&'a mut TreeNodeData> {
    for record in records {
        if record.id == id {
            return Some(record);
        }
        if let Some(found) = find_record_mut(&mut record.children, id) {
            return Some(found);
        }
    }
    None
}
