//! Shared, replaceable document model
//!
//! Readers take cheap [`Arc`] snapshots; a reparse swaps the whole model and
//! edits go through a single writer. Snapshots taken before a swap or edit
//! keep seeing the model they were taken from.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::parser::{ParseOptions, RobotParser};
use crate::syntax::{RobotFile, dump};

#[derive(Debug)]
struct Slot {
    model: Arc<RobotFile>,
    generation: u64,
}

/// A document model shared between consumers
#[derive(Debug)]
pub struct DocumentHandle {
    slot: RwLock<Slot>,
}

impl DocumentHandle {
    pub fn new(model: RobotFile) -> Self {
        Self {
            slot: RwLock::new(Slot {
                model: Arc::new(model),
                generation: 0,
            }),
        }
    }

    /// Current model
    pub fn snapshot(&self) -> Arc<RobotFile> {
        Arc::clone(&self.slot.read().model)
    }

    /// Incremented on every replacement and edit
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Replace the whole model, returning the previous one
    pub fn on_reparsed(&self, model: RobotFile) -> Arc<RobotFile> {
        let mut slot = self.slot.write();
        slot.generation += 1;
        debug!(generation = slot.generation, "document replaced");
        std::mem::replace(&mut slot.model, Arc::new(model))
    }

    /// Parse `source` again and install the result
    pub fn reparse(&self, source: &str, options: &ParseOptions) -> Arc<RobotFile> {
        let path = self.snapshot().path().map(|p| p.to_path_buf());
        let model = RobotParser::new(options.clone()).parse_str(source, path.as_deref());
        self.on_reparsed(model);
        self.snapshot()
    }

    /// Mutate the model under the write lock; outstanding snapshots are unaffected
    pub fn edit<R>(&self, f: impl FnOnce(&mut RobotFile) -> R) -> R {
        let mut slot = self.slot.write();
        slot.generation += 1;
        f(Arc::make_mut(&mut slot.model))
    }

    /// Text of the current model
    pub fn dump(&self) -> String {
        dump(&self.snapshot())
    }
}
