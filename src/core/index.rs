//! Purpose: Map a layer-wide feature id onto (module, local record) pairs.
//! Exports: `LayerIndex`, `ReadCursor`.
//! Role: Lets a layer present many per-module files as one feature sequence.
//! Invariants: `offsets[i]` is the sum of `counts[..i]` once rebuilt.
//! Invariants: Modules are only appended; a push leaves the table stale until `rebuild`.
//! Invariants: The cursor walks counts directly and never needs the offset table.

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug)]
pub struct LayerIndex {
    counts: Vec<u64>,
    offsets: Vec<u64>,
    built: bool,
}

impl LayerIndex {
    pub fn new() -> Self {
        Self {
            counts: Vec::new(),
            offsets: Vec::new(),
            built: true,
        }
    }

    pub fn from_counts(counts: impl IntoIterator<Item = u64>) -> Self {
        let mut index = Self::new();
        for count in counts {
            index.push_module(count);
        }
        index.rebuild();
        index
    }

    pub fn push_module(&mut self, count: u64) {
        self.counts.push(count);
        self.built = false;
    }

    pub fn rebuild(&mut self) {
        self.offsets.clear();
        let mut total = 0u64;
        for count in &self.counts {
            self.offsets.push(total);
            total += count;
        }
        self.built = true;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn module_count(&self) -> usize {
        self.counts.len()
    }

    pub fn module_feature_count(&self, module: usize) -> Option<u64> {
        self.counts.get(module).copied()
    }

    pub fn total_feature_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn global_to_local(&self, fid: u64) -> Result<(usize, u64), Error> {
        self.ensure_built()?;
        let total = self.total_feature_count();
        if fid >= total {
            return Err(Error::new(ErrorKind::OutOfRange)
                .with_message(format!("feature id {fid} past end of layer ({total} features)"))
                .with_record(fid));
        }
        // Empty modules share their successor's offset; the last match is the non-empty one.
        let module = self.offsets.partition_point(|offset| *offset <= fid) - 1;
        Ok((module, fid - self.offsets[module]))
    }

    pub fn local_to_global(&self, module: usize, local: u64) -> Result<u64, Error> {
        self.ensure_built()?;
        match self.counts.get(module) {
            Some(count) if local < *count => Ok(self.offsets[module] + local),
            _ => Err(Error::new(ErrorKind::OutOfRange)
                .with_message(format!("no record {local} in module {module}"))
                .with_record(local)),
        }
    }

    fn ensure_built(&self) -> Result<(), Error> {
        if self.built {
            return Ok(());
        }
        Err(Error::new(ErrorKind::Internal)
            .with_message("layer index queried before rebuild")
            .with_hint("Call rebuild() after adding modules."))
    }
}

impl Default for LayerIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReadCursor {
    module: usize,
    local: u64,
}

impl ReadCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the next record, rolling over to the next non-empty module.
    pub fn advance(&mut self, index: &LayerIndex) -> Option<(usize, u64)> {
        while let Some(count) = index.counts.get(self.module) {
            if self.local < *count {
                let position = (self.module, self.local);
                self.local += 1;
                return Some(position);
            }
            self.module += 1;
            self.local = 0;
        }
        None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
