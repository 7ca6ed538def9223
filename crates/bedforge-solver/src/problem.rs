//! Read-only problem context shared by every phase and run.

use bedforge_core::{CostTables, Instance, OverlapTable, PenaltyWeights};

/// An instance together with its precomputed tables.
///
/// Built once per solve and shared by reference, including across
/// parallel runs.
#[derive(Debug, Clone)]
pub struct Problem<'a> {
    instance: &'a Instance,
    tables: CostTables,
    overlap: OverlapTable,
}

impl<'a> Problem<'a> {
    pub fn new(instance: &'a Instance, weights: PenaltyWeights) -> Self {
        Self {
            instance,
            tables: CostTables::new(instance, weights),
            overlap: OverlapTable::new(instance),
        }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn tables(&self) -> &CostTables {
        &self.tables
    }

    pub fn overlap(&self) -> &OverlapTable {
        &self.overlap
    }

    pub fn horizon(&self) -> usize {
        self.instance.horizon
    }

    pub fn weights(&self) -> &PenaltyWeights {
        self.tables.weights()
    }
}
