//! Operation counts for a circuit.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ops::GateOp;

/// The number of commands of each operation type in a circuit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GateCounts(BTreeMap<GateOp, usize>);

impl GateCounts {
    /// The number of commands applying `op`.
    pub fn get(&self, op: GateOp) -> usize {
        self.0.get(&op).copied().unwrap_or_default()
    }

    /// The total number of commands.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// The number of commands that are not measurements.
    pub fn gates(&self) -> usize {
        self.total() - self.get(GateOp::Measure)
    }

    /// The number of multi-controlled gates.
    pub fn multi_controlled(&self) -> usize {
        self.0
            .iter()
            .filter(|(op, _)| op.is_multi_controlled())
            .map(|(_, n)| n)
            .sum()
    }
}

impl FromIterator<GateOp> for GateCounts {
    fn from_iter<I: IntoIterator<Item = GateOp>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for op in iter {
            *counts.entry(op).or_default() += 1;
        }
        Self(counts)
    }
}
