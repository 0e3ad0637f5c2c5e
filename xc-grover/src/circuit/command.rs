//! Circuit commands: an operation applied to concrete qubits and bits.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::units::{Bit, Qubit};
use crate::ops::GateOp;

/// An operation applied to a list of qubits and bits.
///
/// Each command owns its argument lists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    op: GateOp,
    qubits: Vec<Qubit>,
    bits: Vec<Bit>,
}

impl Command {
    /// Create a new command. Arguments are validated when the command is added
    /// to a [`Circuit`](crate::Circuit).
    pub fn new(op: GateOp, qubits: Vec<Qubit>, bits: Vec<Bit>) -> Self {
        Self { op, qubits, bits }
    }

    /// The operation.
    #[inline]
    pub fn op(&self) -> GateOp {
        self.op
    }

    /// The qubit arguments.
    #[inline]
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// The classical bit arguments.
    #[inline]
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// The control qubits of a [`GateOp::CnX`] command, i.e. every qubit but
    /// the last. Empty for other operations.
    pub fn controls(&self) -> &[Qubit] {
        match (self.op, self.qubits.split_last()) {
            (GateOp::CnX, Some((_, controls))) => controls,
            _ => &[],
        }
    }

    /// The target qubit of a [`GateOp::CnX`], [`GateOp::H`] or [`GateOp::X`]
    /// command.
    pub fn target(&self) -> Option<&Qubit> {
        match self.op {
            GateOp::CnX | GateOp::H | GateOp::X => self.qubits.last(),
            _ => None,
        }
    }

    /// The adjoint command, or `None` if the operation is not unitary.
    pub fn dagger(&self) -> Option<Command> {
        let op = self.op.dagger()?;
        Some(Command {
            op,
            qubits: self.qubits.clone(),
            bits: self.bits.clone(),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.op,
            self.qubits
                .iter()
                .map(ToString::to_string)
                .chain(self.bits.iter().map(ToString::to_string))
                .join(", ")
        )
    }
}
