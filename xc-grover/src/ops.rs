//! Quantum operations emitted by the Exact Cover circuit builders.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

#[derive(
    Clone,
    Copy,
    Debug,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[non_exhaustive]
/// Simple enum of the operations a [`Circuit`](crate::Circuit) may contain.
///
/// Names match the pytket operation types they serialize to.
//
// When adding new operations, make sure to also edit:
// - `GateOp::qubit_arity` and `GateOp::dagger` in this same file
// - `xc-grover/src/serialize/pytket.rs`: For pytket operation equivalence
pub enum GateOp {
    /// Hadamard gate
    H,
    /// Pauli X gate
    X,
    /// Multi-controlled X gate.
    ///
    /// The last qubit is the target, every other qubit is a control. With a
    /// single qubit this is an `X` gate.
    CnX,
    /// Multi-controlled Z gate.
    ///
    /// Symmetric in its qubits: applies a `-1` phase when all of them are set.
    CnZ,
    /// Measure a qubit into a classical bit.
    Measure,
}

/// The number of qubits an operation acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many qubits.
    Exact(usize),
    /// At least this many qubits.
    AtLeast(usize),
}

impl Arity {
    /// Whether `n` qubits are a valid argument count.
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exact(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl GateOp {
    /// The number of qubit arguments the operation takes.
    pub fn qubit_arity(&self) -> Arity {
        match self {
            GateOp::H | GateOp::X | GateOp::Measure => Arity::Exact(1),
            GateOp::CnX | GateOp::CnZ => Arity::AtLeast(1),
        }
    }

    /// The number of classical bit arguments the operation takes.
    pub fn bit_count(&self) -> usize {
        match self {
            GateOp::Measure => 1,
            _ => 0,
        }
    }

    /// Returns the adjoint of the operation, or `None` if it is not unitary.
    ///
    /// Every unitary operation in this set is self-adjoint.
    pub fn dagger(&self) -> Option<GateOp> {
        match self {
            GateOp::H | GateOp::X | GateOp::CnX | GateOp::CnZ => Some(*self),
            GateOp::Measure => None,
        }
    }

    /// Whether the operation permutes computational basis states.
    ///
    /// Circuits made only of these operations can be evaluated classically.
    pub fn is_permutation(&self) -> bool {
        matches!(self, GateOp::X | GateOp::CnX)
    }

    /// Whether the operation is a multi-controlled gate.
    pub fn is_multi_controlled(&self) -> bool {
        matches!(self, GateOp::CnX | GateOp::CnZ)
    }
}
