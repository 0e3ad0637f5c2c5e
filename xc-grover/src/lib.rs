//! xc-grover: Grover search circuits for Exact Cover problems.
//!
//! Given a universe of elements and a collection of named subsets, this crate
//! assembles a quantum circuit that amplifies the amplitude of the subset
//! selections covering every element exactly once. The construction follows
//! J.-R. Jiang and Y.-J. Wang, "Quantum Circuit Based on Grover's Algorithm to
//! Solve Exact Cover Problem", APWCS 2023:
//!
//! - one qubit per subset (`S`) holds the candidate selection,
//! - one binary counter per element (`U_i`) counts the selected subsets
//!   covering it,
//! - an oracle flips the phase of an ancilla (`anc`) when every counter reads
//!   one, after which the counters are uncomputed,
//! - a diffuser reflects the selection register about the uniform
//!   superposition.
//!
//! The [`estimate`] module computes closed-form resource estimates for the
//! same construction without building the circuit.
//!
//! Circuits are stored in a small pytket-like [`Circuit`] model and can be
//! exchanged with `pytket` through its JSON serial format, see [`serialize`].
//!
//! # Example
//!
//! ```
//! use xc_grover::encoding::{ExactCoverProblem, SubsetCollection, Universe};
//! use xc_grover::{ExactCoverSolver, GroverOptions, QuantumSolver};
//!
//! let universe = Universe::try_new([1, 2, 3]).unwrap();
//! let mut subsets = SubsetCollection::new();
//! subsets.insert("A", [1]).unwrap();
//! subsets.insert("B", [2, 3]).unwrap();
//! subsets.insert("C", [1, 2]).unwrap();
//! let problem = ExactCoverProblem::new(universe, subsets).with_num_solutions(1.0);
//!
//! let solver = ExactCoverSolver::new(&problem, GroverOptions::default()).unwrap();
//! let circ = solver.build_circuit().unwrap();
//! assert_eq!(circ.qubit_count(), 10);
//!
//! let estimate = solver.resource_estimation().unwrap();
//! assert_eq!(estimate.n_qubits, 10);
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod circuit;
pub mod config;
pub mod encoding;
pub mod estimate;
pub mod grover;
pub mod log;
pub mod ops;
pub mod serialize;
pub mod solver;

mod utils;

pub use circuit::{Circuit, CircuitError};
pub use config::{ConfigError, GroverOptions, Precision};
pub use estimate::{estimate_resources, ResourceEstimate};
pub use grover::{BuildError, GroverCircuit};
pub use ops::GateOp;
pub use solver::{ExactCoverSolver, QuantumSolver};
