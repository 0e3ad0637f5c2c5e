//! Grover amplitude amplification circuits for Exact Cover.
//!
//! One Grover iteration applies an *amplify* block (the element counters, the
//! oracle marking exact covers, and the uncomputation of the counters)
//! followed by the *diffuser*. Both blocks are built once as standalone
//! [`Circuit`]s over the register layout and appended to the main circuit as
//! many times as there are iterations.

mod assembler;
mod counter;
mod diffuser;
mod oracle;

pub use assembler::{direct_iterations, AssemblyStage};
pub use counter::counter;
pub use diffuser::diffuser;
pub use oracle::oracle;

pub(crate) use assembler::assemble;

use derive_more::{Display, Error};

use crate::circuit::{BitRegister, Circuit, CircuitError, Qubit, QubitRegister};
use crate::config::ConfigError;

/// Name of the subset-selection register.
pub const SUBSET_REGISTER: &str = "S";
/// Name of the ancilla register.
pub const ANCILLA_REGISTER: &str = "anc";
/// Name of the classical register holding the measured selection.
pub const CLASSICAL_REGISTER: &str = "c";

/// Name of the counter register of the element at `element` in the universe.
pub fn counter_register(element: usize) -> String {
    format!("U_{element}")
}

/// The quantum registers of an Exact Cover Grover circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactCoverLayout {
    subsets: QubitRegister,
    counters: Vec<QubitRegister>,
    ancilla: Qubit,
}

impl ExactCoverLayout {
    /// Allocate the subset register, one counter of `width` qubits per
    /// universe element, and the ancilla, in that order.
    pub(crate) fn allocate(
        circ: &mut Circuit,
        s_size: usize,
        u_size: usize,
        width: usize,
    ) -> Result<Self, CircuitError> {
        let subsets = circ.add_q_register(SUBSET_REGISTER, s_size)?;
        let counters = (0..u_size)
            .map(|i| circ.add_q_register(counter_register(i), width))
            .collect::<Result<Vec<_>, _>>()?;
        let ancilla = circ.add_q_register(ANCILLA_REGISTER, 1)?[0].clone();
        Ok(Self {
            subsets,
            counters,
            ancilla,
        })
    }

    /// The subset-selection register `S`, one qubit per subset.
    #[inline]
    pub fn subsets(&self) -> &QubitRegister {
        &self.subsets
    }

    /// The counter registers `U_i`, in universe order.
    #[inline]
    pub fn counters(&self) -> &[QubitRegister] {
        &self.counters
    }

    /// The counter register of the element at position `element`.
    pub fn counter(&self, element: usize) -> Option<&QubitRegister> {
        self.counters.get(element)
    }

    /// The phase-kickback ancilla.
    #[inline]
    pub fn ancilla(&self) -> &Qubit {
        &self.ancilla
    }

    /// The width of each counter register.
    pub fn counter_width(&self) -> usize {
        self.counters.first().map_or(0, QubitRegister::len)
    }

    /// Every qubit of the layout in allocation order.
    pub fn qubits(&self) -> impl Iterator<Item = &Qubit> + '_ {
        self.subsets
            .iter()
            .chain(self.counters.iter().flatten())
            .chain([&self.ancilla])
    }

    /// An empty circuit over the layout's qubits, used for the sub-blocks.
    pub(crate) fn empty_block(&self, name: &str) -> Result<Circuit, CircuitError> {
        let mut block = Circuit::with_name(name);
        for q in self.qubits() {
            block.add_qubit(q.clone())?;
        }
        Ok(block)
    }
}

/// An assembled Grover circuit, together with the layout and the blocks it
/// was assembled from.
#[derive(Clone, Debug, PartialEq)]
pub struct GroverCircuit {
    pub(crate) circuit: Circuit,
    pub(crate) layout: ExactCoverLayout,
    pub(crate) classical: BitRegister,
    pub(crate) num_iterations: usize,
    pub(crate) subset_names: Vec<String>,
    pub(crate) amplify: Circuit,
    pub(crate) diffuser: Circuit,
}

impl GroverCircuit {
    /// The full circuit.
    #[inline]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Consume the result, returning the full circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// The quantum register layout.
    #[inline]
    pub fn layout(&self) -> &ExactCoverLayout {
        &self.layout
    }

    /// The classical register `c`. Bit `j` holds the measurement of `S[j]`.
    #[inline]
    pub fn classical(&self) -> &BitRegister {
        &self.classical
    }

    /// The number of Grover iterations applied.
    #[inline]
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// The subset identifiers, in subset-register order.
    pub fn subset_names(&self) -> &[String] {
        &self.subset_names
    }

    /// The counter, oracle and uncomputation block of one iteration.
    pub fn amplify(&self) -> &Circuit {
        &self.amplify
    }

    /// The diffuser block of one iteration.
    pub fn diffuser(&self) -> &Circuit {
        &self.diffuser
    }

    /// The identifiers of the subsets selected in a measurement outcome,
    /// given as the values of the classical register in bit order.
    pub fn selected_subsets<'a>(
        &'a self,
        outcome: &'a [bool],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.subset_names
            .iter()
            .zip(outcome)
            .filter(|(_, bit)| **bit)
            .map(|(name, _)| name.as_str())
    }
}

/// Errors that can occur while building a Grover circuit.
#[derive(Display, Debug, Clone, Error, PartialEq, derive_more::From)]
#[non_exhaustive]
pub enum BuildError {
    /// The solver configuration or the instance is invalid.
    #[display("{_0}")]
    #[from]
    Config(ConfigError),
    /// A circuit operation was rejected.
    #[display("Circuit construction failed: {_0}")]
    #[from]
    Circuit(CircuitError),
    /// The direct iteration formula does not fit a machine word.
    #[display("The number of Grover iterations for {s_size} subsets and {num_solutions} solutions does not fit a machine word.")]
    IterationOverflow {
        /// The number of subsets.
        s_size: usize,
        /// The number of solutions.
        num_solutions: f64,
    },
}

#[cfg(test)]
mod tests {
    use cool_asserts::assert_matches;
    use itertools::Itertools;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::encoding::{CoverMap, SubsetCollection, Universe};
    use crate::ops::GateOp;
    use crate::utils::test::{evaluate_permutation, StateVector};

    fn cover_map(universe: &[i32], subsets: &[(&str, &[i32])]) -> CoverMap {
        let universe = Universe::try_new(universe.iter().copied()).unwrap();
        let mut collection = SubsetCollection::new();
        for &(name, elements) in subsets {
            collection.insert(name, elements.iter().copied()).unwrap();
        }
        CoverMap::try_new(&universe, &collection).unwrap()
    }

    /// Universe {1, 2, 3} with subsets A = {1, 2}, B = {2, 3}, C = {1, 3}.
    /// No exact cover exists.
    #[fixture]
    fn triangle() -> CoverMap {
        cover_map(&[1, 2, 3], &[("A", &[1, 2]), ("B", &[2, 3]), ("C", &[1, 3])])
    }

    /// Universe {1, 2, 3} with subsets A = {1}, B = {2, 3}, C = {1, 2}.
    /// The only exact cover is {A, B}.
    #[fixture]
    fn single_cover() -> CoverMap {
        cover_map(&[1, 2, 3], &[("A", &[1]), ("B", &[2, 3]), ("C", &[1, 2])])
    }

    #[rstest]
    fn layout(triangle: CoverMap) {
        let grover = assemble(&triangle, Some(1.0), None).unwrap();
        let layout = grover.layout();
        assert_eq!(layout.subsets().len(), 3);
        assert_eq!(layout.counters().len(), 3);
        assert_eq!(layout.counter_width(), 2);
        assert_eq!(layout.ancilla(), &Qubit::new("anc", 0));
        assert_eq!(layout.counter(2).map(|r| r.name()), Some("U_2"));

        let circ = grover.circuit();
        assert_eq!(circ.qubit_count(), 10);
        assert_eq!(
            circ.qubit_registers().collect_vec(),
            [("S", 3), ("U_0", 2), ("U_1", 2), ("U_2", 2), ("anc", 1)]
        );
        assert_eq!(circ.bit_registers().collect_vec(), [("c", 3)]);
        assert_eq!(grover.subset_names(), ["A", "B", "C"]);
    }

    #[rstest]
    fn measurements_are_aligned(triangle: CoverMap) {
        let grover = assemble(&triangle, Some(1.0), None).unwrap();
        let measures = grover
            .circuit()
            .commands()
            .filter(|cmd| cmd.op() == GateOp::Measure)
            .collect_vec();
        assert_eq!(measures.len(), 3);
        for (j, cmd) in measures.into_iter().enumerate() {
            assert_eq!(cmd.qubits(), [Qubit::new("S", j)]);
            assert_eq!(cmd.bits(), [grover.classical()[j].clone()]);
        }
        // Measurements close the circuit.
        assert!(grover
            .circuit()
            .commands()
            .rev()
            .take(3)
            .all(|cmd| cmd.op() == GateOp::Measure));
    }

    #[rstest]
    fn command_counts(triangle: CoverMap) {
        let grover = assemble(&triangle, Some(1.0), None).unwrap();
        assert_eq!(grover.num_iterations(), 2);

        let amplify = grover.amplify().gate_counts();
        // Counter and its inverse, plus the oracle's single CnX.
        assert_eq!(amplify.get(GateOp::CnX), 2 * 12 + 1);
        assert_eq!(amplify.get(GateOp::X), 2 * 3);
        assert_eq!(amplify.multi_controlled(), 2 * 12 + 1);
        let diffuser = grover.diffuser().gate_counts();
        assert_eq!(diffuser.gates(), 1 + 4 * 3);
        assert_eq!(diffuser.get(GateOp::CnZ), 1);

        let counts = grover.circuit().gate_counts();
        let per_iteration = grover.amplify().num_operations() + grover.diffuser().num_operations();
        assert_eq!(counts.get(GateOp::Measure), 3);
        assert_eq!(
            grover.circuit().num_operations(),
            3 + 2 + 2 * per_iteration + 3
        );
    }

    #[rstest]
    fn explicit_iterations(triangle: CoverMap) {
        let grover = assemble(&triangle, None, Some(5)).unwrap();
        assert_eq!(grover.num_iterations(), 5);
        assert_eq!(grover.circuit().gate_counts().get(GateOp::CnZ), 5);

        let grover = assemble(&triangle, None, Some(0)).unwrap();
        assert_eq!(grover.circuit().num_operations(), 3 + 2 + 3);
    }

    #[rstest]
    fn missing_solutions(triangle: CoverMap) {
        assert_matches!(
            assemble(&triangle, None, None),
            Err(BuildError::Config(ConfigError::MissingSolutions))
        );
        assert_matches!(
            assemble(&triangle, Some(0.0), Some(3)),
            Err(BuildError::Config(ConfigError::NonPositiveSolutions { .. }))
        );
    }

    #[test]
    fn degenerate_instances() {
        let single = cover_map(&[1, 2], &[("A", &[1, 2])]);
        assert_matches!(
            assemble(&single, Some(1.0), None),
            Err(BuildError::Config(ConfigError::DegenerateCounter))
        );
        let no_subsets = cover_map(&[1, 2], &[]);
        assert_matches!(
            assemble(&no_subsets, Some(1.0), None),
            Err(BuildError::Config(ConfigError::EmptySubsets))
        );
        let no_universe = cover_map(&[], &[("A", &[]), ("B", &[])]);
        assert_matches!(
            assemble(&no_universe, Some(1.0), None),
            Err(BuildError::Config(ConfigError::EmptyUniverse))
        );
    }

    #[test]
    fn iteration_overflow() {
        assert_matches!(
            direct_iterations(2000, 1.0),
            Err(BuildError::IterationOverflow { s_size: 2000, .. })
        );
        assert_matches!(
            direct_iterations(200, 1.0),
            Err(BuildError::IterationOverflow { .. })
        );
        assert_eq!(direct_iterations(3, 1.0), Ok(2));
        assert_eq!(direct_iterations(3, 8.0), Ok(0));
    }

    /// Every basis state of `S` with the counters and the ancilla cleared
    /// comes back unchanged from the counter followed by its inverse, and the
    /// counters hold the per-element coverage in between.
    #[rstest]
    fn counter_uncomputes(triangle: CoverMap) {
        let grover = assemble(&triangle, None, Some(0)).unwrap();
        let layout = grover.layout();
        let (compute, uncompute) = counter(&triangle, layout).unwrap();
        let circ = grover.circuit();

        for selection in 0..(1usize << 3) {
            let mut state = vec![false; circ.qubit_count()];
            for j in 0..3 {
                state[j] = selection >> j & 1 == 1;
            }
            let counted = evaluate_permutation(&compute, circ, &state);
            for (i, reg) in layout.counters().iter().enumerate() {
                let expected = triangle
                    .covers()
                    .iter()
                    .enumerate()
                    .filter(|(j, cover)| selection >> j & 1 == 1 && cover.contains(&i))
                    .count();
                let value = reg
                    .iter()
                    .enumerate()
                    .map(|(k, q)| usize::from(counted[circ.qubit_index(q).unwrap()]) << k)
                    .sum::<usize>();
                assert_eq!(value, expected, "selection {selection:03b}, element {i}");
            }
            let restored = evaluate_permutation(&uncompute, circ, &counted);
            assert_eq!(restored, state, "selection {selection:03b}");
        }
    }

    #[rstest]
    fn oracle_marks_exact_covers(single_cover: CoverMap) {
        let grover = assemble(&single_cover, None, Some(0)).unwrap();
        let layout = grover.layout();
        let circ = grover.circuit();
        let oracle = oracle(layout).unwrap();
        let anc = circ.qubit_index(layout.ancilla()).unwrap();

        // Counter values (one per element) for which the ancilla flips.
        for values in (0..3).map(|_| 0usize..4).multi_cartesian_product() {
            let mut state = vec![false; circ.qubit_count()];
            for (reg, &v) in layout.counters().iter().zip(&values) {
                for (k, q) in reg.iter().enumerate() {
                    state[circ.qubit_index(q).unwrap()] = v >> k & 1 == 1;
                }
            }
            let out = evaluate_permutation(&oracle, circ, &state);
            let marked = values.iter().all(|&v| v == 1);
            assert_eq!(out[anc], marked, "counters {values:?}");
        }
    }

    #[rstest]
    fn amplifies_exact_cover(single_cover: CoverMap) {
        let grover = assemble(&single_cover, Some(1.0), None).unwrap();
        assert_eq!(grover.num_iterations(), 2);

        let probabilities = StateVector::simulate(grover.circuit()).measure_probabilities(
            grover.circuit(),
            grover.layout().subsets().as_slice(),
        );
        // S[0] = A, S[1] = B selected, S[2] = C not selected.
        let solution = 0b011;
        assert!(
            probabilities[solution] > 0.9,
            "probabilities {probabilities:?}"
        );
        let outcome = [true, true, false];
        assert_eq!(grover.selected_subsets(&outcome).collect_vec(), ["A", "B"]);
    }
}
