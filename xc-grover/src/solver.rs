//! Solver entry points.
//!
//! A [`QuantumSolver`] turns a problem instance into a circuit, and can
//! estimate the resources of that circuit without building it.

use tracing::debug;

use crate::circuit::Circuit;
use crate::config::{check_num_solutions, ConfigError, GroverOptions};
use crate::encoding::{CoverMap, Encoding, ExactCoverEncoding};
use crate::estimate::{estimate_resources, ResourceEstimate};
use crate::grover::{assemble, BuildError, GroverCircuit};
use crate::log::LOG_TARGET;

/// A problem-specific quantum solver.
pub trait QuantumSolver {
    /// The error returned when building or estimating fails.
    type Error: std::error::Error;

    /// Build the circuit solving the problem.
    fn build_circuit(&self) -> Result<Circuit, Self::Error>;

    /// Estimate the resources of the circuit returned by
    /// [`QuantumSolver::build_circuit`], without building it.
    fn resource_estimation(&self) -> Result<ResourceEstimate, Self::Error>;
}

/// Grover search for exact covers of an [`ExactCoverEncoding`] instance.
///
/// The encoding is resolved and the instance is validated once, on
/// construction.
#[derive(Debug, Clone)]
pub struct ExactCoverSolver<'p, P> {
    provider: &'p P,
    options: GroverOptions,
    cover: CoverMap,
    num_solutions: Option<f64>,
}

impl<'p, P: ExactCoverEncoding> ExactCoverSolver<'p, P> {
    /// Create a solver for `provider`.
    ///
    /// The number of solutions defaults to the provider's known count.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected subset collection is empty, the
    /// universe is empty, a subset covers an element outside the universe, or
    /// the number of solutions is not positive.
    pub fn new(provider: &'p P, options: GroverOptions) -> Result<Self, ConfigError> {
        let universe = provider.universe();
        let subsets = options.encoding.subsets(provider);
        if universe.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        if subsets.is_empty() {
            return Err(ConfigError::EmptySubsets);
        }
        let num_solutions = options
            .num_solutions
            .or_else(|| provider.num_solutions())
            .map(check_num_solutions)
            .transpose()?;
        let cover = CoverMap::try_new(universe, subsets)?;
        debug!(
            target: LOG_TARGET,
            encoding = %options.encoding,
            s_size = cover.s_size(),
            u_size = cover.u_size(),
            "resolved Exact Cover instance"
        );
        Ok(Self {
            provider,
            options,
            cover,
            num_solutions,
        })
    }

    /// The encoding provider.
    pub fn provider(&self) -> &'p P {
        self.provider
    }

    /// The selected encoding.
    pub fn encoding(&self) -> Encoding {
        self.options.encoding
    }

    /// The solver options.
    pub fn options(&self) -> &GroverOptions {
        &self.options
    }

    /// The resolved instance.
    pub fn cover(&self) -> &CoverMap {
        &self.cover
    }

    /// The number of solutions used for the iteration count, if known.
    pub fn num_solutions(&self) -> Option<f64> {
        self.num_solutions
    }

    /// Build the Grover circuit together with its register layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of iterations cannot be determined, or
    /// if the instance has a single subset.
    pub fn build(&self) -> Result<GroverCircuit, BuildError> {
        assemble(
            &self.cover,
            self.num_solutions,
            self.options.num_iterations,
        )
    }

    /// Estimate the resources of the Grover circuit.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of solutions is unknown.
    pub fn estimate(&self) -> Result<ResourceEstimate, ConfigError> {
        let num_solutions = self.num_solutions.ok_or(ConfigError::MissingSolutions)?;
        estimate_resources(
            &self.cover.problem_size(),
            num_solutions,
            self.options.precision,
        )
    }
}

impl<P: ExactCoverEncoding> QuantumSolver for ExactCoverSolver<'_, P> {
    type Error = BuildError;

    fn build_circuit(&self) -> Result<Circuit, BuildError> {
        Ok(self.build()?.into_circuit())
    }

    fn resource_estimation(&self) -> Result<ResourceEstimate, BuildError> {
        Ok(self.estimate()?)
    }
}

#[cfg(test)]
mod tests {
    use cool_asserts::assert_matches;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::encoding::{ExactCoverProblem, SubsetCollection, Universe};
    use crate::ops::GateOp;

    #[fixture]
    fn problem() -> ExactCoverProblem<char> {
        let universe = Universe::try_new(['a', 'b', 'c', 'd']).unwrap();
        let mut simple = SubsetCollection::new();
        simple.insert("ab", ['a', 'b']).unwrap();
        simple.insert("cd", ['c', 'd']).unwrap();
        simple.insert("a", ['a']).unwrap();
        simple.insert("bcd", ['b', 'c', 'd']).unwrap();
        let mut pattern = SubsetCollection::new();
        pattern.insert("abcd", ['a', 'b', 'c', 'd']).unwrap();
        pattern.insert("none", []).unwrap();
        ExactCoverProblem::new(universe, simple)
            .with_pattern_subsets(pattern)
            .with_num_solutions(2.0)
    }

    #[rstest]
    fn simple_encoding(problem: ExactCoverProblem<char>) {
        let solver = ExactCoverSolver::new(&problem, GroverOptions::default()).unwrap();
        assert_eq!(solver.encoding(), Encoding::Simple);
        assert_eq!(solver.num_solutions(), Some(2.0));

        let circ = solver.build_circuit().unwrap();
        // 4 subsets, 4 counters of 2 qubits, one ancilla.
        assert_eq!(circ.qubit_count(), 4 + 4 * 2 + 1);
        assert_eq!(circ.bit_count(), 4);

        let estimate = solver.resource_estimation().unwrap();
        assert_eq!(estimate.n_qubits, circ.qubit_count());
        // ⌊π/4 · √(16 / 2)⌋
        assert_eq!(estimate.num_iterations, 2u32.into());
        assert_eq!(circ.gate_counts().get(GateOp::CnZ), 2);
    }

    #[rstest]
    fn pattern_encoding(problem: ExactCoverProblem<char>) {
        let options = GroverOptions {
            encoding: Encoding::Pattern,
            num_solutions: Some(1.0),
            ..Default::default()
        };
        let solver = ExactCoverSolver::new(&problem, options).unwrap();
        assert_eq!(solver.cover().names(), ["abcd", "none"]);
        let grover = solver.build().unwrap();
        assert_eq!(grover.layout().counter_width(), 1);
        assert_eq!(grover.num_iterations(), 1);
    }

    #[rstest]
    fn explicit_iterations_without_solutions(problem: ExactCoverProblem<char>) {
        let problem = ExactCoverProblem {
            num_solutions: None,
            ..problem
        };
        let options = GroverOptions {
            num_iterations: Some(3),
            ..Default::default()
        };
        let solver = ExactCoverSolver::new(&problem, options).unwrap();
        assert_eq!(solver.build().unwrap().num_iterations(), 3);
        assert_matches!(
            solver.resource_estimation(),
            Err(BuildError::Config(ConfigError::MissingSolutions))
        );
    }

    #[rstest]
    fn invalid_instances(problem: ExactCoverProblem<char>) {
        let options = GroverOptions {
            num_solutions: Some(-1.0),
            ..Default::default()
        };
        assert_matches!(
            ExactCoverSolver::new(&problem, options),
            Err(ConfigError::NonPositiveSolutions { .. })
        );

        let no_pattern = ExactCoverProblem {
            pattern_subsets: SubsetCollection::new(),
            ..problem
        };
        let options = GroverOptions {
            encoding: Encoding::Pattern,
            ..Default::default()
        };
        assert_matches!(
            ExactCoverSolver::new(&no_pattern, options),
            Err(ConfigError::EmptySubsets)
        );

        let mut outside = SubsetCollection::new();
        outside.insert("z", ['z']).unwrap();
        let outside = ExactCoverProblem::new(no_pattern.universe.clone(), outside);
        assert_matches!(
            ExactCoverSolver::new(&outside, GroverOptions::default()),
            Err(ConfigError::UnknownElement { subset, .. }) => assert_eq!(subset, "z")
        );
    }
}
