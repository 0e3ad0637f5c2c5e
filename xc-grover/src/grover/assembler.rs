//! Assembly of the full Grover circuit from its blocks.

use std::f64::consts::FRAC_PI_4;

use strum::{Display, IntoStaticStr};
use tracing::{debug, info, trace};

use super::{
    counter, diffuser, oracle, BuildError, ExactCoverLayout, GroverCircuit, CLASSICAL_REGISTER,
};
use crate::circuit::Circuit;
use crate::config::{check_num_solutions, ConfigError};
use crate::encoding::CoverMap;
use crate::estimate::counter_width;
use crate::log::{LOG_TARGET, PROGRESS_TARGET};

/// Name given to assembled circuits.
const CIRCUIT_NAME: &str = "grover_exact_cover";

/// The stages the assembler goes through, in order.
///
/// `Amplify` and `Reflect` alternate once per Grover iteration; `Measured` is
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[non_exhaustive]
pub enum AssemblyStage {
    /// Nothing allocated yet.
    Empty,
    /// Quantum registers allocated.
    RegistersAllocated,
    /// Subset register in uniform superposition, ancilla in `|−⟩`.
    Superposed,
    /// Counter, oracle and uncomputation applied.
    Amplify,
    /// Diffuser applied.
    Reflect,
    /// Subset register measured into the classical register.
    Measured,
}

impl AssemblyStage {
    /// Whether the assembler may move from this stage to `next`.
    pub fn can_advance_to(self, next: AssemblyStage) -> bool {
        use AssemblyStage::*;
        matches!(
            (self, next),
            (Empty, RegistersAllocated)
                | (RegistersAllocated, Superposed)
                | (Superposed | Reflect, Amplify)
                | (Amplify, Reflect)
                | (Superposed | Reflect, Measured)
        )
    }
}

/// The optimal number of Grover iterations, `⌊π/4 · √(2^s / M)⌋`, evaluated
/// in double precision.
///
/// # Errors
///
/// Returns an error if `num_solutions` is not a positive finite number, or if
/// the result is not finite or does not fit a `usize`.
pub fn direct_iterations(s_size: usize, num_solutions: f64) -> Result<usize, BuildError> {
    let num_solutions = check_num_solutions(num_solutions)?;
    let k = (FRAC_PI_4 * ((s_size as f64).exp2() / num_solutions).sqrt()).floor();
    if !k.is_finite() || k >= usize::MAX as f64 {
        return Err(BuildError::IterationOverflow {
            s_size,
            num_solutions,
        });
    }
    Ok(k as usize)
}

/// Builds the Grover circuit, tracking the current stage.
struct Assembler {
    circ: Circuit,
    stage: AssemblyStage,
}

impl Assembler {
    fn new() -> Self {
        Self {
            circ: Circuit::with_name(CIRCUIT_NAME),
            stage: AssemblyStage::Empty,
        }
    }

    fn advance(&mut self, next: AssemblyStage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "invalid assembly transition {} -> {next}",
            self.stage
        );
        trace!(target: PROGRESS_TARGET, from = %self.stage, to = %next, "assembly stage");
        self.stage = next;
    }
}

/// Validate the instance and assemble its Grover circuit.
///
/// The number of iterations is `num_iterations` if given, otherwise it is
/// computed from `num_solutions` with [`direct_iterations`]. All validation
/// happens before any register is allocated.
pub(crate) fn assemble(
    cover: &CoverMap,
    num_solutions: Option<f64>,
    num_iterations: Option<usize>,
) -> Result<GroverCircuit, BuildError> {
    let s_size = cover.s_size();
    let u_size = cover.u_size();
    if u_size == 0 {
        return Err(ConfigError::EmptyUniverse.into());
    }
    match s_size {
        0 => return Err(ConfigError::EmptySubsets.into()),
        1 => return Err(ConfigError::DegenerateCounter.into()),
        _ => {}
    }
    if let Some(m) = num_solutions {
        check_num_solutions(m)?;
    }
    let num_iterations = match num_iterations {
        Some(n) => n,
        None => {
            let m = num_solutions.ok_or(ConfigError::MissingSolutions)?;
            direct_iterations(s_size, m)?
        }
    };
    let width = counter_width(s_size);
    info!(
        target: LOG_TARGET,
        s_size, u_size, counter_width = width, num_iterations, "assembling Grover circuit"
    );

    let mut asm = Assembler::new();
    let layout = ExactCoverLayout::allocate(&mut asm.circ, s_size, u_size, width)?;
    asm.advance(AssemblyStage::RegistersAllocated);

    for q in layout.subsets() {
        asm.circ.h(q)?;
    }
    asm.circ.x(layout.ancilla())?;
    asm.circ.h(layout.ancilla())?;
    asm.advance(AssemblyStage::Superposed);

    let (compute, uncompute) = counter(cover, &layout)?;
    let mut amplify = compute;
    amplify.append(&oracle(&layout)?)?;
    amplify.append(&uncompute)?;
    let diffuser = diffuser(&layout)?;
    debug!(
        target: LOG_TARGET,
        amplify = amplify.num_operations(),
        amplify_mcx = amplify.gate_counts().multi_controlled(),
        diffuser = diffuser.num_operations(),
        "built iteration blocks"
    );

    for i in 0..num_iterations {
        trace!(target: PROGRESS_TARGET, iteration = i, "Grover iteration");
        asm.circ.append(&amplify)?;
        asm.advance(AssemblyStage::Amplify);
        asm.circ.append(&diffuser)?;
        asm.advance(AssemblyStage::Reflect);
    }

    let classical = asm.circ.add_c_register(CLASSICAL_REGISTER, s_size)?;
    for (q, c) in layout.subsets().iter().zip(&classical) {
        asm.circ.measure(q, c)?;
    }
    asm.advance(AssemblyStage::Measured);
    let counts = asm.circ.gate_counts();
    debug!(
        target: LOG_TARGET,
        operations = counts.total(),
        mcx = counts.multi_controlled(),
        "assembled Grover circuit"
    );

    Ok(GroverCircuit {
        circuit: asm.circ,
        layout,
        classical,
        num_iterations,
        subset_names: cover.names().to_vec(),
        amplify,
        diffuser,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::AssemblyStage::*;

    #[test]
    fn stage_transitions() {
        assert!(Empty.can_advance_to(RegistersAllocated));
        assert!(Superposed.can_advance_to(Measured));
        assert!(Reflect.can_advance_to(Amplify));
        assert!(!Amplify.can_advance_to(Measured));
        assert!(!Measured.can_advance_to(Amplify));
        assert!(!Empty.can_advance_to(Superposed));
        assert_eq!(Reflect.to_string(), "Reflect");
    }
}
