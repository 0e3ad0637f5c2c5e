//! Closed-form resource estimates for the Exact Cover Grover circuit.
//!
//! The estimates are computed from the problem sizes alone, without building
//! the circuit. Gate counts can be astronomically large for big instances, so
//! every count that scales with the number of Grover iterations is an
//! arbitrary-precision integer.
//!
//! The number of iterations `⌊π/4 · √(2^s / M)⌋` is evaluated exactly: `π` is
//! generated to the requested [`Precision`] and the floor of the square root
//! is taken over integers, so the result does not depend on floating-point
//! rounding even when `2^s` exceeds the range of an `f64`.

use num_bigint::BigUint;
use num_integer::Roots;
use num_traits::{Float, Zero};
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use tracing::{debug, trace};

use crate::config::{check_num_solutions, ConfigError, Precision};
use crate::log::{LOG_TARGET, PROGRESS_TARGET};

/// Extra digits of `π` carried while summing its series.
const PI_GUARD_DIGITS: u32 = 10;

/// Size parameters of an Exact Cover instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemSize {
    /// The number of subsets.
    pub s_size: usize,
    /// The number of universe elements.
    pub u_size: usize,
    /// Qubits per element counter.
    pub counter_width: usize,
    /// The number of elements covered by each subset.
    pub covering_sizes: Vec<usize>,
}

impl ProblemSize {
    /// Size parameters for a universe of `u_size` elements and one subset per
    /// entry of `covering_sizes`.
    pub fn new(u_size: usize, covering_sizes: Vec<usize>) -> Self {
        let s_size = covering_sizes.len();
        Self {
            s_size,
            u_size,
            counter_width: counter_width(s_size),
            covering_sizes,
        }
    }

    /// Total number of qubits: the subset register, every counter and the
    /// ancilla.
    pub fn n_qubits(&self) -> usize {
        self.s_size + self.u_size * self.counter_width + 1
    }
}

/// The number of qubits of each element counter, `⌈log₂ s⌉`.
///
/// Zero for a single subset (or none).
pub fn counter_width(s_size: usize) -> usize {
    match s_size {
        0 | 1 => 0,
        s => (usize::BITS - (s - 1).leading_zeros()) as usize,
    }
}

/// Per-block gate counts of a single Grover iteration, as estimated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateBreakdown {
    /// Hadamards preparing the uniform superposition over subsets.
    pub superposition: usize,
    /// The `X` and `H` preparing the ancilla in `|−⟩`.
    pub ancilla_preparation: usize,
    /// Multi-controlled gates of one counter computation.
    pub counter: usize,
    /// Multi-controlled gates of one oracle.
    pub oracle: usize,
    /// Gates of one diffuser.
    pub diffuser: usize,
}

/// Resource estimate of the full Grover circuit.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceEstimate {
    /// Number of qubits.
    pub n_qubits: usize,
    /// Number of Grover iterations.
    #[serde_as(as = "DisplayFromStr")]
    pub num_iterations: BigUint,
    /// Number of multi-controlled X gates.
    #[serde(rename = "MCX_gates")]
    #[serde_as(as = "DisplayFromStr")]
    pub mcx_gates: BigUint,
    /// Total number of gates, excluding measurements.
    #[serde_as(as = "DisplayFromStr")]
    pub n_gates: BigUint,
    /// Circuit depth. Not estimated.
    pub depth: Option<usize>,
    /// Per-iteration gate counts.
    pub breakdown: GateBreakdown,
}

/// Estimate the resources of the Grover circuit for an instance of the given
/// size with `num_solutions` valid covers.
///
/// # Errors
///
/// Returns an error if `num_solutions` is not a positive finite number, or
/// if the universe or the subset collection is empty.
pub fn estimate_resources(
    size: &ProblemSize,
    num_solutions: f64,
    precision: Precision,
) -> Result<ResourceEstimate, ConfigError> {
    let num_solutions = check_num_solutions(num_solutions)?;
    if size.u_size == 0 {
        return Err(ConfigError::EmptyUniverse);
    }
    if size.s_size == 0 {
        return Err(ConfigError::EmptySubsets);
    }

    let b = size.counter_width;
    let breakdown = GateBreakdown {
        superposition: size.s_size,
        ancilla_preparation: 2,
        counter: size.covering_sizes.iter().sum::<usize>() * b,
        oracle: 1 + 2 * (size.u_size - 1) * b,
        diffuser: 1 + 4 * size.s_size,
    };
    trace!(target: PROGRESS_TARGET, ?breakdown, "per-iteration gate counts");

    let num_iterations = grover_iterations(size.s_size, num_solutions, precision)?;
    let mcx_gates = &num_iterations * (breakdown.oracle + 2 * breakdown.counter);
    let n_gates = BigUint::from(breakdown.superposition + breakdown.ancilla_preparation)
        + &mcx_gates
        + &num_iterations * breakdown.diffuser;

    debug!(
        target: LOG_TARGET,
        s_size = size.s_size,
        u_size = size.u_size,
        %num_iterations,
        %mcx_gates,
        %n_gates,
        "estimated resources"
    );

    Ok(ResourceEstimate {
        n_qubits: size.n_qubits(),
        num_iterations,
        mcx_gates,
        n_gates,
        depth: None,
        breakdown,
    })
}

/// The optimal number of Grover iterations, `⌊π/4 · √(2^s / M)⌋`, for a
/// search space of `2^s_size` states containing `num_solutions` solutions.
///
/// `π` is truncated to `precision` decimal digits after the point.
///
/// # Errors
///
/// Returns an error if `num_solutions` is not a positive finite number.
pub fn grover_iterations(
    s_size: usize,
    num_solutions: f64,
    precision: Precision,
) -> Result<BigUint, ConfigError> {
    let num_solutions = check_num_solutions(num_solutions)?;
    let digits = precision.digits();
    let pi = pi_scaled(digits);
    let scale = BigUint::from(10u32).pow(digits);

    // M = mantissa · 2^exponent exactly, so
    // k² ≤ (π·10^d)² · 2^s / (16 · 10^2d · mantissa · 2^exponent).
    let (mantissa, exponent, _) = num_solutions.integer_decode();
    let mut numerator = &pi * &pi;
    let mut denominator = &scale * &scale * 16u32 * mantissa;
    let shift = s_size as i64 - i64::from(exponent);
    if shift >= 0 {
        numerator <<= shift as usize;
    } else {
        denominator <<= shift.unsigned_abs() as usize;
    }
    Ok(Roots::sqrt(&(numerator / denominator)))
}

/// `⌊π · 10^digits⌋`, from Machin's formula `π = 16·atan(1/5) − 4·atan(1/239)`.
pub fn pi_scaled(digits: u32) -> BigUint {
    let unity = BigUint::from(10u32).pow(digits + PI_GUARD_DIGITS);
    let pi = arctan_inv(5, &unity) * 16u32 - arctan_inv(239, &unity) * 4u32;
    pi / BigUint::from(10u32).pow(PI_GUARD_DIGITS)
}

/// `atan(1/x) · unity`, truncated term by term.
fn arctan_inv(x: u32, unity: &BigUint) -> BigUint {
    let x_squared = BigUint::from(x * x);
    let mut power = unity / x;
    let mut sum = power.clone();
    let mut n = 1u32;
    let mut subtract = true;
    loop {
        power /= &x_squared;
        if power.is_zero() {
            break;
        }
        n += 2;
        let term = &power / n;
        if subtract {
            sum -= term;
        } else {
            sum += term;
        }
        subtract = !subtract;
    }
    sum
}
