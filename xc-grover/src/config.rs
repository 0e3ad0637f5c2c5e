//! Solver options and configuration errors.

use std::num::NonZeroU32;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

/// Options for building and estimating an Exact Cover Grover circuit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroverOptions {
    /// Which subset collection of the encoding provider to use.
    pub encoding: Encoding,
    /// The number of valid covers. Defaults to the provider's known count.
    pub num_solutions: Option<f64>,
    /// An explicit number of Grover iterations. Computed from the number of
    /// solutions when unset.
    pub num_iterations: Option<usize>,
    /// Precision of the resource estimator's arithmetic.
    pub precision: Precision,
}

impl Default for GroverOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Simple,
            num_solutions: None,
            num_iterations: None,
            precision: Precision::default(),
        }
    }
}

/// Number of significant decimal digits used by the resource estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{_0} digits")]
#[serde(transparent)]
pub struct Precision(NonZeroU32);

impl Precision {
    /// The default estimator precision.
    pub const DEFAULT_DIGITS: u32 = 50;

    /// Create a precision of `digits` significant digits.
    ///
    /// # Errors
    ///
    /// Returns an error if `digits` is zero.
    pub fn new(digits: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(digits)
            .map(Self)
            .ok_or(ConfigError::InvalidPrecision { digits })
    }

    /// The number of significant digits.
    #[inline]
    pub fn digits(&self) -> u32 {
        self.0.get()
    }
}

impl Default for Precision {
    fn default() -> Self {
        match NonZeroU32::new(Self::DEFAULT_DIGITS) {
            Some(d) => Self(d),
            None => unreachable!("the default precision is non-zero"),
        }
    }
}

/// Validate a solution count, returning it unchanged if it is a positive,
/// finite number.
///
/// # Errors
///
/// Returns [`ConfigError::NonPositiveSolutions`] otherwise.
pub fn check_num_solutions(num_solutions: f64) -> Result<f64, ConfigError> {
    if num_solutions.is_finite() && num_solutions > 0.0 {
        Ok(num_solutions)
    } else {
        Err(ConfigError::NonPositiveSolutions {
            value: num_solutions,
        })
    }
}

/// Invalid input to the solver. Always reported before any arithmetic or
/// circuit allocation takes place.
#[derive(Display, Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The encoding name is not one of the supported values.
    #[display("Unknown encoding '{value}'. Expected 'simple' or 'pattern'.")]
    UnknownEncoding {
        /// The offending value.
        value: String,
    },
    /// The number of solutions must be a positive, finite number.
    #[display("The number of solutions must be positive, got {value}.")]
    NonPositiveSolutions {
        /// The offending value.
        value: f64,
    },
    /// No solution count was given and the encoding provider does not know it.
    #[display("The number of solutions is unknown. Provide it explicitly or set the number of iterations.")]
    MissingSolutions,
    /// The universe has no elements.
    #[display("The universe to cover is empty.")]
    EmptyUniverse,
    /// The subset collection has no subsets.
    #[display("The subset collection is empty.")]
    EmptySubsets,
    /// A single subset leaves no room for counter qubits.
    #[display("A single subset needs zero counter qubits; at least two subsets are required to build a circuit.")]
    DegenerateCounter,
    /// An element appears twice in the universe.
    #[display("Element {element} appears more than once in the universe.")]
    DuplicateElement {
        /// The repeated element, debug-formatted.
        element: String,
    },
    /// Two subsets share an identifier.
    #[display("Subset '{subset}' is defined more than once.")]
    DuplicateSubset {
        /// The repeated identifier.
        subset: String,
    },
    /// A subset covers an element missing from the universe.
    #[display("Subset '{subset}' covers {element}, which is not in the universe.")]
    UnknownElement {
        /// The subset identifier.
        subset: String,
        /// The unknown element, debug-formatted.
        element: String,
    },
    /// The estimator precision must be at least one digit.
    #[display("The estimator precision must be at least one digit, got {digits}.")]
    InvalidPrecision {
        /// The offending value.
        digits: u32,
    },
}
