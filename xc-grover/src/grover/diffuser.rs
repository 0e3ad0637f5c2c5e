//! Reflection about the uniform superposition of the subset register.

use super::ExactCoverLayout;
use crate::circuit::{Circuit, CircuitError};
use crate::ops::GateOp;

/// Build the diffuser block: `H` then `X` on each subset qubit, a `CnZ` over
/// the whole register, then `X` then `H` on each qubit again.
///
/// # Errors
///
/// Propagates circuit construction errors.
pub fn diffuser(layout: &ExactCoverLayout) -> Result<Circuit, CircuitError> {
    let mut circ = layout.empty_block("diffuser")?;
    let subsets = layout.subsets();
    for q in subsets {
        circ.h(q)?;
        circ.x(q)?;
    }
    circ.add_gate(GateOp::CnZ, subsets)?;
    for q in subsets {
        circ.x(q)?;
        circ.h(q)?;
    }
    Ok(circ)
}
