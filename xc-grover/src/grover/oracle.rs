//! Phase oracle marking exact covers.

use itertools::Itertools;

use super::ExactCoverLayout;
use crate::circuit::{Circuit, CircuitError};
use crate::ops::GateOp;

/// Build the oracle block.
///
/// The ancilla is flipped when every element counter reads exactly one: all
/// counter bits above bit 0 are negated around a single multi-controlled X
/// targeting the ancilla. With the ancilla in `|−⟩` this is a phase flip.
///
/// # Errors
///
/// Propagates circuit construction errors.
pub fn oracle(layout: &ExactCoverLayout) -> Result<Circuit, CircuitError> {
    let mut circ = layout.empty_block("oracle")?;
    let negated = layout
        .counters()
        .iter()
        .flat_map(|reg| reg.iter().skip(1))
        .collect_vec();

    for q in &negated {
        circ.x(q)?;
    }
    circ.add_gate(
        GateOp::CnX,
        layout
            .counters()
            .iter()
            .flatten()
            .chain([layout.ancilla()]),
    )?;
    for q in &negated {
        circ.x(q)?;
    }
    Ok(circ)
}
