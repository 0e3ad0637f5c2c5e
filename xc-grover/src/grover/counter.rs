//! Per-element coverage counters.

use rayon::prelude::*;

use super::{counter_register, ExactCoverLayout, SUBSET_REGISTER};
use crate::circuit::{Circuit, CircuitError, Command, Qubit};
use crate::encoding::CoverMap;
use crate::ops::GateOp;

/// Build the counter block and its inverse.
///
/// For every subset `j` and every element `i` it covers, the counter adds
/// `S[j]` to the binary counter `U_i` with a carry chain of multi-controlled
/// X gates, most significant bit first. The gates of a subset are emitted in
/// reverse of its element order; subsets follow the collection order.
///
/// # Errors
///
/// Returns an error if `cover` refers to subsets or elements missing from the
/// layout.
pub fn counter(
    cover: &CoverMap,
    layout: &ExactCoverLayout,
) -> Result<(Circuit, Circuit), CircuitError> {
    let width = layout.counter_width();
    let blocks: Vec<Vec<Command>> = cover
        .covers()
        .par_iter()
        .enumerate()
        .map(|(j, elements)| {
            let control = Qubit::new(SUBSET_REGISTER, j);
            elements
                .iter()
                .rev()
                .flat_map(|&i| {
                    let register = (0..width)
                        .map(|k| Qubit::new(counter_register(i), k))
                        .collect::<Vec<_>>();
                    increment(&control, &register)
                })
                .collect()
        })
        .collect();

    let mut circ = layout.empty_block("counter")?;
    for command in blocks.into_iter().flatten() {
        circ.add_command(command)?;
    }
    let inverse = circ.dagger()?;
    Ok((circ, inverse))
}

/// A controlled increment of `register`: bit `k` flips when `control` and
/// every lower bit are set.
fn increment(control: &Qubit, register: &[Qubit]) -> Vec<Command> {
    (0..register.len())
        .rev()
        .map(|k| {
            let qubits = std::iter::once(control)
                .chain(&register[..=k])
                .cloned()
                .collect();
            Command::new(GateOp::CnX, qubits, vec![])
        })
        .collect()
}
