//! Utility functions for the library.

use crate::circuit::{Circuit, CircuitError, QubitRegister};

/// Utility for building simple qubit-only circuits over a single register
/// `q`.
#[allow(unused)]
pub(crate) fn build_simple_circuit<F>(num_qubits: usize, f: F) -> Result<Circuit, CircuitError>
where
    F: FnOnce(&mut Circuit, &QubitRegister) -> Result<(), CircuitError>,
{
    let mut circ = Circuit::with_name("main");
    let qbs = circ.add_q_register("q", num_qubits)?;
    f(&mut circ, &qbs)?;
    Ok(circ)
}
