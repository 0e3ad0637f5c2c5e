//! Quantum circuit representation and operations.
//!
//! A [`Circuit`] is an append-only list of [`Command`]s over a fixed,
//! ordered set of named qubits and bits. Sub-circuits are separate values:
//! they are composed with [`Circuit::append`] and inverted with
//! [`Circuit::dagger`], which returns a new circuit.

pub mod command;
pub mod cost;
pub mod units;

use derive_more::{Display, Error};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use smol_str::SmolStr;

pub use command::Command;
pub use cost::GateCounts;
pub use units::{Bit, BitRegister, Qubit, QubitRegister, Register, UnitId};

use crate::ops::GateOp;

/// A quantum circuit over named qubit and bit registers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    /// The circuit name, if any.
    name: Option<String>,
    /// Qubits, in allocation order.
    qubits: IndexSet<Qubit>,
    /// Classical bits, in allocation order.
    bits: IndexSet<Bit>,
    /// Number of qubits allocated under each register name.
    qubit_registers: IndexMap<SmolStr, usize>,
    /// Number of bits allocated under each register name.
    bit_registers: IndexMap<SmolStr, usize>,
    /// The commands, in application order.
    commands: Vec<Command>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty named circuit.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Return the name of the circuit, if it has one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Add a single qubit to the circuit.
    ///
    /// # Errors
    ///
    /// Returns an error if the qubit is already present.
    pub fn add_qubit(&mut self, qubit: Qubit) -> Result<(), CircuitError> {
        let register = SmolStr::from(qubit.id().register());
        if !self.qubits.insert(qubit.clone()) {
            return Err(CircuitError::DuplicateUnit {
                unit: qubit.id().clone(),
            });
        }
        *self.qubit_registers.entry(register).or_default() += 1;
        Ok(())
    }

    /// Add a single classical bit to the circuit.
    ///
    /// # Errors
    ///
    /// Returns an error if the bit is already present.
    pub fn add_bit(&mut self, bit: Bit) -> Result<(), CircuitError> {
        let register = SmolStr::from(bit.id().register());
        if !self.bits.insert(bit.clone()) {
            return Err(CircuitError::DuplicateUnit {
                unit: bit.id().clone(),
            });
        }
        *self.bit_registers.entry(register).or_default() += 1;
        Ok(())
    }

    /// Allocate a new qubit register with `size` qubits.
    ///
    /// # Errors
    ///
    /// Returns an error if a qubit register with the same name exists.
    pub fn add_q_register(
        &mut self,
        name: impl Into<SmolStr>,
        size: usize,
    ) -> Result<QubitRegister, CircuitError> {
        let name = name.into();
        if self.qubit_registers.contains_key(&name) {
            return Err(CircuitError::DuplicateRegister { name });
        }
        let reg = QubitRegister::new_qubits(name.clone(), size);
        self.qubits.extend(reg.iter().cloned());
        self.qubit_registers.insert(name, size);
        Ok(reg)
    }

    /// Allocate a new classical register with `size` bits.
    ///
    /// # Errors
    ///
    /// Returns an error if a bit register with the same name exists.
    pub fn add_c_register(
        &mut self,
        name: impl Into<SmolStr>,
        size: usize,
    ) -> Result<BitRegister, CircuitError> {
        let name = name.into();
        if self.bit_registers.contains_key(&name) {
            return Err(CircuitError::DuplicateRegister { name });
        }
        let reg = BitRegister::new_bits(name.clone(), size);
        self.bits.extend(reg.iter().cloned());
        self.bit_registers.insert(name, size);
        Ok(reg)
    }

    /// Append a gate acting on `qubits`.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation needs classical bits, the number of
    /// qubits does not match the operation, or a qubit is repeated or not
    /// part of the circuit.
    pub fn add_gate<'a>(
        &mut self,
        op: GateOp,
        qubits: impl IntoIterator<Item = &'a Qubit>,
    ) -> Result<(), CircuitError> {
        let command = Command::new(op, qubits.into_iter().cloned().collect(), vec![]);
        self.add_command(command)
    }

    /// Append a Hadamard gate.
    pub fn h(&mut self, qubit: &Qubit) -> Result<(), CircuitError> {
        self.add_gate(GateOp::H, [qubit])
    }

    /// Append a Pauli X gate.
    pub fn x(&mut self, qubit: &Qubit) -> Result<(), CircuitError> {
        self.add_gate(GateOp::X, [qubit])
    }

    /// Append a measurement of `qubit` into `bit`.
    pub fn measure(&mut self, qubit: &Qubit, bit: &Bit) -> Result<(), CircuitError> {
        self.add_command(Command::new(
            GateOp::Measure,
            vec![qubit.clone()],
            vec![bit.clone()],
        ))
    }

    /// Append a command after validating its arguments.
    ///
    /// # Errors
    ///
    /// See [`Circuit::add_gate`].
    pub fn add_command(&mut self, command: Command) -> Result<(), CircuitError> {
        let op = command.op();
        let arity = op.qubit_arity();
        if !arity.accepts(command.qubits().len()) || command.bits().len() != op.bit_count() {
            return Err(CircuitError::InvalidArity {
                op,
                qubits: command.qubits().len(),
                bits: command.bits().len(),
            });
        }
        if let Some(q) = command.qubits().iter().find(|q| !self.qubits.contains(*q)) {
            return Err(CircuitError::UnknownUnit {
                unit: q.id().clone(),
            });
        }
        if let Some(b) = command.bits().iter().find(|b| !self.bits.contains(*b)) {
            return Err(CircuitError::UnknownUnit {
                unit: b.id().clone(),
            });
        }
        if let Some(q) = command.qubits().iter().duplicates().next() {
            return Err(CircuitError::RepeatedArgument {
                op,
                unit: q.id().clone(),
            });
        }
        self.commands.push(command);
        Ok(())
    }

    /// Append all the commands of `other` to this circuit.
    ///
    /// Every qubit and bit of `other` must already be part of this circuit;
    /// no units are created.
    ///
    /// # Errors
    ///
    /// Returns an error if `other` uses a unit missing from this circuit.
    pub fn append(&mut self, other: &Circuit) -> Result<(), CircuitError> {
        if let Some(q) = other.qubits.iter().find(|q| !self.qubits.contains(*q)) {
            return Err(CircuitError::UnknownUnit {
                unit: q.id().clone(),
            });
        }
        if let Some(b) = other.bits.iter().find(|b| !self.bits.contains(*b)) {
            return Err(CircuitError::UnknownUnit {
                unit: b.id().clone(),
            });
        }
        self.commands.extend(other.commands.iter().cloned());
        Ok(())
    }

    /// Returns the inverse of the circuit: the commands in reverse order, each
    /// replaced by its adjoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the circuit contains a non-unitary operation.
    pub fn dagger(&self) -> Result<Circuit, CircuitError> {
        let commands = self
            .commands
            .iter()
            .rev()
            .map(|cmd| {
                cmd.dagger()
                    .ok_or(CircuitError::NotInvertible { op: cmd.op() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Circuit {
            name: self.name.as_ref().map(|n| format!("{n}_dg")),
            commands,
            ..self.clone_units()
        })
    }

    /// The qubits of the circuit, in allocation order.
    pub fn qubits(&self) -> impl ExactSizeIterator<Item = &Qubit> + '_ {
        self.qubits.iter()
    }

    /// The classical bits of the circuit, in allocation order.
    pub fn bits(&self) -> impl ExactSizeIterator<Item = &Bit> + '_ {
        self.bits.iter()
    }

    /// The position of `qubit` in allocation order.
    pub fn qubit_index(&self, qubit: &Qubit) -> Option<usize> {
        self.qubits.get_index_of(qubit)
    }

    /// The qubit register names and sizes, in allocation order.
    pub fn qubit_registers(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.qubit_registers.iter().map(|(n, &s)| (n.as_str(), s))
    }

    /// The classical register names and sizes, in allocation order.
    pub fn bit_registers(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.bit_registers.iter().map(|(n, &s)| (n.as_str(), s))
    }

    /// The number of qubits.
    #[inline]
    pub fn qubit_count(&self) -> usize {
        self.qubits.len()
    }

    /// The number of classical bits.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// The commands, in application order.
    pub fn commands(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// The number of operations in the circuit, measurements included.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.commands.len()
    }

    /// The number of commands of each operation type.
    pub fn gate_counts(&self) -> GateCounts {
        self.commands.iter().map(Command::op).collect()
    }

    /// A copy of the unit declarations, without commands.
    fn clone_units(&self) -> Circuit {
        Circuit {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            bits: self.bits.clone(),
            qubit_registers: self.qubit_registers.clone(),
            bit_registers: self.bit_registers.clone(),
            commands: Vec::new(),
        }
    }
}

/// Errors that can occur when building a circuit.
#[derive(Display, Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum CircuitError {
    /// The unit is not part of the circuit.
    #[display("{unit} is not part of the circuit.")]
    UnknownUnit {
        /// The missing unit.
        unit: UnitId,
    },
    /// The unit was already added to the circuit.
    #[display("{unit} is already part of the circuit.")]
    DuplicateUnit {
        /// The repeated unit.
        unit: UnitId,
    },
    /// A register with the same name was already allocated.
    #[display("A register named '{name}' already exists.")]
    DuplicateRegister {
        /// The register name.
        name: SmolStr,
    },
    /// The operation was given the wrong number of arguments.
    #[display("Operation {op} cannot act on {qubits} qubits and {bits} bits.")]
    InvalidArity {
        /// The operation.
        op: GateOp,
        /// The number of qubits given.
        qubits: usize,
        /// The number of bits given.
        bits: usize,
    },
    /// A qubit was used twice in the same command.
    #[display("Operation {op} uses {unit} more than once.")]
    RepeatedArgument {
        /// The operation.
        op: GateOp,
        /// The repeated unit.
        unit: UnitId,
    },
    /// The circuit contains an operation with no inverse.
    #[display("Cannot invert a circuit containing a {op} operation.")]
    NotInvertible {
        /// The non-unitary operation.
        op: GateOp,
    },
}
