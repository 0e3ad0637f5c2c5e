//! Serialization and deserialization of circuits using the `pytket` JSON format.

#[cfg(test)]
mod tests;

use std::path::Path;
use std::{fs, io};

use derive_more::{Display, Error, From};
use tket_json_rs::circuit_json::{self, ImplicitPermutation, SerialCircuit};
use tket_json_rs::register::{self, ElementId};
use tket_json_rs::OpType as SerialOpType;

use crate::circuit::{Bit, Circuit, CircuitError, Command, Qubit, UnitId};
use crate::ops::GateOp;

/// The global phase written to encoded circuits.
const DEFAULT_PHASE: &str = "0";

/// A serialized representation of a [`Circuit`].
///
/// Implemented by [`SerialCircuit`], the JSON format used by tket1's `pytket` library.
pub trait TKETDecode: Sized {
    /// The error type for decoding.
    type DecodeError;
    /// The error type for encoding.
    type EncodeError;
    /// Convert the serialized circuit to a circuit.
    fn decode(self) -> Result<Circuit, Self::DecodeError>;
    /// Convert a circuit to a new serialized circuit.
    fn encode(circuit: &Circuit) -> Result<Self, Self::EncodeError>;
}

impl TKETDecode for SerialCircuit {
    type DecodeError = TK1ConvertError;
    type EncodeError = TK1ConvertError;

    fn decode(self) -> Result<Circuit, Self::DecodeError> {
        let mut circ = match self.name {
            Some(name) => Circuit::with_name(name),
            None => Circuit::new(),
        };
        for qb in &self.qubits {
            circ.add_qubit(Qubit::from(decode_unit(&qb.id)?))?;
        }
        for bit in &self.bits {
            circ.add_bit(Bit::from(decode_unit(&bit.id)?))?;
        }
        for com in self.commands {
            circ.add_command(decode_command(com)?)?;
        }
        Ok(circ)
    }

    fn encode(circ: &Circuit) -> Result<Self, Self::EncodeError> {
        let mut ser = SerialCircuit::new(circ.name().map(str::to_string), DEFAULT_PHASE.to_string());
        ser.commands = circ.commands().map(encode_command).collect();
        ser.qubits = circ
            .qubits()
            .map(|q| register::Qubit::from(encode_unit(q.id())))
            .collect();
        ser.bits = circ
            .bits()
            .map(|b| register::Bit::from(encode_unit(b.id())))
            .collect();
        // Commands never reorder qubits.
        ser.implicit_permutation = ser
            .qubits
            .iter()
            .map(|q| ImplicitPermutation(q.clone(), q.clone()))
            .collect();
        Ok(ser)
    }
}

/// Load a TKET1 circuit from a JSON file.
pub fn load_tk1_json_file(path: impl AsRef<Path>) -> Result<Circuit, TK1ConvertError> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    load_tk1_json_reader(reader)
}

/// Load a TKET1 circuit from a JSON reader.
pub fn load_tk1_json_reader(json: impl io::Read) -> Result<Circuit, TK1ConvertError> {
    let ser: SerialCircuit = serde_json::from_reader(json)?;
    let circ: Circuit = ser.decode()?;
    Ok(circ)
}

/// Load a TKET1 circuit from a JSON string.
pub fn load_tk1_json_str(json: &str) -> Result<Circuit, TK1ConvertError> {
    let reader = json.as_bytes();
    load_tk1_json_reader(reader)
}

/// Save a circuit to file in TK1 JSON format.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_tk1_json_file(circ: &Circuit, path: impl AsRef<Path>) -> Result<(), TK1ConvertError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);
    save_tk1_json_writer(circ, writer)
}

/// Save a circuit in TK1 JSON format to a writer.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn save_tk1_json_writer(circ: &Circuit, w: impl io::Write) -> Result<(), TK1ConvertError> {
    let serial_circ = SerialCircuit::encode(circ)?;
    serde_json::to_writer(w, &serial_circ)?;
    Ok(())
}

/// Save a circuit in TK1 JSON format to a String.
pub fn save_tk1_json_str(circ: &Circuit) -> Result<String, TK1ConvertError> {
    let serial_circ = SerialCircuit::encode(circ)?;
    Ok(serde_json::to_string(&serial_circ)?)
}

fn encode_unit(id: &UnitId) -> ElementId {
    ElementId(id.register().to_string(), vec![id.index() as i64])
}

fn decode_unit(id: &ElementId) -> Result<UnitId, TK1ConvertError> {
    let ElementId(register, index) = id;
    match index.as_slice() {
        [i] => usize::try_from(*i)
            .map(|i| UnitId::new(register.as_str(), i))
            .map_err(|_| TK1ConvertError::NegativeIndex {
                register: register.clone(),
                index: *i,
            }),
        _ => Err(TK1ConvertError::MultiIndexedRegister {
            register: register.clone(),
        }),
    }
}

fn encode_op(op: GateOp) -> SerialOpType {
    match op {
        GateOp::H => SerialOpType::H,
        GateOp::X => SerialOpType::X,
        GateOp::CnX => SerialOpType::CnX,
        GateOp::CnZ => SerialOpType::CnZ,
        GateOp::Measure => SerialOpType::Measure,
    }
}

fn decode_op(op: &SerialOpType) -> Result<GateOp, TK1ConvertError> {
    Ok(match op {
        SerialOpType::H => GateOp::H,
        SerialOpType::X => GateOp::X,
        SerialOpType::CnX => GateOp::CnX,
        SerialOpType::CnZ => GateOp::CnZ,
        SerialOpType::Measure => GateOp::Measure,
        _ => return Err(TK1ConvertError::UnsupportedSerializedOp(op.clone())),
    })
}

fn encode_command(com: &Command) -> circuit_json::Command {
    let num_qubits = com.qubits().len();
    let num_bits = com.bits().len();
    let mut op = circuit_json::Operation::default();
    op.op_type = encode_op(com.op());
    op.n_qb = Some(num_qubits as u32);
    op.signature = Some(
        [
            vec!["Q".into(); num_qubits],
            vec!["B".into(); num_bits],
        ]
        .concat(),
    );
    let args = com
        .qubits()
        .iter()
        .map(|q| encode_unit(q.id()))
        .chain(com.bits().iter().map(|b| encode_unit(b.id())))
        .collect();
    circuit_json::Command {
        op,
        args,
        opgroup: None,
    }
}

fn decode_command(com: circuit_json::Command) -> Result<Command, TK1ConvertError> {
    let circuit_json::Command { op, args, .. } = com;
    let gate = decode_op(&op.op_type)?;
    let num_bits = gate.bit_count();
    if args.len() <= num_bits {
        return Err(TK1ConvertError::MissingArguments {
            op: gate,
            args: args.len(),
        });
    }
    let (qubit_args, bit_args) = args.split_at(args.len() - num_bits);
    let qubits = qubit_args
        .iter()
        .map(|arg| decode_unit(arg).map(Qubit::from))
        .collect::<Result<_, _>>()?;
    let bits = bit_args
        .iter()
        .map(|arg| decode_unit(arg).map(Bit::from))
        .collect::<Result<_, _>>()?;
    Ok(Command::new(gate, qubits, bits))
}

/// Error type for conversion between [`Circuit`] and [`SerialCircuit`].
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum TK1ConvertError {
    /// The serialized operation is not supported.
    #[display("Unsupported serialized pytket operation: {_0:?}")]
    #[error(ignore)] // `_0` is not the error source
    UnsupportedSerializedOp(SerialOpType),
    /// A register element has more than one index.
    #[display("Register '{register}' is multi-indexed, only flat registers are supported.")]
    MultiIndexedRegister {
        /// The register name.
        register: String,
    },
    /// A register element has a negative index.
    #[display("Register '{register}' has a negative index {index}.")]
    NegativeIndex {
        /// The register name.
        register: String,
        /// The index.
        index: i64,
    },
    /// A command has too few arguments for its operation.
    #[display("Operation {op} is missing arguments, only {args} were given.")]
    MissingArguments {
        /// The operation.
        op: GateOp,
        /// The number of arguments given.
        args: usize,
    },
    /// The decoded commands do not form a valid circuit.
    #[display("Invalid circuit: {_0}")]
    #[from]
    InvalidCircuit(CircuitError),
    /// Invalid JSON.
    #[display("Invalid pytket JSON. {_0}")]
    #[from]
    InvalidJson(serde_json::Error),
    /// File not found.
    #[display("Unable to load pytket json file. {_0}")]
    #[from]
    FileLoadError(io::Error),
}
