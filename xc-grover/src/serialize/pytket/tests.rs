//! Tests for the pytket JSON conversion.

use cool_asserts::assert_matches;
use rstest::{fixture, rstest};
use tket_json_rs::circuit_json::SerialCircuit;
use tket_json_rs::register;

use super::*;
use crate::utils::build_simple_circuit;

const SIMPLE_JSON: &str = r#"{
        "phase": "0",
        "created_qubits": [],
        "discarded_qubits": [],
        "bits": [["c", [0]]],
        "qubits": [["q", [0]], ["q", [1]], ["q", [2]]],
        "commands": [
            {"args": [["q", [0]]], "op": {"type": "H"}},
            {"args": [["q", [0]], ["q", [1]], ["q", [2]]], "op": {"type": "CnX"}},
            {"args": [["q", [1]], ["q", [2]]], "op": {"type": "CnZ"}},
            {"args": [["q", [2]], ["c", [0]]], "op": {"type": "Measure"}}
        ],
        "implicit_permutation": [[["q", [0]], ["q", [0]]], [["q", [1]], ["q", [1]]], [["q", [2]], ["q", [2]]]]
    }"#;

const UNSUPPORTED_JSON: &str = r#"{
        "phase": "0",
        "created_qubits": [],
        "discarded_qubits": [],
        "bits": [],
        "qubits": [["q", [0]], ["q", [1]]],
        "commands": [
            {"args": [["q", [0]], ["q", [1]]], "op": {"type": "CX"}}
        ],
        "implicit_permutation": []
    }"#;

const MULTI_INDEXED_JSON: &str = r#"{
        "phase": "0",
        "created_qubits": [],
        "discarded_qubits": [],
        "bits": [],
        "qubits": [["q", [0, 1]]],
        "commands": [],
        "implicit_permutation": []
    }"#;

#[fixture]
fn grover_like() -> Circuit {
    let mut circ = build_simple_circuit(3, |circ, q| {
        circ.h(&q[0])?;
        circ.h(&q[1])?;
        circ.add_gate(GateOp::CnX, [&q[0], &q[1], &q[2]])?;
        circ.add_gate(GateOp::CnZ, [&q[0], &q[1]])
    })
    .unwrap();
    let c = circ.add_c_register("c", 2).unwrap();
    circ.measure(&Qubit::new("q", 0), &c[0]).unwrap();
    circ.measure(&Qubit::new("q", 1), &c[1]).unwrap();
    circ
}

#[test]
fn decode_simple() {
    let ser: SerialCircuit = serde_json::from_str(SIMPLE_JSON).unwrap();
    let circ = ser.decode().unwrap();
    assert_eq!(circ.qubit_count(), 3);
    assert_eq!(circ.bit_count(), 1);
    assert_eq!(circ.num_operations(), 4);

    let measure = circ.commands().last().unwrap();
    assert_eq!(measure.op(), GateOp::Measure);
    assert_eq!(measure.qubits(), [Qubit::new("q", 2)]);
    assert_eq!(measure.bits(), [Bit::new("c", 0)]);
}

#[rstest]
fn encode(grover_like: Circuit) {
    let ser = SerialCircuit::encode(&grover_like).unwrap();
    assert_eq!(ser.name.as_deref(), Some("main"));
    assert_eq!(ser.qubits.len(), 3);
    assert_eq!(ser.bits.len(), 2);
    assert_eq!(ser.commands.len(), 6);
    assert_eq!(ser.implicit_permutation.len(), 3);

    let cnx = &ser.commands[2];
    assert_matches!(cnx.op.op_type, SerialOpType::CnX);
    assert_eq!(cnx.op.n_qb, Some(3));
    assert_eq!(
        cnx.args,
        [0, 1, 2].map(|i| ElementId("q".to_string(), vec![i]))
    );

    let measure = &ser.commands[4];
    assert_eq!(
        measure.op.signature.as_deref(),
        Some(["Q".to_string(), "B".to_string()].as_slice())
    );

    // Every argument is a declared unit.
    for command in &ser.commands {
        for arg in &command.args {
            assert!(
                ser.qubits.contains(&register::Qubit::from(arg.clone()))
                    || ser.bits.contains(&register::Bit::from(arg.clone())),
                "invalid argument {arg:?}"
            );
        }
    }
}

#[rstest]
fn roundtrip(grover_like: Circuit) {
    let json = save_tk1_json_str(&grover_like).unwrap();
    let decoded = load_tk1_json_str(&json).unwrap();
    assert_eq!(decoded, grover_like);
}

#[test]
fn file_roundtrip() {
    let circ = load_tk1_json_str(SIMPLE_JSON).unwrap();
    let path = std::env::temp_dir().join(format!("xc_grover_{}.json", std::process::id()));
    save_tk1_json_file(&circ, &path).unwrap();
    let loaded = load_tk1_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, circ);
}

#[test]
fn unsupported_op() {
    assert_matches!(
        load_tk1_json_str(UNSUPPORTED_JSON),
        Err(TK1ConvertError::UnsupportedSerializedOp(SerialOpType::CX))
    );
}

#[test]
fn multi_indexed_register() {
    assert_matches!(
        load_tk1_json_str(MULTI_INDEXED_JSON),
        Err(TK1ConvertError::MultiIndexedRegister { register }) => assert_eq!(register, "q")
    );
}

#[test]
fn invalid_json() {
    assert_matches!(
        load_tk1_json_str("{\"phase\": 0"),
        Err(TK1ConvertError::InvalidJson(_))
    );
    assert_matches!(
        load_tk1_json_file("/nonexistent/circuit.json"),
        Err(TK1ConvertError::FileLoadError(_))
    );
}

#[test]
fn unknown_argument() {
    let json = SIMPLE_JSON.replace(r#"{"args": [["q", [0]]], "op": {"type": "H"}}"#, r#"{"args": [["r", [0]]], "op": {"type": "H"}}"#);
    assert_matches!(
        load_tk1_json_str(&json),
        Err(TK1ConvertError::InvalidCircuit(CircuitError::UnknownUnit { .. }))
    );
}
