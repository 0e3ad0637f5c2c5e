//! Utilities for serializing circuits.
//!
//! See [`crate::serialize::pytket`] for serialization to and from the pytket
//! JSON format.
pub mod pytket;

pub use pytket::{
    load_tk1_json_file, load_tk1_json_reader, load_tk1_json_str, save_tk1_json_file,
    save_tk1_json_str, save_tk1_json_writer, TK1ConvertError, TKETDecode,
};
