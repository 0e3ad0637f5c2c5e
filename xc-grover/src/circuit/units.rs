//! Qubit and bit identifiers, and the named registers grouping them.
//!
//! Units are identified the way pytket identifies them: a register name and
//! an index into that register.

use std::ops::Index;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Identifier of a single circuit unit in a named register.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("{register}[{index}]")]
pub struct UnitId {
    register: SmolStr,
    index: usize,
}

impl UnitId {
    /// Create a new unit identifier.
    pub fn new(register: impl Into<SmolStr>, index: usize) -> Self {
        Self {
            register: register.into(),
            index,
        }
    }

    /// The name of the register containing the unit.
    #[inline]
    pub fn register(&self) -> &str {
        &self.register
    }

    /// The index of the unit in its register.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A qubit in a [`Circuit`](crate::Circuit).
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display("{_0}")]
pub struct Qubit(UnitId);

/// A classical bit in a [`Circuit`](crate::Circuit).
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display("{_0}")]
pub struct Bit(UnitId);

impl Qubit {
    /// Create the qubit `register[index]`.
    pub fn new(register: impl Into<SmolStr>, index: usize) -> Self {
        Self(UnitId::new(register, index))
    }

    /// The qubit's identifier.
    pub fn id(&self) -> &UnitId {
        &self.0
    }
}

impl Bit {
    /// Create the bit `register[index]`.
    pub fn new(register: impl Into<SmolStr>, index: usize) -> Self {
        Self(UnitId::new(register, index))
    }

    /// The bit's identifier.
    pub fn id(&self) -> &UnitId {
        &self.0
    }
}

/// An ordered, named group of units allocated together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register<U> {
    name: SmolStr,
    units: Vec<U>,
}

/// A named register of qubits.
pub type QubitRegister = Register<Qubit>;
/// A named register of classical bits.
pub type BitRegister = Register<Bit>;

impl<U> Register<U> {
    /// The register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of units in the register.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the register has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The unit at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&U> {
        self.units.get(index)
    }

    /// Iterate over the units in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, U> {
        self.units.iter()
    }

    /// The units as a slice, in index order.
    pub fn as_slice(&self) -> &[U] {
        &self.units
    }
}

impl QubitRegister {
    pub(crate) fn new_qubits(name: SmolStr, size: usize) -> Self {
        let units = (0..size).map(|i| Qubit::new(name.clone(), i)).collect();
        Self { name, units }
    }
}

impl BitRegister {
    pub(crate) fn new_bits(name: SmolStr, size: usize) -> Self {
        let units = (0..size).map(|i| Bit::new(name.clone(), i)).collect();
        Self { name, units }
    }
}

impl<U> Index<usize> for Register<U> {
    type Output = U;

    fn index(&self, index: usize) -> &U {
        &self.units[index]
    }
}

impl<'a, U> IntoIterator for &'a Register<U> {
    type Item = &'a U;
    type IntoIter = std::slice::Iter<'a, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
