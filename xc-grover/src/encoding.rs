//! Exact Cover instances: the universe to cover, the subsets covering it, and
//! the providers that produce them.
//!
//! Translating a concrete problem (a puzzle, a tiling, ...) into an Exact
//! Cover instance is the job of an [`ExactCoverEncoding`] provider. A provider
//! exposes two subset collections for the same universe, selected with
//! [`Encoding`]. [`ExactCoverProblem`] is a ready-made provider holding
//! explicit collections, which can be loaded from JSON.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::config::ConfigError;
use crate::estimate::ProblemSize;

/// Selection between the two subset collections of an encoding provider.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One-hot subsets.
    #[default]
    Simple,
    /// Pattern-based subsets.
    Pattern,
}

impl Encoding {
    /// The subset collection this encoding selects from `provider`.
    pub fn subsets<P: ExactCoverEncoding + ?Sized>(
        self,
        provider: &P,
    ) -> &SubsetCollection<P::Element> {
        match self {
            Encoding::Simple => provider.simple_subsets(),
            Encoding::Pattern => provider.pattern_subsets(),
        }
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::iter()
            .find(|&enc| <&'static str>::from(enc) == s)
            .ok_or_else(|| ConfigError::UnknownEncoding {
                value: s.to_string(),
            })
    }
}

/// A translation of a problem into Exact Cover form.
pub trait ExactCoverEncoding {
    /// The type of the universe elements.
    type Element: Clone + Eq + Hash + Debug;

    /// The elements to cover.
    fn universe(&self) -> &Universe<Self::Element>;

    /// The one-hot subset collection.
    fn simple_subsets(&self) -> &SubsetCollection<Self::Element>;

    /// The pattern-based subset collection.
    fn pattern_subsets(&self) -> &SubsetCollection<Self::Element>;

    /// The number of valid covers, if known.
    fn num_solutions(&self) -> Option<f64> {
        None
    }
}

/// An ordered set of distinct elements to cover.
///
/// The position of an element is the index of its counter register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Eq + Hash + Debug + Deserialize<'de>"
))]
pub struct Universe<T: Eq + Hash> {
    elements: IndexSet<T>,
}

impl<T: Eq + Hash + Debug> Universe<T> {
    /// Create a universe from its elements, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an element is repeated.
    pub fn try_new(elements: impl IntoIterator<Item = T>) -> Result<Self, ConfigError> {
        let mut set = IndexSet::new();
        for element in elements {
            if set.contains(&element) {
                return Err(ConfigError::DuplicateElement {
                    element: format!("{element:?}"),
                });
            }
            set.insert(element);
        }
        Ok(Self { elements: set })
    }
}

impl<T: Eq + Hash> Universe<T> {
    /// The number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the universe has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The position of `element`, if it is part of the universe.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements.get_index_of(element)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.elements.iter()
    }
}

impl<T: Eq + Hash + Debug> TryFrom<Vec<T>> for Universe<T> {
    type Error = ConfigError;

    fn try_from(elements: Vec<T>) -> Result<Self, Self::Error> {
        Self::try_new(elements)
    }
}

impl<T: Eq + Hash> From<Universe<T>> for Vec<T> {
    fn from(universe: Universe<T>) -> Self {
        universe.elements.into_iter().collect()
    }
}

/// Named subsets of a universe, in enumeration order.
///
/// The position of a subset is the index of its selection qubit. Elements
/// covered by a subset keep their insertion order; repeated elements are
/// counted once.
///
/// Deserialized from a map of identifiers to element lists; a repeated
/// identifier is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct SubsetCollection<T: Eq + Hash> {
    subsets: IndexMap<String, IndexSet<T>>,
}

impl<'de, T> Deserialize<'de> for SubsetCollection<T>
where
    T: Eq + Hash + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SubsetsVisitor<T>(PhantomData<T>);

        impl<'de, T: Eq + Hash + Deserialize<'de>> Visitor<'de> for SubsetsVisitor<T> {
            type Value = SubsetCollection<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from subset identifiers to element lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut subsets = SubsetCollection::new();
                while let Some((name, elements)) = map.next_entry::<String, Vec<T>>()? {
                    subsets
                        .insert(name, elements)
                        .map_err(<A::Error as de::Error>::custom)?;
                }
                Ok(subsets)
            }
        }

        deserializer.deserialize_map(SubsetsVisitor(PhantomData))
    }
}

impl<T: Eq + Hash> Default for SubsetCollection<T> {
    fn default() -> Self {
        Self {
            subsets: IndexMap::new(),
        }
    }
}

impl<T: Eq + Hash> SubsetCollection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subset after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a subset with the same identifier exists.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.subsets.contains_key(&name) {
            return Err(ConfigError::DuplicateSubset { subset: name });
        }
        self.subsets.insert(name, elements.into_iter().collect());
        Ok(())
    }

    /// The number of subsets.
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// Whether the collection has no subsets.
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Iterate over the subsets and their covered elements, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &IndexSet<T>)> + '_ {
        self.subsets.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// The number of elements covered by each subset, in order.
    pub fn covering_sizes(&self) -> Vec<usize> {
        self.subsets.values().map(IndexSet::len).collect()
    }
}

/// A subset collection resolved against its universe: each subset is
/// replaced by the universe positions of the elements it covers.
///
/// This is the validated instance the circuit builders work on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverMap {
    u_size: usize,
    names: Vec<String>,
    covers: Vec<Vec<usize>>,
}

impl CoverMap {
    /// Resolve `subsets` against `universe`.
    ///
    /// # Errors
    ///
    /// Returns an error if a subset covers an element missing from the
    /// universe.
    pub fn try_new<T: Eq + Hash + Debug>(
        universe: &Universe<T>,
        subsets: &SubsetCollection<T>,
    ) -> Result<Self, ConfigError> {
        let mut names = Vec::with_capacity(subsets.len());
        let mut covers = Vec::with_capacity(subsets.len());
        for (name, elements) in subsets.iter() {
            let cover = elements
                .iter()
                .map(|e| {
                    universe
                        .index_of(e)
                        .ok_or_else(|| ConfigError::UnknownElement {
                            subset: name.to_string(),
                            element: format!("{e:?}"),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            names.push(name.to_string());
            covers.push(cover);
        }
        Ok(Self {
            u_size: universe.len(),
            names,
            covers,
        })
    }

    /// The number of subsets.
    #[inline]
    pub fn s_size(&self) -> usize {
        self.covers.len()
    }

    /// The number of universe elements.
    #[inline]
    pub fn u_size(&self) -> usize {
        self.u_size
    }

    /// The subset identifiers, in subset-register order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// For each subset, the universe positions it covers, in the subset's
    /// enumeration order.
    pub fn covers(&self) -> &[Vec<usize>] {
        &self.covers
    }

    /// The size parameters used by the resource estimator.
    pub fn problem_size(&self) -> ProblemSize {
        ProblemSize::new(self.u_size, self.covers.iter().map(Vec::len).collect())
    }
}

/// An Exact Cover instance given by explicit subset collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Eq + Hash + Debug + Deserialize<'de>"
))]
pub struct ExactCoverProblem<T: Eq + Hash> {
    /// The elements to cover.
    pub universe: Universe<T>,
    /// The one-hot subset collection.
    #[serde(rename = "subsets")]
    pub simple_subsets: SubsetCollection<T>,
    /// The pattern-based subset collection. Empty if not given.
    #[serde(default)]
    pub pattern_subsets: SubsetCollection<T>,
    /// The known number of valid covers.
    #[serde(default)]
    pub num_solutions: Option<f64>,
}

impl<T: Eq + Hash> ExactCoverProblem<T> {
    /// Create a problem with a single (simple) subset collection.
    pub fn new(universe: Universe<T>, subsets: SubsetCollection<T>) -> Self {
        Self {
            universe,
            simple_subsets: subsets,
            pattern_subsets: SubsetCollection::new(),
            num_solutions: None,
        }
    }

    /// Set the pattern-based subset collection.
    pub fn with_pattern_subsets(mut self, subsets: SubsetCollection<T>) -> Self {
        self.pattern_subsets = subsets;
        self
    }

    /// Set the known number of valid covers.
    pub fn with_num_solutions(mut self, num_solutions: f64) -> Self {
        self.num_solutions = Some(num_solutions);
        self
    }
}

impl<T: Clone + Eq + Hash + Debug> ExactCoverEncoding for ExactCoverProblem<T> {
    type Element = T;

    fn universe(&self) -> &Universe<T> {
        &self.universe
    }

    fn simple_subsets(&self) -> &SubsetCollection<T> {
        &self.simple_subsets
    }

    fn pattern_subsets(&self) -> &SubsetCollection<T> {
        &self.pattern_subsets
    }

    fn num_solutions(&self) -> Option<f64> {
        self.num_solutions
    }
}
