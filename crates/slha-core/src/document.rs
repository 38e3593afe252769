//! In-memory model of a block-structured SLHA document.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SlhaError};

/// Integer tuple addressing an entry within a [`Block`].
///
/// Arity 0 is a scalar block (`ALPHA`), arity 1 a vector (`MASS`, `HMIX`) and
/// arity 2 a matrix (`NMIX`, `USQMIX`). Indices order lexicographically so
/// block iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Index(Vec<i32>);

impl Index {
    /// Creates an index from its raw components.
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    /// Index of a scalar entry.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Index of a vector entry.
    pub fn single(i: i32) -> Self {
        Self(vec![i])
    }

    /// Index of a matrix entry.
    pub fn pair(i: i32, j: i32) -> Self {
        Self(vec![i, j])
    }

    /// Number of integer components.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Raw integer components.
    pub fn values(&self) -> &[i32] {
        &self.0
    }

    /// Returns the component of a vector index.
    pub fn as_single(&self) -> Option<i32> {
        match self.0.as_slice() {
            [i] => Some(*i),
            _ => None,
        }
    }

    /// Returns the components of a matrix index.
    pub fn as_pair(&self) -> Option<(i32, i32)> {
        match self.0.as_slice() {
            [i, j] => Some((*i, *j)),
            _ => None,
        }
    }
}

impl From<i32> for Index {
    fn from(i: i32) -> Self {
        Self::single(i)
    }
}

impl From<(i32, i32)> for Index {
    fn from((i, j): (i32, i32)) -> Self {
        Self::pair(i, j)
    }
}

impl From<()> for Index {
    fn from(_: ()) -> Self {
        Self::scalar()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (pos, value) in self.0.iter().enumerate() {
            if pos > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

/// Numeric payload of a block entry with its optional annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Double precision value.
    pub value: f64,
    /// Free text annotation (the comment following `#` in the text format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Entry {
    /// Creates an entry without annotation.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            annotation: None,
        }
    }

    /// Creates an annotated entry.
    pub fn annotated(value: f64, annotation: impl Into<String>) -> Self {
        Self {
            value,
            annotation: Some(annotation.into()),
        }
    }
}

mod index_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Index;

    pub fn serialize<S, T>(map: &BTreeMap<Index, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<Index, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let pairs: Vec<(Index, T)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

/// Named, sparsely indexed table of numeric entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    #[serde(with = "index_pairs")]
    entries: BTreeMap<Index, Entry>,
    /// Non numeric payloads such as program names in `SPINFO`.
    #[serde(default, with = "index_pairs")]
    labels: BTreeMap<Index, String>,
}

impl Block {
    /// Creates an empty block; the name is upper-cased.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_ascii_uppercase(),
            scale: None,
            entries: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Builder variant attaching a renormalisation scale.
    pub fn with_scale(mut self, scale: Option<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Creates an `n x n` matrix block with every entry set to zero.
    pub fn zeros(name: impl AsRef<str>, n: i32) -> Self {
        let mut block = Self::new(name);
        for i in 1..=n {
            for j in 1..=n {
                block.set(Index::pair(i, j), 0.0);
            }
        }
        block
    }

    /// Creates an `n x n` identity matrix block.
    pub fn identity(name: impl AsRef<str>, n: i32) -> Self {
        let mut block = Self::zeros(name, n);
        for i in 1..=n {
            block.set(Index::pair(i, i), 1.0);
        }
        block
    }

    /// Upper-case block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renormalisation scale `Q`, if any.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Sets the renormalisation scale.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = Some(scale);
    }

    /// Numeric value stored at `index`.
    pub fn get(&self, index: impl Into<Index>) -> Option<f64> {
        self.entries.get(&index.into()).map(|entry| entry.value)
    }

    /// Full entry stored at `index`.
    pub fn entry(&self, index: impl Into<Index>) -> Option<&Entry> {
        self.entries.get(&index.into())
    }

    /// Stores a bare value, replacing any previous entry and its annotation.
    pub fn set(&mut self, index: impl Into<Index>, value: f64) {
        self.entries.insert(index.into(), Entry::new(value));
    }

    /// Stores a value together with its annotation.
    pub fn set_with_annotation(
        &mut self,
        index: impl Into<Index>,
        value: f64,
        annotation: impl Into<String>,
    ) {
        self.entries
            .insert(index.into(), Entry::annotated(value, annotation));
    }

    /// Stores a complete entry.
    pub fn set_entry(&mut self, index: impl Into<Index>, entry: Entry) {
        self.entries.insert(index.into(), entry);
    }

    /// Replaces the annotation of an existing entry. Returns `false` when the
    /// entry is absent.
    pub fn annotate(&mut self, index: impl Into<Index>, annotation: impl Into<String>) -> bool {
        match self.entries.get_mut(&index.into()) {
            Some(entry) => {
                entry.annotation = Some(annotation.into());
                true
            }
            None => false,
        }
    }

    /// Copies every entry and label of `other` into this block, replacing
    /// entries at the same index. The scale is taken from `other` when set.
    pub fn merge(&mut self, other: Block) {
        if other.scale.is_some() {
            self.scale = other.scale;
        }
        self.entries.extend(other.entries);
        self.labels.extend(other.labels);
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: impl Into<Index>) -> Option<Entry> {
        self.entries.remove(&index.into())
    }

    /// Iterates entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&Index, &Entry)> {
        self.entries.iter()
    }

    /// Number of numeric entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block holds neither numeric nor label entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.labels.is_empty()
    }

    /// Text label stored at `index`.
    pub fn label(&self, index: impl Into<Index>) -> Option<&str> {
        self.labels.get(&index.into()).map(String::as_str)
    }

    /// Stores a text label.
    pub fn set_label(&mut self, index: impl Into<Index>, label: impl Into<String>) {
        self.labels.insert(index.into(), label.into());
    }

    /// Iterates text labels in index order.
    pub fn labels(&self) -> impl Iterator<Item = (&Index, &str)> {
        self.labels.iter().map(|(index, label)| (index, label.as_str()))
    }
}

/// Single decay channel of a particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayChannel {
    /// Branching ratio.
    pub branching_ratio: f64,
    /// PDG codes of the daughters.
    pub daughters: Vec<i32>,
    /// Free text annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// Decay table entry of a particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decay {
    /// Total width in GeV.
    pub width: f64,
    /// Free text annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Listed decay channels.
    #[serde(default)]
    pub channels: Vec<DecayChannel>,
}

impl Decay {
    /// Creates a decay entry with no channels.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            annotation: None,
            channels: Vec::new(),
        }
    }
}

/// Collection of blocks keyed by name plus the decay table keyed by PDG code.
///
/// Blocks and decays keep their insertion order, which is the order the
/// writer emits them in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    blocks: IndexMap<String, Block>,
    #[serde(default)]
    decays: IndexMap<i32, Decay>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a block by name (case-insensitive).
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(&name.to_ascii_uppercase())
    }

    /// Mutable block lookup by name (case-insensitive).
    pub fn block_mut(&mut self, name: &str) -> Option<&mut Block> {
        self.blocks.get_mut(&name.to_ascii_uppercase())
    }

    /// Whether a block of that name exists.
    pub fn contains_block(&self, name: &str) -> bool {
        self.blocks.contains_key(&name.to_ascii_uppercase())
    }

    /// Returns the named block, creating an empty one first if needed.
    pub fn block_or_insert(&mut self, name: &str) -> &mut Block {
        let key = name.to_ascii_uppercase();
        self.blocks
            .entry(key)
            .or_insert_with_key(|key| Block::new(key))
    }

    /// Inserts a block, returning the one it replaced.
    pub fn insert_block(&mut self, block: Block) -> Option<Block> {
        self.blocks.insert(block.name().to_string(), block)
    }

    /// Merges a block into the one of the same name, inserting it when
    /// absent. See [`Block::merge`].
    pub fn merge_block(&mut self, block: Block) -> &mut Block {
        let target = self.block_or_insert(block.name());
        target.merge(block);
        target
    }

    /// Removes a block, keeping the order of the remaining ones.
    pub fn remove_block(&mut self, name: &str) -> Option<Block> {
        self.blocks.shift_remove(&name.to_ascii_uppercase())
    }

    /// Iterates blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Reads a single value.
    pub fn get(&self, block: &str, index: impl Into<Index>) -> Option<f64> {
        self.block(block).and_then(|block| block.get(index))
    }

    /// Writes a single value, creating the block when absent.
    pub fn set(&mut self, block: &str, index: impl Into<Index>, value: f64) {
        self.block_or_insert(block).set(index, value);
    }

    /// Annotates an existing entry.
    pub fn set_annotation(
        &mut self,
        block: &str,
        index: impl Into<Index>,
        annotation: impl Into<String>,
    ) -> Result<(), SlhaError> {
        let index = index.into();
        let found = self
            .block_mut(block)
            .map(|target| target.annotate(index.clone(), annotation))
            .unwrap_or(false);
        if found {
            Ok(())
        } else {
            Err(SlhaError::Document(
                ErrorInfo::new("missing-entry", "cannot annotate an absent entry")
                    .with_context("block", block.to_ascii_uppercase())
                    .with_context("index", &index),
            ))
        }
    }

    /// Sets the scale of an existing block.
    pub fn set_scale(&mut self, block: &str, scale: f64) -> Result<(), SlhaError> {
        match self.block_mut(block) {
            Some(target) => {
                target.set_scale(scale);
                Ok(())
            }
            None => Err(SlhaError::Document(
                ErrorInfo::new("missing-block", "cannot set the scale of an absent block")
                    .with_context("block", block.to_ascii_uppercase()),
            )),
        }
    }

    /// Mass of a particle as stored in `MASS`.
    pub fn mass(&self, pdg: i32) -> Option<f64> {
        self.get("MASS", pdg)
    }

    /// Iterates the decay table in document order.
    pub fn decays(&self) -> impl Iterator<Item = (i32, &Decay)> {
        self.decays.iter().map(|(pdg, decay)| (*pdg, decay))
    }

    /// Decay entry of a particle.
    pub fn decay(&self, pdg: i32) -> Option<&Decay> {
        self.decays.get(&pdg)
    }

    /// Mutable decay entry of a particle.
    pub fn decay_mut(&mut self, pdg: i32) -> Option<&mut Decay> {
        self.decays.get_mut(&pdg)
    }

    /// Inserts a decay entry, returning the one it replaced.
    pub fn insert_decay(&mut self, pdg: i32, decay: Decay) -> Option<Decay> {
        self.decays.insert(pdg, decay)
    }
}
