use serde::Serialize;
use std::collections::HashSet;

use super::case::{variants, VariantKey};
use super::name::Name;
use crate::core::Result;

/// Which of the two names of an entity a rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Plural,
    Singular,
}

/// One variant of a source name bound to the same variant of a target name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamePair {
    pub axis: Axis,
    pub key: VariantKey,
    pub source: String,
    pub destination: String,
}

/// All variant pairs of one axis, in canonical key order.
#[derive(Debug, Clone)]
pub struct NamePairSet {
    pub axis: Axis,
    pairs: Vec<NamePair>,
}

impl NamePairSet {
    /// Pair every variant of `source` with the same variant of `target`.
    pub fn pair(axis: Axis, source: &str, target: &str) -> Result<Self> {
        let (source_flag, target_flag) = match axis {
            Axis::Plural => ("--source-plural", "--plural"),
            Axis::Singular => ("--source-singular", "--singular"),
        };
        let source = Name::parse(source, source_flag)?;
        let target = Name::parse(target, target_flag)?;
        Ok(Self::from_names(axis, &source, &target))
    }

    pub fn from_names(axis: Axis, source: &Name, target: &Name) -> Self {
        let src = variants(source.as_str());
        let dst = variants(target.as_str());

        let pairs = src
            .iter()
            .map(|(key, value)| NamePair {
                axis,
                key,
                source: value.to_string(),
                destination: dst.get(key).to_string(),
            })
            .collect();

        Self { axis, pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamePair> {
        self.pairs.iter()
    }
}

/// The ordered replacement list of a run.
///
/// Sorted by descending source length so a longer name is consumed before a
/// shorter one that is a substring of it. Ties go to the plural axis, then to
/// joined keys (camel and title forms) over kebab and space forms, then to
/// canonical key order. Source strings are unique: when two keys collapse to
/// the same string, the pair sorted first keeps it, so a one-word `Widget`
/// maps to `GadgetPart` rather than `Gadget Part`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ReplacementRules {
    rules: Vec<NamePair>,
}

impl ReplacementRules {
    pub fn build(plural: &NamePairSet, singular: &NamePairSet) -> Self {
        let all = plural.iter().chain(singular.iter()).cloned().collect();
        Self {
            rules: longest_first(all),
        }
    }

    /// The reverse mapping: every destination becomes a source.
    pub fn inverse(&self) -> Self {
        let flipped = self
            .rules
            .iter()
            .map(|p| NamePair {
                axis: p.axis,
                key: p.key,
                source: p.destination.clone(),
                destination: p.source.clone(),
            })
            .collect();
        Self {
            rules: longest_first(flipped),
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &NamePair> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn longest_first(mut rules: Vec<NamePair>) -> Vec<NamePair> {
    rules.sort_by(|a, b| {
        b.source
            .len()
            .cmp(&a.source.len())
            .then(a.axis.cmp(&b.axis))
            .then(b.key.is_joined().cmp(&a.key.is_joined()))
            .then(a.key.cmp(&b.key))
    });

    let mut seen = HashSet::new();
    rules.retain(|pair| seen.insert(pair.source.clone()));
    rules
}
