mod case;
mod inflect;
mod name;
mod pairs;

pub use case::{capitalize, fold_lower, fold_upper, split_words, variants, CaseVariantSet, VariantKey};
pub use inflect::{pluralize, singularize};
pub use name::{is_valid, Name};
pub use pairs::{Axis, NamePair, NamePairSet, ReplacementRules};
