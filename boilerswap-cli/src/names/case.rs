use serde::Serialize;
use std::fmt;

/// Casing style of a derived name.
///
/// Declaration order is the canonical key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKey {
    CamelCase,
    KebabCase,
    SpaceCase,
    TitleCase,
    CamelCaseLower,
    CamelCaseUpper,
    KebabCaseLower,
    KebabCaseUpper,
    SpaceCaseLower,
    SpaceCaseUpper,
    TitleCaseLower,
    TitleCaseUpper,
}

impl VariantKey {
    pub const ALL: [VariantKey; 12] = [
        VariantKey::CamelCase,
        VariantKey::KebabCase,
        VariantKey::SpaceCase,
        VariantKey::TitleCase,
        VariantKey::CamelCaseLower,
        VariantKey::CamelCaseUpper,
        VariantKey::KebabCaseLower,
        VariantKey::KebabCaseUpper,
        VariantKey::SpaceCaseLower,
        VariantKey::SpaceCaseUpper,
        VariantKey::TitleCaseLower,
        VariantKey::TitleCaseUpper,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariantKey::CamelCase => "camelCase",
            VariantKey::KebabCase => "kebabCase",
            VariantKey::SpaceCase => "spaceCase",
            VariantKey::TitleCase => "titleCase",
            VariantKey::CamelCaseLower => "camelCaseLower",
            VariantKey::CamelCaseUpper => "camelCaseUpper",
            VariantKey::KebabCaseLower => "kebabCaseLower",
            VariantKey::KebabCaseUpper => "kebabCaseUpper",
            VariantKey::SpaceCaseLower => "spaceCaseLower",
            VariantKey::SpaceCaseUpper => "spaceCaseUpper",
            VariantKey::TitleCaseLower => "titleCaseLower",
            VariantKey::TitleCaseUpper => "titleCaseUpper",
        }
    }

    /// Whether values of this key are written without word separators.
    pub fn is_joined(self) -> bool {
        matches!(
            self,
            VariantKey::CamelCase
                | VariantKey::TitleCase
                | VariantKey::CamelCaseLower
                | VariantKey::CamelCaseUpper
                | VariantKey::TitleCaseLower
                | VariantKey::TitleCaseUpper
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every casing form of one base name, keyed by [`VariantKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseVariantSet {
    values: [String; 12],
}

impl CaseVariantSet {
    pub fn get(&self, key: VariantKey) -> &str {
        &self.values[key.index()]
    }

    pub fn camel_case(&self) -> &str {
        self.get(VariantKey::CamelCase)
    }

    /// Variants in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (VariantKey, &str)> + '_ {
        VariantKey::ALL
            .iter()
            .map(move |&key| (key, self.values[key.index()].as_str()))
    }
}

/// Derive all casing forms of `name`.
pub fn variants(name: &str) -> CaseVariantSet {
    let words = split_words(name);

    let camel = name.to_string();
    let kebab = words
        .iter()
        .map(|w| fold_lower(w))
        .collect::<Vec<_>>()
        .join("-");
    let space = words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ");
    let title = space.replace(' ', "");

    let values = [
        fold_lower(&camel),
        fold_upper(&camel),
        fold_lower(&kebab),
        fold_upper(&kebab),
        fold_lower(&space),
        fold_upper(&space),
        fold_lower(&title),
        fold_upper(&title),
    ];
    let [camel_lower, camel_upper, kebab_lower, kebab_upper, space_lower, space_upper, title_lower, title_upper] =
        values;

    CaseVariantSet {
        values: [
            camel,
            kebab,
            space,
            title,
            camel_lower,
            camel_upper,
            kebab_lower,
            kebab_upper,
            space_lower,
            space_upper,
            title_lower,
            title_upper,
        ],
    }
}

/// Split an identifier into words.
///
/// A boundary falls before an uppercase letter that follows a lowercase one,
/// and before the last capital of an uppercase run that is followed by a
/// lowercase letter (`myHTTPServer` -> `my`, `HTTP`, `Server`). `-`, `_` and
/// whitespace separate words and are dropped.
pub fn split_words(input: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if is_separator(c) {
            if let Some(s) = start.take() {
                words.push(&input[s..pos]);
            }
            continue;
        }

        let Some(s) = start else {
            start = Some(pos);
            continue;
        };

        // start is only set while the previous char is part of a word
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, n)| n);
        let lower_to_upper = prev.is_ascii_lowercase() && c.is_ascii_uppercase();
        let acronym_end = prev.is_ascii_uppercase()
            && c.is_ascii_uppercase()
            && next.is_some_and(|n| n.is_ascii_lowercase());

        if lower_to_upper || acronym_end {
            words.push(&input[s..pos]);
            start = Some(pos);
        }
    }

    if let Some(s) = start {
        words.push(&input[s..]);
    }

    words
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}

/// Lowercase fold. Only ASCII letters change; names are ASCII by validation
/// and anything else passes through untouched.
pub fn fold_lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Uppercase fold, ASCII only (see [`fold_lower`]).
pub fn fold_upper(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// Uppercase the first letter, keep the rest as written.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_multi_word_variants() {
        let v = variants("boilerExample");
        assert_eq!(v.get(VariantKey::CamelCase), "boilerExample");
        assert_eq!(v.get(VariantKey::KebabCase), "boiler-example");
        assert_eq!(v.get(VariantKey::SpaceCase), "Boiler Example");
        assert_eq!(v.get(VariantKey::TitleCase), "BoilerExample");
        assert_eq!(v.get(VariantKey::CamelCaseLower), "boilerexample");
        assert_eq!(v.get(VariantKey::CamelCaseUpper), "BOILEREXAMPLE");
        assert_eq!(v.get(VariantKey::KebabCaseLower), "boiler-example");
        assert_eq!(v.get(VariantKey::KebabCaseUpper), "BOILER-EXAMPLE");
        assert_eq!(v.get(VariantKey::SpaceCaseLower), "boiler example");
        assert_eq!(v.get(VariantKey::SpaceCaseUpper), "BOILER EXAMPLE");
        assert_eq!(v.get(VariantKey::TitleCaseLower), "boilerexample");
        assert_eq!(v.get(VariantKey::TitleCaseUpper), "BOILEREXAMPLE");
    }

    #[test]
    fn test_single_word_variants() {
        let v = variants("widget");
        assert_eq!(v.camel_case(), "widget");
        assert_eq!(v.get(VariantKey::KebabCase), "widget");
        assert_eq!(v.get(VariantKey::SpaceCase), "Widget");
        assert_eq!(v.get(VariantKey::TitleCase), "Widget");
        assert_eq!(v.get(VariantKey::TitleCaseUpper), "WIDGET");
    }

    #[test]
    fn test_camel_case_is_identity_and_nothing_empty() {
        for name in ["ab", "cat", "widgetItem", "myHTTPServer", "aBcDe", "someLongEntityName"] {
            let v = variants(name);
            assert_eq!(v.camel_case(), name);
            for (key, value) in v.iter() {
                assert!(!value.is_empty(), "{} of {} is empty", key, name);
            }
        }
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("widgetItem"), vec!["widget", "Item"]);
        assert_eq!(split_words("myHTTPServer"), vec!["my", "HTTP", "Server"]);
        assert_eq!(split_words("aBcDe"), vec!["a", "Bc", "De"]);
        assert_eq!(split_words("kebab-case_name here"), vec!["kebab", "case", "name", "here"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_acronym_variants() {
        let v = variants("myHTTPServer");
        assert_eq!(v.get(VariantKey::KebabCase), "my-http-server");
        assert_eq!(v.get(VariantKey::SpaceCase), "My HTTP Server");
        assert_eq!(v.get(VariantKey::TitleCase), "MyHTTPServer");
    }

    #[test]
    fn test_folding_is_ascii_only() {
        assert_eq!(fold_lower("Boiler Example"), "boiler example");
        assert_eq!(fold_upper("boiler-example"), "BOILER-EXAMPLE");
        // no locale surprises: dotless i and sharp s are left alone
        assert_eq!(fold_upper("straße"), "STRAßE");
        assert_eq!(fold_lower("İx"), "İx");
    }

    #[test]
    fn test_keys_iterate_in_canonical_order() {
        let keys: Vec<VariantKey> = variants("widget").iter().map(|(k, _)| k).collect();
        assert_eq!(keys, VariantKey::ALL.to_vec());
        assert_eq!(VariantKey::KebabCaseUpper.to_string(), "kebabCaseUpper");
    }
}
