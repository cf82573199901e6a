//! Rule-based English inflection for entity names.
//!
//! Only the last word of a camelCase name is inflected: `widgetItem` becomes
//! `widgetItems`, `dataCategory` becomes `dataCategories`.

use super::case::{capitalize, split_words};

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "moose",
    "news",
    "metadata",
];

/// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("criterion", "criteria"),
    ("datum", "data"),
];

pub fn pluralize(name: &str) -> String {
    inflect_last_word(name, plural_of)
}

pub fn singularize(name: &str) -> String {
    inflect_last_word(name, singular_of)
}

fn inflect_last_word(name: &str, inflect: fn(&str) -> String) -> String {
    let Some(last) = split_words(name).last().copied() else {
        return name.to_string();
    };
    let Some(start) = name.rfind(last) else {
        return name.to_string();
    };
    let end = start + last.len();

    let lower = last.to_ascii_lowercase();
    let mut inflected = inflect(&lower);
    if last.starts_with(|c: char| c.is_ascii_uppercase()) {
        inflected = capitalize(&inflected);
    }

    format!("{}{}{}", &name[..start], inflected, &name[end..])
}

fn plural_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == word) {
        return plural.to_string();
    }
    if IRREGULAR.iter().any(|(_, p)| *p == word) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{stem}ses");
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    if word.ends_with(['s', 'x', 'z']) || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{word}es");
    }
    format!("{word}s")
}

fn singular_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, p)| *p == word) {
        return singular.to_string();
    }
    if IRREGULAR.iter().any(|(s, _)| *s == word) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }
    word.to_string()
}
