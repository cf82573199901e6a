use crate::names::ReplacementRules;

/// Replace every occurrence of each rule's source with its destination,
/// rule by rule, in list order.
///
/// The list is longest-source-first, so a plural that contains its singular
/// is consumed whole before the singular rule runs. Used for path strings and
/// file contents alike.
pub fn apply(text: &str, rules: &ReplacementRules) -> String {
    apply_counted(text, rules).0
}

/// Like [`apply`], also returning how many occurrences were replaced.
pub fn apply_counted(text: &str, rules: &ReplacementRules) -> (String, usize) {
    rules.iter().fold((text.to_string(), 0), |(acc, count), rule| {
        let hits = acc.matches(rule.source.as_str()).count();
        if hits == 0 {
            (acc, count)
        } else {
            (acc.replace(&rule.source, &rule.destination), count + hits)
        }
    })
}

/// [`apply_counted`] over raw file contents. Non-UTF-8 contents are
/// substituted byte-wise with the same semantics.
pub fn apply_bytes(bytes: &[u8], rules: &ReplacementRules) -> (Vec<u8>, usize) {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let (out, count) = apply_counted(text, rules);
            (out.into_bytes(), count)
        }
        Err(_) => rules.iter().fold((bytes.to_vec(), 0), |(acc, count), rule| {
            let (out, hits) = replace_bytes(&acc, rule.source.as_bytes(), rule.destination.as_bytes());
            (out, count + hits)
        }),
    }
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if needle.is_empty() || needle.len() > haystack.len() {
        return (haystack.to_vec(), 0);
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut hits = 0;
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
            hits += 1;
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    (out, hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{variants, Axis, NamePairSet};
    use pretty_assertions::assert_eq;

    fn rules(src_s: &str, src_p: &str, dst_s: &str, dst_p: &str) -> ReplacementRules {
        let plural = NamePairSet::pair(Axis::Plural, src_p, dst_p).unwrap();
        let singular = NamePairSet::pair(Axis::Singular, src_s, dst_s).unwrap();
        ReplacementRules::build(&plural, &singular)
    }

    #[test]
    fn test_apply_replaces_every_variant() {
        let rules = rules("boilerExample", "boilerExamples", "widgetItem", "widgetItems");
        let text = "class BoilerExample {}\n# Boiler Examples\nconst BOILER_DIR = 'boiler-examples/boiler-example'";
        assert_eq!(
            apply(text, &rules),
            "class WidgetItem {}\n# Widget Items\nconst BOILER_DIR = 'widget-items/widget-item'"
        );
    }

    #[test]
    fn test_plural_consumed_before_singular() {
        let rules = rules("cat", "cats", "mouse", "mice");
        let text = "cats and a cat; Cats vs Cat; CATS";
        assert_eq!(apply(text, &rules), "mice and a mouse; Mice vs Mouse; MICE");

        // shortest-first would let the singular rule eat into the plural
        let naive = rules
            .iter()
            .rev()
            .fold(text.to_string(), |acc, r| acc.replace(&r.source, &r.destination));
        assert!(naive.contains("mouses"));
    }

    #[test]
    fn test_round_trip_over_disjoint_names() {
        let forward = rules("boilerExample", "boilerExamples", "widgetItem", "widgetItems");
        let mut parts = Vec::new();
        for name in ["boilerExample", "boilerExamples"] {
            parts.extend(variants(name).iter().map(|(_, v)| v.to_string()));
        }
        let original = parts.join(" | ");

        let there = apply(&original, &forward);
        assert!(!there.contains("oiler"));
        assert_eq!(apply(&there, &forward.inverse()), original);
    }

    #[test]
    fn test_apply_counted() {
        let rules = rules("widget", "widgets", "gadget", "gadgets");
        let (out, count) = apply_counted("widget widgets Widget", &rules);
        assert_eq!(out, "gadget gadgets Gadget");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_apply_bytes_handles_binary() {
        let rules = rules("widget", "widgets", "gadget", "gadgets");
        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(b"widgets:widget");
        bytes.push(0x80);

        let (out, count) = apply_bytes(&bytes, &rules);
        let mut expected = vec![0xff, 0xfe];
        expected.extend_from_slice(b"gadgets:gadget");
        expected.push(0x80);
        assert_eq!(out, expected);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_no_match_is_identity() {
        let rules = rules("widget", "widgets", "gadget", "gadgets");
        assert_eq!(apply("nothing here", &rules), "nothing here");
        assert_eq!(apply("", &rules), "");
    }
}
