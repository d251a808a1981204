//! Category metadata codec.
//!
//! The translation platform exposes a free-text `categories` field on every
//! resource. locsync stores a flat key/value map there (most importantly the
//! `branch` a resource belongs to) as `key:value` pairs separated by spaces:
//!
//! ```text
//! branch:heads/my_branch author:ci
//! ```
//!
//! Keys must not contain `:` or whitespace and values must not contain
//! whitespace; such input does not round-trip.

use std::collections::BTreeMap;

/// Flat category metadata, keyed by category name.
pub type Categories = BTreeMap<String, String>;

/// Separator between `key:value` pairs.
pub const PAIR_SEPARATOR: char = ' ';

/// Separator between a key and its value.
pub const KEY_VALUE_SEPARATOR: char = ':';

/// The category key that records a resource's branch.
pub const BRANCH_KEY: &str = "branch";

/// Encode categories into a single category string.
///
/// Pairs are emitted in key order, so encoding is deterministic.
pub fn encode(categories: &Categories) -> String {
    let mut out = String::new();
    for (key, value) in categories {
        if !out.is_empty() {
            out.push(PAIR_SEPARATOR);
        }
        out.push_str(key);
        out.push(KEY_VALUE_SEPARATOR);
        out.push_str(value);
    }
    out
}

/// Decode a category string.
///
/// Blank input yields an empty map. Each whitespace-separated token is split
/// at its first `:`; tokens without one are ignored.
pub fn decode(encoded: &str) -> Categories {
    let mut categories = Categories::new();
    decode_into(encoded, &mut categories);
    categories
}

/// Decode several category strings into one map. Later strings win.
///
/// The platform returns categories as a list; each element may itself hold
/// several pairs.
pub fn decode_all<'a, I>(encoded: I) -> Categories
where
    I: IntoIterator<Item = &'a str>,
{
    let mut categories = Categories::new();
    for item in encoded {
        decode_into(item, &mut categories);
    }
    categories
}

fn decode_into(encoded: &str, categories: &mut Categories) {
    for token in encoded.split_whitespace() {
        if let Some((key, value)) = token.split_once(KEY_VALUE_SEPARATOR) {
            categories.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cats(pairs: &[(&str, &str)]) -> Categories {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decode_blank_is_empty() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
    }

    #[test]
    fn encode_empty_is_blank() {
        assert_eq!(encode(&Categories::new()), "");
    }

    #[test]
    fn encode_is_key_ordered() {
        let c = cats(&[("zeta", "1"), ("alpha", "2")]);
        assert_eq!(encode(&c), "alpha:2 zeta:1");
    }

    #[test]
    fn decode_splits_at_first_colon() {
        let c = decode("branch:heads/a:b");
        assert_eq!(c.get("branch").map(String::as_str), Some("heads/a:b"));
    }

    #[test]
    fn decode_ignores_tokens_without_separator() {
        let c = decode("legacy branch:heads/main");
        assert_eq!(c, cats(&[("branch", "heads/main")]));
    }

    #[test]
    fn decode_all_later_entries_win() {
        let c = decode_all(["branch:heads/a owner:x", "branch:heads/b"]);
        assert_eq!(c, cats(&[("branch", "heads/b"), ("owner", "x")]));
    }

    #[test]
    fn empty_value_round_trips() {
        let c = cats(&[("branch", "")]);
        assert_eq!(decode(&encode(&c)), c);
    }

    proptest! {
        #[test]
        fn round_trip_without_delimiters(
            map in proptest::collection::btree_map("[a-z_]{1,10}", "[A-Za-z0-9/_.:-]{0,16}", 0..8)
        ) {
            prop_assert_eq!(decode(&encode(&map)), map);
        }
    }
}
