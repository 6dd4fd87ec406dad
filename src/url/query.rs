//! Order-preserving query-string parsing and encoding.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::codec::{percent_decode_plus, percent_encode_plus};
use super::omdict::OrderedMultiDict;

/// Characters never percent-encoded in serialized keys.
pub const SAFE_KEY_CHARS: &str = "/?:@-._~!$'()*,";

/// Characters never percent-encoded in serialized values.
pub const SAFE_VALUE_CHARS: &str = "/?:@-._~!$'()*,=";

static VALID_ENCODED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w\-.~:@!$&'()*+,;/?]|%[0-9a-fA-F]{2})*$").expect("valid key regex")
});

static VALID_ENCODED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w\-.~:@!$&'()*+,;/?=]|%[0-9a-fA-F]{2})*$").expect("valid value regex")
});

/// Input forms accepted by [`Query::load`], [`Query::add`], and
/// [`Query::set`].
#[derive(Debug, Clone)]
pub enum QueryItems {
    /// A raw query string, parsed and percent-decoded.
    Raw(String),
    /// Already-decoded pairs; a `None` value round-trips as a bare key.
    Pairs(Vec<(String, Option<String>)>),
}

impl From<&str> for QueryItems {
    fn from(query: &str) -> Self {
        Self::Raw(query.to_string())
    }
}

impl From<String> for QueryItems {
    fn from(query: String) -> Self {
        Self::Raw(query)
    }
}

impl From<Vec<(String, Option<String>)>> for QueryItems {
    fn from(pairs: Vec<(String, Option<String>)>) -> Self {
        Self::Pairs(pairs)
    }
}

impl From<Vec<(String, String)>> for QueryItems {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Pairs(pairs.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }
}

impl From<Vec<(&str, &str)>> for QueryItems {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .collect(),
        )
    }
}

impl From<Vec<(&str, Option<&str>)>> for QueryItems {
    fn from(pairs: Vec<(&str, Option<&str>)>) -> Self {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        )
    }
}

impl From<&OrderedMultiDict<String, Option<String>>> for QueryItems {
    fn from(params: &OrderedMultiDict<String, Option<String>>) -> Self {
        Self::Pairs(params.allitems().to_vec())
    }
}

/// A URL query string as an insertion-ordered multi-valued parameter store.
///
/// Parsing splits pairs on `&` and `;` and percent-decodes with
/// `+`-as-space; a pair with no `=` at all keeps the value `None`, so `?key`
/// and `?key=` stay distinguishable. In strict mode, improperly encoded
/// pairs are reported through a warning and decoded best-effort.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: OrderedMultiDict<String, Option<String>>,
    strict: bool,
}

impl Query {
    /// An empty, non-strict query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `query` best-effort.
    pub fn parse(query: &str) -> Self {
        let mut q = Self::new();
        q.load(query);
        q
    }

    /// Like [`Query::parse`], but each raw pair is validated against the
    /// RFC-3986-style character classes and violations are warned about.
    pub fn parse_strict(query: &str) -> Self {
        let mut q = Self { params: OrderedMultiDict::new(), strict: true };
        q.load(query);
        q
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// The backing parameter store.
    pub fn params(&self) -> &OrderedMultiDict<String, Option<String>> {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Replaces all parameters with `items`.
    pub fn load(&mut self, items: impl Into<QueryItems>) -> &mut Self {
        let items = self.normalized(items.into());
        self.params.load(items);
        self
    }

    /// Appends each pair in `items` at the end of the current order.
    pub fn add(&mut self, items: impl Into<QueryItems>) -> &mut Self {
        for (key, value) in self.normalized(items.into()) {
            self.params.add(key, value);
        }
        self
    }

    /// Adopts every pair in `items`, replacing all existing values for the
    /// keys it mentions (see [`OrderedMultiDict::updateall`]).
    pub fn set(&mut self, items: impl Into<QueryItems>) -> &mut Self {
        let items = self.normalized(items.into());
        self.params.updateall(items);
        self
    }

    /// Serializes pairs in current order: `None` values as bare keys,
    /// everything else percent-encoded against the safe sets, joined by `&`.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in self.params.iter() {
            let quoted_key = percent_encode_plus(key, SAFE_KEY_CHARS);
            match value {
                Some(value) => {
                    let quoted_value = percent_encode_plus(value, SAFE_VALUE_CHARS);
                    pairs.push(format!("{quoted_key}={quoted_value}"));
                }
                None => pairs.push(quoted_key),
            }
        }
        pairs.join("&")
    }

    fn normalized(&self, items: QueryItems) -> Vec<(String, Option<String>)> {
        match items {
            QueryItems::Raw(query) => self.extract_items(&query),
            QueryItems::Pairs(pairs) => pairs,
        }
    }

    fn extract_items(&self, query: &str) -> Vec<(String, Option<String>)> {
        let mut items = Vec::new();
        for pair in query.split('&').flat_map(|s| s.split(';')) {
            if pair.is_empty() {
                continue;
            }
            if self.strict {
                check_encoded_pair(query, pair);
            }
            match pair.split_once('=') {
                Some((key, value)) => {
                    items.push((percent_decode_plus(key), Some(percent_decode_plus(value))));
                }
                None => items.push((percent_decode_plus(pair), None)),
            }
        }
        items
    }
}

fn check_encoded_pair(query: &str, pair: &str) {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    if !VALID_ENCODED_KEY.is_match(key) || !VALID_ENCODED_VALUE.is_match(value) {
        tracing::warn!(
            query,
            pair,
            "improperly encoded query string; proceeding with best-effort decoding"
        );
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(query: &Query) -> Vec<(String, Option<String>)> {
        query.params().allitems().to_vec()
    }

    fn pair(key: &str, value: &str) -> (String, Option<String>) {
        (key.to_string(), Some(value.to_string()))
    }

    #[test]
    fn parse_preserves_order_and_duplicates() {
        let q = Query::parse("a=1&b=2&a=3");
        assert_eq!(items(&q), [pair("a", "1"), pair("b", "2"), pair("a", "3")]);
    }

    #[test]
    fn parse_semicolon_delimiter() {
        let q = Query::parse("a=1;b=2&c=3");
        assert_eq!(items(&q), [pair("a", "1"), pair("b", "2"), pair("c", "3")]);
    }

    #[test]
    fn parse_bare_key_is_none_value() {
        let q = Query::parse("flag&key=");
        assert_eq!(
            items(&q),
            [
                ("flag".to_string(), None),
                ("key".to_string(), Some(String::new())),
            ]
        );
    }

    #[test]
    fn parse_decodes_plus_and_escapes() {
        let q = Query::parse("full+name=benjamin%20yan&city=s%C3%A3o");
        assert_eq!(items(&q), [pair("full name", "benjamin yan"), pair("city", "são")]);
    }

    #[test]
    fn parse_skips_empty_pairs() {
        let q = Query::parse("a=1&&b=2&");
        assert_eq!(items(&q), [pair("a", "1"), pair("b", "2")]);
    }

    #[test]
    fn parse_empty_is_empty() {
        assert!(Query::parse("").is_empty());
    }

    #[test]
    fn encode_round_trips_simple_pairs() {
        let q = Query::parse("title=benjamin&age=27");
        assert_eq!(q.encode(), "title=benjamin&age=27");
    }

    #[test]
    fn encode_bare_key_has_no_equals() {
        let q = Query::parse("flag&key=");
        assert_eq!(q.encode(), "flag&key=");
    }

    #[test]
    fn encode_applies_safe_sets() {
        let mut q = Query::new();
        q.load(vec![("a key", "v&lue")]);
        assert_eq!(q.encode(), "a+key=v%26lue");
        let mut q = Query::new();
        q.load(vec![("k", "a=b"), ("p/q", "x")]);
        // '=' is safe inside values, '/' in both
        assert_eq!(q.encode(), "k=a=b&p/q=x");
    }

    #[test]
    fn add_appends_after_existing() {
        let mut q = Query::parse("title=benjamin&age=27");
        q.add(vec![("high", "175"), ("name", "wendy")]);
        assert_eq!(q.encode(), "title=benjamin&age=27&high=175&name=wendy");
    }

    #[test]
    fn add_from_raw_string() {
        let mut q = Query::parse("a=1");
        q.add("b=2&c=3");
        assert_eq!(q.encode(), "a=1&b=2&c=3");
    }

    #[test]
    fn set_replaces_at_first_occurrence() {
        let mut q = Query::new();
        q.load(vec![("1", "1")]);
        q.set(vec![("1", None), ("2", Some("2"))]);
        assert_eq!(
            items(&q),
            [("1".to_string(), None), ("2".to_string(), Some("2".to_string()))]
        );
    }

    #[test]
    fn load_replaces_everything() {
        let mut q = Query::parse("a=1&b=2");
        q.load("c=3");
        assert_eq!(q.encode(), "c=3");
    }

    #[test]
    fn load_from_omdict() {
        let mut source = OrderedMultiDict::new();
        source.add("a".to_string(), Some("1".to_string()));
        source.add("b".to_string(), None);
        let mut q = Query::new();
        q.load(&source);
        assert_eq!(q.encode(), "a=1&b");
    }

    #[test]
    fn strict_parse_still_stores_best_effort() {
        // '%' not followed by two hex digits trips the validator but the
        // pair is still decoded and stored
        let q = Query::parse_strict("ba%d=1&ok=2");
        assert_eq!(items(&q), [pair("ba%d", "1"), pair("ok", "2")]);
        assert!(q.strict());
    }

    #[test]
    fn valid_encoded_classes() {
        assert!(VALID_ENCODED_KEY.is_match("a-b.~:@!$&'()*+,;/?"));
        assert!(VALID_ENCODED_KEY.is_match("a%2Fb"));
        assert!(!VALID_ENCODED_KEY.is_match("a=b"));
        assert!(!VALID_ENCODED_KEY.is_match("a%2"));
        assert!(VALID_ENCODED_VALUE.is_match("a=b"));
        assert!(!VALID_ENCODED_VALUE.is_match("a^b"));
    }

    #[test]
    fn display_matches_encode() {
        let q = Query::parse("a=1&b");
        assert_eq!(q.to_string(), q.encode());
    }
}
