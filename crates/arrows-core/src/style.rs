//! Key → value style maps used by nodes, relationships, annotations and
//! the graph itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single style value. Numbers stay numbers so that hit-testing can read
/// `fontSize` without reparsing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, StyleValue>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<StyleValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    /// Overlay `other` on top of `self`. Keys not known to `self` are added.
    pub fn merge(&self, other: &Style) -> Style {
        let mut merged = self.0.clone();
        merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Style(merged)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_overrides_and_adds() {
        let base = Style::new().with("strokeWidth", 2.0).with("strokeColor", "#000000");
        let patch = Style::new().with("strokeWidth", 5.0).with("dash", "4 4");
        let merged = base.merge(&patch);
        assert_eq!(merged.number("strokeWidth"), Some(5.0));
        assert_eq!(merged.text("strokeColor"), Some("#000000"));
        assert_eq!(merged.text("dash"), Some("4 4"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn number_parses_text_values() {
        let style = Style::new().with("fontSize", "18");
        assert_eq!(style.number("fontSize"), Some(18.0));
        assert_eq!(style.number("missing"), None);
    }

    #[test]
    fn serializes_as_plain_map() {
        let style = Style::new().with("fontSize", 14.0).with("color", "#ff0000");
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r##"{"color":"#ff0000","fontSize":14.0}"##);
        let back: Style = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
