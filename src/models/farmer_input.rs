use super::value::{OrderedEntries, RawValue};
use crate::error::{Result, SchemeError};
use crate::logic::keys::normalize_key;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A farmer's answers keyed by normalized field name.
///
/// Keys are normalized once at construction; when two raw keys collapse to
/// the same normalized key, the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FarmerInput {
    answers: BTreeMap<String, RawValue>,
}

impl FarmerInput {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: AsRef<str>,
    {
        let answers = pairs
            .into_iter()
            .map(|(key, value)| (normalize_key(key.as_ref()), value))
            .collect();
        Self { answers }
    }

    /// Parse `key=value` assignments as given on the command line.
    pub fn parse_assignments(items: &[String]) -> Result<Self> {
        let mut pairs = Vec::with_capacity(items.len());
        for item in items {
            let (key, value) = item.split_once('=').ok_or_else(|| {
                SchemeError::InvalidData(format!("Expected key=value, got '{}'", item))
            })?;
            if key.trim().is_empty() {
                return Err(SchemeError::InvalidData(format!(
                    "Missing field name in '{}'",
                    item
                )));
            }
            pairs.push((key.to_string(), RawValue::from(value)));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Answer for a ruleset column label, or `Null` when the farmer gave none.
    pub fn answer_for(&self, label: &str) -> &RawValue {
        static MISSING: RawValue = RawValue::Null;
        self.answers.get(&normalize_key(label)).unwrap_or(&MISSING)
    }

    /// Overlay another set of answers on top of this one.
    pub fn merged_with(mut self, other: FarmerInput) -> Self {
        self.answers.extend(other.answers);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<'de> Deserialize<'de> for FarmerInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = OrderedEntries::deserialize(deserializer)?;
        Ok(Self::from_pairs(entries.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized_on_construction() {
        let input = FarmerInput::from_pairs([("  Land   Size ", RawValue::from("2"))]);
        assert_eq!(input.answer_for("land_size"), &RawValue::from("2"));
        assert_eq!(input.answer_for("Land Size"), &RawValue::from("2"));
        assert_eq!(input.answer_for("LAND SIZE"), &RawValue::from("2"));
    }

    #[test]
    fn missing_answer_is_null() {
        let input = FarmerInput::default();
        assert_eq!(input.answer_for("State"), &RawValue::Null);
    }

    #[test]
    fn later_duplicate_key_wins() {
        let input = FarmerInput::from_pairs([
            ("Land Size", RawValue::from("1")),
            ("land_size", RawValue::from("9")),
        ]);
        assert_eq!(input.len(), 1);
        assert_eq!(input.answer_for("land size"), &RawValue::from("9"));
    }

    #[test]
    fn parse_assignments_valid() {
        let items = vec!["Land Size=2".to_string(), "state=Karnataka".to_string()];
        let input = FarmerInput::parse_assignments(&items).unwrap();
        assert_eq!(input.answer_for("land_size"), &RawValue::from("2"));
        assert_eq!(input.answer_for("State"), &RawValue::from("Karnataka"));
    }

    #[test]
    fn parse_assignments_keeps_equals_in_value() {
        let items = vec!["note=a=b".to_string()];
        let input = FarmerInput::parse_assignments(&items).unwrap();
        assert_eq!(input.answer_for("note"), &RawValue::from("a=b"));
    }

    #[test]
    fn parse_assignments_invalid() {
        assert!(FarmerInput::parse_assignments(&["no_equals".to_string()]).is_err());
        assert!(FarmerInput::parse_assignments(&["=value".to_string()]).is_err());
    }

    #[test]
    fn deserializes_from_json_object() {
        let input: FarmerInput =
            serde_json::from_str(r#"{"Land Size": 1, "Annual Income": "₹1,20,000"}"#).unwrap();
        assert_eq!(input.answer_for("land_size"), &RawValue::Number(1.0));
        assert_eq!(
            input.answer_for("annual income"),
            &RawValue::from("₹1,20,000")
        );
    }

    #[test]
    fn merged_answers_override() {
        let base = FarmerInput::from_pairs([("state", RawValue::from("Goa"))]);
        let extra = FarmerInput::from_pairs([("State", RawValue::from("Kerala"))]);
        let merged = base.merged_with(extra);
        assert_eq!(merged.answer_for("state"), &RawValue::from("Kerala"));
    }
}
