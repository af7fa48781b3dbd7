use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A ruleset cell or farmer answer exactly as it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Text rendering used by the string predicates. Integral numbers print
    /// without a decimal point so `5` and `"5"` compare equal as text.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Null => Cow::Borrowed(""),
            RawValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            RawValue::Number(n) => Cow::Owned(format_number(*n)),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Null, or text that is empty once trimmed.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Bool(_) | RawValue::Number(_) => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RawValue::Null => serializer.serialize_none(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            RawValue::Number(n) => serializer.serialize_f64(*n),
            RawValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// Map entries in document order. JSON objects and YAML mappings both keep
/// their key order through this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedEntries(pub Vec<(String, RawValue)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of labels to values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_decimal_point() {
        assert_eq!(RawValue::Number(5.0).as_text(), "5");
        assert_eq!(RawValue::Number(-12.0).as_text(), "-12");
        assert_eq!(RawValue::Number(2.5).as_text(), "2.5");
        assert_eq!(RawValue::Bool(true).as_text(), "true");
        assert_eq!(RawValue::Null.as_text(), "");
    }

    #[test]
    fn blank_values() {
        assert!(RawValue::Null.is_blank());
        assert!(RawValue::from("   ").is_blank());
        assert!(!RawValue::from(" x ").is_blank());
        assert!(!RawValue::Number(0.0).is_blank());
        assert!(!RawValue::Bool(false).is_blank());
    }

    #[test]
    fn deserializes_untagged_json() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[null, true, 3, 4.5, "text"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Null,
                RawValue::Bool(true),
                RawValue::Number(3.0),
                RawValue::Number(4.5),
                RawValue::from("text"),
            ]
        );
    }

    #[test]
    fn serializes_integral_numbers_as_integers() {
        let json = serde_json::to_string(&RawValue::Number(1200.0)).unwrap();
        assert_eq!(json, "1200");
        let json = serde_json::to_string(&RawValue::Null).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn ordered_entries_keep_document_order() {
        let json = r#"{"Zeta": 1, "Alpha": "a", "Mid": null}"#;
        let entries: OrderedEntries = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = entries.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);

        let yaml = "Zeta: 1\nAlpha: a\nMid: ~\n";
        let entries: OrderedEntries = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&str> = entries.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(entries.0[2].1, RawValue::Null);
    }
}
