use super::value::{OrderedEntries, RawValue};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One ruleset record: a scheme's eligibility cells plus its name and link
/// columns, in the column order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeRow {
    columns: Vec<(String, RawValue)>,
}

impl SchemeRow {
    #[cfg(test)]
    pub fn new<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Exact-label lookup.
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&RawValue> {
        self.columns
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v)
    }
}

impl Serialize for SchemeRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (label, value) in &self.columns {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SchemeRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = OrderedEntries::deserialize(deserializer)?;
        Ok(Self { columns: entries.0 })
    }
}

/// An immutable snapshot of the scheme ruleset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<SchemeRow>,
}

impl Dataset {
    #[cfg(test)]
    pub fn new(rows: Vec<SchemeRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SchemeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column label in first-seen order, without duplicates.
    pub fn column_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for row in &self.rows {
            for (label, _) in row.columns() {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_round_trips_in_column_order() {
        let json = r#"{"Scheme Name":"PM-KISAN","Land Size":"<=2","Category":"bpl,general"}"#;
        let row: SchemeRow = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = row.columns().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Scheme Name", "Land Size", "Category"]);
        assert_eq!(serde_json::to_string(&row).unwrap(), json);
    }

    #[test]
    fn dataset_deserializes_from_yaml_sequence() {
        let yaml = r#"
- Scheme Name: A
  Land Size: "<=2"
- Scheme Name: B
  Land Size: any
  State: Karnataka
"#;
        let dataset: Dataset = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].get("State"), Some(&RawValue::from("Karnataka")));
        assert_eq!(
            dataset.column_labels(),
            vec!["Scheme Name", "Land Size", "State"]
        );
    }

    #[test]
    fn get_is_exact_label_lookup() {
        let row = SchemeRow::new([("Land Size", RawValue::from("10-50"))]);
        assert!(row.get("Land Size").is_some());
        assert!(row.get("land_size").is_none());
    }
}
