use crate::error::{Result, SchemeError};
use crate::models::{Dataset, FarmerInput};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Yaml,
}

impl DatasetFormat {
    /// `.yaml`/`.yml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DatasetFormat::Yaml,
            _ => DatasetFormat::Json,
        }
    }
}

/// A scheme ruleset exported to a local JSON or YAML file: a sequence of
/// objects, one per scheme, keyed by column label.
pub struct FileDataset {
    path: PathBuf,
    format: DatasetFormat,
}

impl FileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DatasetFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Dataset> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SchemeError::DatasetUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let dataset = parse(&content, self.format).map_err(|e| {
            SchemeError::DatasetUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            rows = dataset.len(),
            "Loaded scheme dataset"
        );
        Ok(dataset)
    }
}

pub fn parse(content: &str, format: DatasetFormat) -> Result<Dataset> {
    match format {
        DatasetFormat::Json => Ok(serde_json::from_str(content)?),
        DatasetFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Read a farmer's answers from a JSON or YAML object.
pub async fn read_answers(path: &Path) -> Result<FarmerInput> {
    let content = tokio::fs::read_to_string(path).await?;
    let parsed = match DatasetFormat::from_path(path) {
        DatasetFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        DatasetFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| SchemeError::InvalidData(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawValue;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DatasetFormat::from_path(Path::new("a.yaml")), DatasetFormat::Yaml);
        assert_eq!(DatasetFormat::from_path(Path::new("a.YML")), DatasetFormat::Yaml);
        assert_eq!(DatasetFormat::from_path(Path::new("a.json")), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_path(Path::new("schemes")), DatasetFormat::Json);
    }

    #[tokio::test]
    async fn loads_json_file() {
        let file = write_temp(
            ".json",
            r#"[{"Scheme Name": "PM-KISAN", "Land Size": "<=2", "Income": 150000}]"#,
        );
        let dataset = FileDataset::new(file.path()).load().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.rows()[0].get("Income"),
            Some(&RawValue::Number(150000.0))
        );
    }

    #[tokio::test]
    async fn loads_yaml_file() {
        let file = write_temp(
            ".yaml",
            "- Scheme Name: Soil Health Card\n  State: any\n- Scheme Name: KCC\n  Land Size: 0-5\n",
        );
        let dataset = FileDataset::new(file.path()).load().await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_dataset_unavailable() {
        let err = FileDataset::new("/nonexistent/schemes.json")
            .load()
            .await
            .unwrap_err();
        assert_matches!(err, SchemeError::DatasetUnavailable(_));
    }

    #[tokio::test]
    async fn malformed_file_is_dataset_unavailable() {
        let file = write_temp(".json", r#"{"not": "a list"}"#);
        let err = FileDataset::new(file.path()).load().await.unwrap_err();
        assert_matches!(err, SchemeError::DatasetUnavailable(_));
    }

    #[tokio::test]
    async fn reads_answers_from_yaml() {
        let file = write_temp(".yml", "Land Size: 1.5\nState: Karnataka\n");
        let input = read_answers(file.path()).await.unwrap();
        assert_eq!(input.answer_for("land_size"), &RawValue::Number(1.5));
        assert_eq!(input.answer_for("state"), &RawValue::from("Karnataka"));
    }

    #[tokio::test]
    async fn malformed_answers_are_invalid_data() {
        let file = write_temp(".json", "[1, 2]");
        assert_matches!(read_answers(file.path()).await, Err(SchemeError::InvalidData(_)));
    }

    #[tokio::test]
    async fn missing_answers_file_is_io_error() {
        let err = read_answers(Path::new("/nonexistent/answers.json"))
            .await
            .unwrap_err();
        assert_matches!(err, SchemeError::Io(_));
    }

    #[tokio::test]
    async fn empty_list_is_an_empty_dataset() {
        let file = write_temp(".json", "[]");
        let dataset = FileDataset::new(file.path()).load().await.unwrap();
        assert!(dataset.is_empty());
    }
}
