pub mod file;
pub mod remote;

pub use file::FileDataset;
pub use remote::RemoteDataset;

use crate::config::DatasetConfig;
use crate::error::{Result, SchemeError};
use crate::models::Dataset;

/// Supplies the scheme ruleset as an in-memory snapshot.
pub enum DatasetSource {
    File(FileDataset),
    Remote(RemoteDataset),
}

impl DatasetSource {
    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        if let Some(ref path) = config.path {
            return Ok(DatasetSource::File(FileDataset::new(path.clone())));
        }
        if let Some(url) = config.url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(DatasetSource::Remote(RemoteDataset::new(
                url.as_str(),
                config.token.clone(),
            )));
        }
        Err(SchemeError::DatasetUnavailable(
            "No dataset source configured. Pass --dataset or set dataset.path / dataset.url"
                .into(),
        ))
    }

    pub async fn load(&self) -> Result<Dataset> {
        match self {
            DatasetSource::File(source) => source.load().await,
            DatasetSource::Remote(source) => source.load().await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DatasetSource::File(source) => source.path().display().to_string(),
            DatasetSource::Remote(source) => source.url().to_string(),
        }
    }
}
