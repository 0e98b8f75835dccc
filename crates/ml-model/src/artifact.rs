//! Reading serialized artifacts from disk.

use crate::error::{ModelError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read and deserialize a JSON artifact.
pub fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| ModelError::ArtifactIo {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::ArtifactFormat {
        path: path.display().to_string(),
        source,
    })
}
