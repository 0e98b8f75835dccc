use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Locations of the three trained artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub encoders: PathBuf,
    pub model: PathBuf,
    pub history: PathBuf,
}

impl ArtifactPaths {
    /// Standard layout under a deployment directory
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            encoders: base_dir.join("models").join("dict_encoders.json"),
            model: base_dir.join("models").join("logreg_model.json"),
            history: base_dir.join("data").join("df_long_cumsum.csv"),
        }
    }

    pub fn with_encoders(mut self, path: impl Into<PathBuf>) -> Self {
        self.encoders = path.into();
        self
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = path.into();
        self
    }

    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history = path.into();
        self
    }

    /// Apply the per-file overrides that are set, keeping the rest.
    pub fn with_overrides(
        self,
        encoders: Option<&Path>,
        model: Option<&Path>,
        history: Option<&Path>,
    ) -> Self {
        let paths = match encoders {
            Some(path) => self.with_encoders(path),
            None => self,
        };
        let paths = match model {
            Some(path) => paths.with_model(path),
            None => paths,
        };
        match history {
            Some(path) => paths.with_history(path),
            None => paths,
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::from_base_dir(default_base_dir())
    }
}

/// Service configuration loaded from `PRODUCT_RECS_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Deployment directory holding `models/` and `data/`
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Override for the encoder artifact
    pub encoders_path: Option<PathBuf>,

    /// Override for the model artifact
    pub model_path: Option<PathBuf>,

    /// Override for the engagement history
    pub history_path: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

pub const ENV_PREFIX: &str = "PRODUCT_RECS_";

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ServiceConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<ServiceConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Artifact locations: the base layout with per-file overrides applied
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::from_base_dir(&self.base_dir).with_overrides(
            self.encoders_path.as_deref(),
            self.model_path.as_deref(),
            self.history_path.as_deref(),
        )
    }
}
