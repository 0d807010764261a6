//! Visualizer options.
//!
//! Options are layered with figment, later sources winning:
//!
//! 1. built-in defaults
//! 2. `mapview.toml` in the working directory (or an explicit path)
//! 3. `MAPVIEW_*` environment variables (`MAPVIEW_OUT_DIR`, `MAPVIEW_FILENAME`, `MAPVIEW_SILENT`)

use std::path::{Component, Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "mapview.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "MAPVIEW_";

/// Output options of the visualizer plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerOptions {
    /// Output directory, relative to the project root unless absolute.
    ///
    /// Removed and recreated when the session starts.
    pub out_dir: PathBuf,

    /// Report file name inside `out_dir`.
    pub filename: String,

    /// Do not log the report path.
    pub silent: bool,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(".source-map-visualizer"),
            filename: "report.html".to_string(),
            silent: false,
        }
    }
}

impl VisualizerOptions {
    /// Figment with every option source merged.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = config_path.map(Path::to_path_buf).or_else(|| {
            let default_path = Path::new(CONFIG_FILE);
            default_path.exists().then(|| default_path.to_path_buf())
        });

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate options.
    ///
    /// An explicit `config_path` must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path.filter(|path| !path.is_file()) {
            return Err(Error::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let options: Self = Self::figment(config_path)
            .extract()
            .map_err(|err| Error::Config(Box::new(err)))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the options describe a usable output location.
    pub fn validate(&self) -> Result<()> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("out_dir must not be empty".to_string()));
        }

        let mut components = Path::new(&self.filename).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name {
            return Err(Error::InvalidConfig(format!(
                "filename must be a plain file name, got {:?}",
                self.filename
            )));
        }

        Ok(())
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}
