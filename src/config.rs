use std::path::Path;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::game::{Board, Dimensions, Topology, TopologyKind};

/// Board configuration, loadable from TOML. Defaults to Connect Four.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub topology: TopologyKind,
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig::connect_four()
    }
}

impl BoardConfig {
    pub fn tic_tac_toe() -> Self {
        BoardConfig::from_dimensions(TopologyKind::Free, Dimensions::TIC_TAC_TOE)
    }

    pub fn connect_four() -> Self {
        BoardConfig::from_dimensions(TopologyKind::Gravity, Dimensions::CONNECT_FOUR)
    }

    pub fn from_dimensions(topology: TopologyKind, dims: Dimensions) -> Self {
        BoardConfig {
            topology,
            rows: dims.rows,
            cols: dims.cols,
            win_length: dims.win_length,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols, self.win_length)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: BoardConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(
            path = %path.display(),
            topology = %config.topology,
            rows = config.rows,
            cols = config.cols,
            win_length = config.win_length,
            "loaded board config"
        );
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Validation("rows must be >= 1".into()));
        }
        if self.cols == 0 {
            return Err(ConfigError::Validation("cols must be >= 1".into()));
        }
        if self.win_length == 0 {
            return Err(ConfigError::Validation("win_length must be >= 1".into()));
        }
        if self.win_length > self.rows.max(self.cols) {
            return Err(ConfigError::Validation(
                "win_length must fit in at least one of rows or cols".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&BoardConfig::default()).unwrap_or_default()
    }
}

impl<T: Topology> Board<T> {
    /// Empty board as described by `config`, which must name `T`'s topology.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.topology != T::KIND {
            return Err(ConfigError::TopologyMismatch {
                expected: T::KIND,
                found: config.topology,
            });
        }
        Ok(Self::empty(config.dimensions()))
    }
}
