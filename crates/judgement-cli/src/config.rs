use judgement_core::GameConfig;
use judgement_core::game::match_state::{DEFAULT_ROUNDS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const CLASSIC_OPPONENTS: [&str; 3] = ["Alice", "Bob", "Charlie"];

/// Table configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_rounds")]
    pub rounds: u8,
    #[serde(default)]
    pub rotate_opening_lead: bool,
    #[serde(default = "classic_seats")]
    pub players: Vec<SeatConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub outputs: OutputsConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl TableConfig {
    /// One human ("You") against three automated players over five rounds.
    pub fn classic() -> Self {
        Self {
            seed: None,
            rounds: default_rounds(),
            rotate_opening_lead: false,
            players: classic_seats(),
            logging: LoggingConfig::default(),
            outputs: OutputsConfig::default(),
        }
    }

    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TableConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.logging.normalize();
        validate_seats(&mut self.players)?;
        self.game_config()
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "rounds".to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    /// Replace every human seat with an automated one.
    pub fn autoplay(&mut self) {
        for seat in &mut self.players {
            seat.kind = SeatKind::Automated;
        }
    }

    pub fn has_human(&self) -> bool {
        self.players.iter().any(|seat| seat.kind == SeatKind::Human)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.players.len(), self.rounds)
            .with_rotating_lead(self.rotate_opening_lead)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: SeatKind,
    /// Seed for an automated seat; derived from the table seed when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, kind: SeatKind) -> Self {
        Self {
            name: name.into(),
            kind,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Human,
    Automated,
}

/// Logging configuration; plain text at `warn` unless configured otherwise.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputsConfig {
    /// Every game event as one JSON object per line.
    #[serde(default)]
    pub events_jsonl: Option<PathBuf>,
}

fn default_rounds() -> u8 {
    DEFAULT_ROUNDS
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn classic_seats() -> Vec<SeatConfig> {
    let mut seats = vec![SeatConfig::new("You", SeatKind::Human)];
    seats.extend(
        CLASSIC_OPPONENTS
            .iter()
            .map(|name| SeatConfig::new(*name, SeatKind::Automated)),
    );
    seats
}

fn validate_seats(seats: &mut [SeatConfig]) -> Result<(), ValidationError> {
    if seats.len() < MIN_PLAYERS {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!("at least {MIN_PLAYERS} players are required"),
        });
    }

    let mut seen = HashSet::new();
    for seat in seats.iter_mut() {
        let trimmed = seat.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }
        if trimmed.len() != seat.name.len() {
            seat.name = trimmed.to_string();
        }
        if !seen.insert(seat.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", seat.name),
            });
        }
    }

    let humans = seats
        .iter()
        .filter(|seat| seat.kind == SeatKind::Human)
        .count();
    if humans > 1 {
        return Err(ValidationError::InvalidField {
            field: "players.kind".to_string(),
            message: format!("at most one human player is supported, found {humans}"),
        });
    }

    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
