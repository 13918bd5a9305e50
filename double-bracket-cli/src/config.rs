use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use double_bracket_core::SeedingPolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! from_environment {
    ($config:expr, $($key:expr, $name:tt),*$(,)?) => {{
        $(
            {
                if let Ok(value) = env::var($key) {
                    if let Ok(value) = value.parse() {
                        $config.$name = value;
                    }
                }
            }
        )*
    }};
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: LevelFilter,
    pub seeding: Seeding,
    /// Seed for reproducible shuffles. Only used with [`Seeding::Shuffled`].
    pub seed: Option<u64>,
    /// Pretty print JSON output.
    pub pretty: bool,
}

impl Config {
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let buf = fs::read_to_string(path)?;
        Self::from_toml(&buf)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Overrides all values set in the environment.
    pub fn with_environment(mut self) -> Self {
        from_environment!(
            self,
            "DB_LOGLEVEL",
            loglevel,
            "DB_SEEDING",
            seeding,
            "DB_PRETTY",
            pretty,
        );

        if let Ok(value) = env::var("DB_SEED") {
            if let Ok(seed) = value.parse() {
                self.seed = Some(seed);
            }
        }

        self
    }

    pub fn seeding_policy(&self) -> SeedingPolicy {
        match self.seeding {
            Seeding::Ordered => SeedingPolicy::Ordered,
            Seeding::Shuffled => SeedingPolicy::Shuffled { seed: self.seed },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: LevelFilter::Warn,
            seeding: Seeding::Shuffled,
            seed: None,
            pretty: true,
        }
    }
}

/// How first round pairings are chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seeding {
    Ordered,
    Shuffled,
}

impl FromStr for Seeding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Self::Ordered),
            "shuffled" => Ok(Self::Shuffled),
            _ => Err(ConfigError::InvalidValue("seeding", s.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(&'static str, String),
}
