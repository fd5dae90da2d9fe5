use kaprekar_types::{
    HitModel, Progression, SessionConfig, DEFAULT_SPIN_WINDOW, DEFAULT_STARTING_BANK,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, str::FromStr};
use thiserror::Error;
use tracing::Level;

/// Settings read from a YAML file. Every field has a default.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_spin_window")]
    pub spin_window: usize,
    #[serde(default = "default_starting_bank")]
    pub starting_bank: u64,
    #[serde(default)]
    pub progression: Option<Vec<u64>>,
    #[serde(default)]
    pub hit: HitModel,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{field} is invalid: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: kaprekar_types::Error,
    },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("invalid listen address: {value}")]
    InvalidListen { value: String },
}

pub struct ValidatedConfig {
    pub session: SessionConfig,
    pub hit: HitModel,
    pub seed: Option<u64>,
    pub log_level: Level,
    pub listen: SocketAddr,
}

fn default_spin_window() -> usize {
    DEFAULT_SPIN_WINDOW
}

fn default_starting_bank() -> u64 {
    DEFAULT_STARTING_BANK
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spin_window: default_spin_window(),
            starting_bank: default_starting_bank(),
            progression: None,
            hit: HitModel::default(),
            seed: None,
            log_level: default_log_level(),
            listen: default_listen(),
        }
    }
}

fn invalid(field: &'static str) -> impl FnOnce(kaprekar_types::Error) -> ConfigError {
    move |source| ConfigError::Invalid { field, source }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let progression = match self.progression {
            Some(stakes) => Progression::new(stakes).map_err(invalid("progression"))?,
            None => Progression::default(),
        };
        let session = SessionConfig::new(self.spin_window, self.starting_bank, progression)
            .map_err(|source| match source {
                kaprekar_types::Error::InvalidWindow(_) => invalid("spin_window")(source),
                _ => invalid("starting_bank")(source),
            })?;
        self.hit.validate().map_err(invalid("hit"))?;

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        let listen =
            SocketAddr::from_str(&self.listen).map_err(|_| ConfigError::InvalidListen {
                value: self.listen.clone(),
            })?;

        Ok(ValidatedConfig {
            session,
            hit: self.hit,
            seed: self.seed,
            log_level,
            listen,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaprekar_types::TableBet;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap().validate().unwrap();
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.hit, HitModel::Random { coverage: 12 });
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.listen, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
spin_window: 3
starting_bank: 750
progression: [1, 2, 4, 8]
hit:
  kind: table
  bet:
    type: dozen
    index: 1
seed: 42
log_level: debug
listen: 0.0.0.0:9000
"#;
        let config = Config::parse(yaml).unwrap().validate().unwrap();
        assert_eq!(config.session.spin_window(), 3);
        assert_eq!(config.session.starting_bank(), 750);
        assert_eq!(config.session.progression().stakes(), &[1, 2, 4, 8]);
        assert_eq!(
            config.hit,
            HitModel::Table {
                bet: TableBet::Dozen { index: 1 }
            }
        );
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.listen.port(), 9000);
    }

    #[test]
    fn test_random_coverage_default() {
        let config = Config::parse("hit: { kind: random }").unwrap();
        assert_eq!(config.hit, HitModel::Random { coverage: 12 });
    }

    #[test]
    fn test_invalid_fields() {
        let err = Config::parse("spin_window: 5").unwrap().validate().err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "spin_window", .. }));

        let err = Config::parse("starting_bank: 50").unwrap().validate().err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "starting_bank", .. }));

        let err = Config::parse("progression: []").unwrap().validate().err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "progression", .. }));

        let err = Config::parse("hit: { kind: random, coverage: 40 }")
            .unwrap()
            .validate()
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "hit", .. }));

        let err = Config::parse("log_level: loud").unwrap().validate().err().unwrap();
        assert!(matches!(err, ConfigError::InvalidLogLevel { .. }));

        let err = Config::parse("listen: nowhere").unwrap().validate().err().unwrap();
        assert!(matches!(err, ConfigError::InvalidListen { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Config::parse("spin_windw: 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/kaprekar.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
