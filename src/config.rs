use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{FormationConfig, RoleSelection, DEFAULT_BALANCE_ITERATIONS};
use crate::models::PriorityWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matchmaking: MatchmakingSettings,
    #[serde(default)]
    pub priority: PrioritySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchmakingSettings {
    #[serde(default = "default_team_size")]
    pub team_size: usize,
    #[serde(default = "default_balance_iterations")]
    pub balance_iterations: usize,
    #[serde(default)]
    pub role_selection: RoleSelection,
}

impl Default for MatchmakingSettings {
    fn default() -> Self {
        Self {
            team_size: default_team_size(),
            balance_iterations: default_balance_iterations(),
            role_selection: RoleSelection::default(),
        }
    }
}

impl MatchmakingSettings {
    /// Validated pipeline config
    pub fn formation_config(&self) -> Result<FormationConfig, ConfigError> {
        FormationConfig::new(self.team_size, self.balance_iterations, self.role_selection)
            .map_err(|e| ConfigError::Message(e.to_string()))
    }
}

fn default_team_size() -> usize { 5 }
fn default_balance_iterations() -> usize { DEFAULT_BALANCE_ITERATIONS }

#[derive(Debug, Clone, Deserialize)]
pub struct PrioritySettings {
    #[serde(default = "default_waiting_time_weight")]
    pub waiting_time_weight: f64,
    #[serde(default = "default_skill_weight")]
    pub skill_weight: f64,
    #[serde(default = "default_waiting_time_scale")]
    pub waiting_time_scale: f64,
    #[serde(default = "default_skill_scale")]
    pub skill_scale: f64,
}

impl Default for PrioritySettings {
    fn default() -> Self {
        Self {
            waiting_time_weight: default_waiting_time_weight(),
            skill_weight: default_skill_weight(),
            waiting_time_scale: default_waiting_time_scale(),
            skill_scale: default_skill_scale(),
        }
    }
}

impl PrioritySettings {
    /// Priority weights, rejecting values that would break the queue order
    ///
    /// Weights must be finite and non-negative; scales finite and positive.
    pub fn weights(&self) -> Result<PriorityWeights, ConfigError> {
        let weights_ok = [self.waiting_time_weight, self.skill_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !weights_ok {
            return Err(ConfigError::Message(format!(
                "priority weights must be finite and non-negative (waiting_time_weight={}, skill_weight={})",
                self.waiting_time_weight, self.skill_weight
            )));
        }

        let scales_ok = [self.waiting_time_scale, self.skill_scale]
            .iter()
            .all(|s| s.is_finite() && *s > 0.0);
        if !scales_ok {
            return Err(ConfigError::Message(format!(
                "priority scales must be finite and positive (waiting_time_scale={}, skill_scale={})",
                self.waiting_time_scale, self.skill_scale
            )));
        }

        Ok(PriorityWeights {
            waiting_time: self.waiting_time_weight,
            skill: self.skill_weight,
            waiting_time_scale: self.waiting_time_scale,
            skill_scale: self.skill_scale,
        })
    }
}

fn default_waiting_time_weight() -> f64 { 0.7 }
fn default_skill_weight() -> f64 { 0.3 }
fn default_waiting_time_scale() -> f64 { 1000.0 }
fn default_skill_scale() -> f64 { 3000.0 }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// Single-line plain text
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TEAM_MATCHER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TEAM_MATCHER__MATCHMAKING__TEAM_SIZE -> matchmaking.team_size
            .add_source(
                Environment::with_prefix("TEAM_MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TEAM_MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honour the conventional unprefixed variables set by container platforms
/// (PORT, LOG_LEVEL, LOG_FORMAT)
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_priority_weights() {
        let weights = PrioritySettings::default().weights().unwrap();
        assert_eq!(weights, PriorityWeights::default());
        assert_eq!(weights.waiting_time, 0.7);
        assert_eq!(weights.skill, 0.3);
    }

    #[test]
    fn test_rejects_zero_scale() {
        let settings = PrioritySettings {
            skill_scale: 0.0,
            ..PrioritySettings::default()
        };
        assert!(settings.weights().is_err());
    }

    #[test]
    fn test_rejects_nan_weight() {
        let settings = PrioritySettings {
            waiting_time_weight: f64::NAN,
            ..PrioritySettings::default()
        };
        assert!(settings.weights().is_err());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let settings = PrioritySettings {
            skill_weight: -0.3,
            ..PrioritySettings::default()
        };
        assert!(settings.weights().is_err());
    }

    #[test]
    fn test_rejects_infinite_scale() {
        let settings = PrioritySettings {
            waiting_time_scale: f64::INFINITY,
            ..PrioritySettings::default()
        };
        assert!(settings.weights().is_err());
    }

    #[test]
    fn test_zero_weight_allowed() {
        let settings = PrioritySettings {
            skill_weight: 0.0,
            ..PrioritySettings::default()
        };
        assert_eq!(settings.weights().unwrap().skill, 0.0);
    }

    #[test]
    fn test_default_matchmaking() {
        let config = MatchmakingSettings::default().formation_config().unwrap();
        assert_eq!(config, FormationConfig::default());
    }

    #[test]
    fn test_invalid_team_size() {
        let settings = MatchmakingSettings {
            team_size: 7,
            ..MatchmakingSettings::default()
        };
        assert!(settings.formation_config().is_err());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("team-matcher-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[matchmaking]\nteam_size = 3\nrole_selection = \"most_preferred\"\n\n[server]\nport = 9000\n"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.matchmaking.team_size, 3);
        assert_eq!(settings.matchmaking.role_selection, RoleSelection::MostPreferred);
        assert_eq!(settings.matchmaking.balance_iterations, 100);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_nan_weight_in_file_rejected() {
        let path = std::env::temp_dir().join(format!("team-matcher-nan-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[priority]\nwaiting_time_weight = nan\n\n[logging]\nformat = \"pretty\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(settings.priority.waiting_time_weight.is_nan());
        assert!(settings.priority.weights().is_err());
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }
}
