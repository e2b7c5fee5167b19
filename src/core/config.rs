//! Runtime configuration: optional JSON file, then CLI overrides.

use super::constants::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MAX_MAP_SIDE, MIN_MAP_SIDE, STARTING_SCAN_CHARGES,
};
use crate::character::PlayerClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {flag}: {value}")]
    BadFlag { flag: String, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    pub starting_scan_charges: u32,
    /// Emit one JSON object per response instead of prose.
    pub json_output: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            seed: None,
            starting_scan_charges: STARTING_SCAN_CHARGES,
            json_output: false,
        }
    }
}

impl GameConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_MAP_SIDE..=MAX_MAP_SIDE;
        if !side.contains(&self.map_width) || !side.contains(&self.map_height) {
            return Err(ConfigError::Invalid(format!(
                "map must be between {MIN_MAP_SIDE}x{MIN_MAP_SIDE} and {MAX_MAP_SIDE}x{MAX_MAP_SIDE}, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        Ok(())
    }
}

/// Parsed command line: config plus the binary-only switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: GameConfig,
    /// Class chosen up front, skipping the prompt. Required with `--json`.
    pub class: Option<PlayerClass>,
    pub show_version: bool,
    pub show_help: bool,
}

pub const CLI_USAGE: &str = "\
Usage: dunesand [OPTIONS]

Options:
  --config FILE   Load settings from a JSON file
  --seed N        Fixed RNG seed for a reproducible run
  --width N       Map width (4-32, default 8)
  --height N      Map height (4-32, default 8)
  --class NAME    Pick a class without the prompt
  --json          Print responses as JSON lines
  --version       Show version information
  --help          Show this help message";

fn flag_value<'a>(
    flag: &str,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<&'a String, ConfigError> {
    iter.next().ok_or_else(|| ConfigError::BadFlag {
        flag: flag.to_string(),
        value: "<missing>".to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::BadFlag {
        flag: flag.to_string(),
        value: raw.to_string(),
    })
}

/// Parses `args` (without the program name). A `--config` file is applied
/// first so later flags override it regardless of their position.
pub fn parse_args(args: &[String]) -> Result<CliOptions, ConfigError> {
    let mut options = CliOptions::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = flag_value(arg, &mut iter)?;
            options.config = GameConfig::load(Path::new(path))?;
        }
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                flag_value(arg, &mut iter)?;
            }
            "--seed" => {
                let raw = flag_value(arg, &mut iter)?;
                options.config.seed = Some(parse_number(arg, raw)?);
            }
            "--width" => {
                let raw = flag_value(arg, &mut iter)?;
                options.config.map_width = parse_number(arg, raw)?;
            }
            "--height" => {
                let raw = flag_value(arg, &mut iter)?;
                options.config.map_height = parse_number(arg, raw)?;
            }
            "--class" => {
                let raw = flag_value(arg, &mut iter)?;
                let class = PlayerClass::from_alias(raw).ok_or_else(|| ConfigError::BadFlag {
                    flag: arg.clone(),
                    value: raw.clone(),
                })?;
                options.class = Some(class);
            }
            "--json" => options.config.json_output = true,
            "--version" | "-v" => options.show_version = true,
            "--help" | "-h" => options.show_help = true,
            other => {
                return Err(ConfigError::BadFlag {
                    flag: other.to_string(),
                    value: "unknown option".to_string(),
                })
            }
        }
    }

    options.config.validate()?;
    let runs_game = !options.show_help && !options.show_version;
    if runs_game && options.config.json_output && options.class.is_none() {
        // the class prompt is prose and would break the JSON line stream
        return Err(ConfigError::Invalid("--json requires --class".to_string()));
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let opts = parse_args(&[]).unwrap();
        assert_eq!(opts.config, GameConfig::default());
        assert_eq!(opts.config.map_width, 8);
        assert_eq!(opts.config.starting_scan_charges, 3);
        assert!(opts.class.is_none());
    }

    #[test]
    fn test_flags_override() {
        let opts = parse_args(&args(&[
            "--seed", "42", "--width", "10", "--height", "6", "--json", "--class", "woj",
        ]))
        .unwrap();
        assert_eq!(opts.config.seed, Some(42));
        assert_eq!(opts.config.map_width, 10);
        assert_eq!(opts.config.map_height, 6);
        assert!(opts.config.json_output);
        assert_eq!(opts.class, Some(PlayerClass::Warrior));
    }

    #[test]
    fn test_unknown_class_rejected() {
        let err = parse_args(&args(&["--class", "pirate"])).unwrap_err();
        assert!(matches!(err, ConfigError::BadFlag { ref value, .. } if value == "pirate"));
    }

    #[test]
    fn test_json_mode_needs_class() {
        let err = parse_args(&args(&["--json"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(parse_args(&args(&["--json", "--class", "nomada"])).is_ok());
        assert!(parse_args(&args(&["--json", "--version"])).is_ok());
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = parse_args(&args(&["--seed", "abc"])).unwrap_err();
        assert!(matches!(err, ConfigError::BadFlag { .. }));
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = parse_args(&args(&["--width"])).unwrap_err();
        assert!(matches!(err, ConfigError::BadFlag { .. }));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(parse_args(&args(&["--fly"])).is_err());
    }

    #[test]
    fn test_map_size_validated() {
        let err = parse_args(&args(&["--width", "2"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(parse_args(&args(&["--height", "33"])).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GameConfig::from_json(Path::new("test.json"), r#"{"map_width": 12, "seed": 5}"#)
                .unwrap();
        assert_eq!(config.map_width, 12);
        assert_eq!(config.map_height, 8);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json(Path::new("bad.json"), "{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
