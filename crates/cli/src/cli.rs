//! Command-line surface of the `granary` binary.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use granary_core::CapacityConfig;

use crate::Operation;

/// Environment variable pointing at a JSON capacity configuration file.
pub const CONFIG_PATH_ENV: &str = "GRANARY_CONFIG";

#[derive(Debug, Parser)]
#[command(
    name = "granary",
    about = "Run deposit/withdraw operations against a fixed-capacity cereal storage",
    version
)]
pub struct Cli {
    /// JSON file with `container_capacity` and `storage_capacity`.
    /// Without it, GRANARY_CONTAINER_CAPACITY / GRANARY_STORAGE_CAPACITY are read.
    #[arg(long, value_name = "PATH", env = "GRANARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Operations applied in order: deposit:GOOD:AMOUNT, withdraw:GOOD:AMOUNT,
    /// reclaim:GOOD, amount:GOOD, space:GOOD, describe
    #[arg(value_name = "OP")]
    pub ops: Vec<Operation>,
}

impl Cli {
    /// Capacities from `--config` when given, else from the process environment.
    pub fn load_config(&self) -> anyhow::Result<CapacityConfig> {
        self.load_config_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Cli::load_config`], reading capacity variables through `lookup`.
    pub fn load_config_with<F>(&self, lookup: F) -> anyhow::Result<CapacityConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        match &self.config {
            Some(path) => load_config_file(path),
            None => CapacityConfig::from_lookup(lookup)
                .context("reading capacity configuration from env"),
        }
    }
}

pub fn load_config_file(path: &Path) -> anyhow::Result<CapacityConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    CapacityConfig::from_json_str(&json)
        .with_context(|| format!("parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::ffi::OsString;
    use granary_core::Cereal;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("granary-cli-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn help_and_version_are_flags_not_operations() {
        let err = Cli::try_parse_from(["granary", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["granary", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn operations_are_parsed_as_positionals() {
        let cli = Cli::try_parse_from(["granary", "deposit:rice:3", "describe"]).unwrap();
        assert_eq!(
            cli.ops,
            vec![
                Operation::Deposit {
                    good: Cereal::Rice,
                    amount: 3.0
                },
                Operation::Describe,
            ]
        );
    }

    #[test]
    fn malformed_operation_is_a_usage_error() {
        let err = Cli::try_parse_from(["granary", "teleport:RICE"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn config_flag_loads_json_file() {
        let dir = temp_dir("flag");
        let path = dir.join("capacity.json");
        let body = serde_json::json!({ "container_capacity": 10.0, "storage_capacity": 35.0 });
        std::fs::write(&path, body.to_string()).unwrap();

        let cli = Cli::try_parse_from([
            OsString::from("granary"),
            OsString::from("--config"),
            path.clone().into_os_string(),
            OsString::from("describe"),
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(path.as_path()));

        // The file wins over capacity variables.
        let config = cli
            .load_config_with(|key| (key == "GRANARY_CONTAINER_CAPACITY").then(|| "1".to_string()))
            .unwrap();
        assert_eq!(config.container_capacity(), 10.0);
        assert_eq!(config.max_container_count(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn capacity_variables_are_used_without_config_file() {
        let cli = Cli {
            config: None,
            ops: Vec::new(),
        };

        let config = cli
            .load_config_with(|key| match key {
                "GRANARY_CONTAINER_CAPACITY" => Some("20".to_string()),
                "GRANARY_STORAGE_CAPACITY" => Some("100".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.max_container_count(), 5);

        assert_eq!(cli.load_config_with(no_env).unwrap(), CapacityConfig::default());

        let err = cli
            .load_config_with(|key| (key == "GRANARY_STORAGE_CAPACITY").then(|| "1".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("env"));
    }

    #[test]
    fn invalid_or_missing_config_file_is_an_error() {
        let dir = temp_dir("bad");
        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{"container_capacity": -1, "storage_capacity": 35}"#).unwrap();

        let cli = Cli {
            config: Some(bad),
            ops: Vec::new(),
        };
        assert!(cli.load_config_with(no_env).is_err());
        assert!(load_config_file(&dir.join("missing.json")).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
