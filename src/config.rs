use clap::{crate_description, Parser};
use env_logger::Builder;
use log::LevelFilter;
use thiserror::Error;

use std::{env, path::PathBuf};

use crate::store::DEFAULT_MENUS_FILE;

pub const DEFAULT_PREFIX: &str = "<>";

#[derive(Parser, Debug)]
#[command(about=crate_description!())]
#[command(version, long_about = None)]
pub struct CLArgs {
    #[arg(short, long, default_value = "none")]
    pub loglevel: String,

    /// JSON file the server menus are stored in
    #[arg(short, long, env = "MENUBOT_MENUS_FILE", default_value = DEFAULT_MENUS_FILE)]
    pub menus_file: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No token found! Make sure to set DISCORD_TOKEN in the environment or a .env file")]
    MissingToken,
}

#[derive(Debug)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub menus_file: PathBuf,
}

impl Config {
    pub fn from_env(clargs: &CLArgs) -> Result<Self, ConfigError> {
        Self::from_parts(
            clargs,
            env::var("DISCORD_TOKEN").ok(),
            env::var("MENUBOT_PREFIX").ok(),
        )
    }

    pub fn from_parts(
        clargs: &CLArgs,
        token: Option<String>,
        prefix: Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            token,
            prefix: prefix.unwrap_or_else(|| String::from(DEFAULT_PREFIX)),
            menus_file: clargs.menus_file.clone(),
        })
    }
}

/// `--loglevel` wins; without it `RUST_LOG` decides.
pub fn init_logging(loglevel: &str) {
    let level = match loglevel.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        _ => None,
    };

    match level {
        Some(level) => Builder::new().filter_module("menubot", level).init(),
        None if loglevel == "none" => env_logger::init_from_env(env_logger::Env::new()),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clargs() -> CLArgs {
        CLArgs::parse_from(["menubot"])
    }

    #[test]
    fn missing_token_is_rejected() {
        assert!(matches!(
            Config::from_parts(&clargs(), None, None),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            Config::from_parts(&clargs(), Some("  ".into()), None),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn prefix_defaults_to_angle_brackets() {
        let config = Config::from_parts(&clargs(), Some("token".into()), None).unwrap();
        assert_eq!(config.prefix, "<>");

        let config =
            Config::from_parts(&clargs(), Some("token".into()), Some("?".into())).unwrap();
        assert_eq!(config.prefix, "?");
    }

    #[test]
    fn menus_file_flag() {
        let clargs = CLArgs::parse_from(["menubot", "--menus-file", "/tmp/menus.json"]);
        assert_eq!(clargs.menus_file, PathBuf::from("/tmp/menus.json"));
    }
}
