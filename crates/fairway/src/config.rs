//! Configuration management for the Fairway CLI.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (FAIRWAY_*)
//! 3. Config file (~/.config/fairway/config.toml)
//! 4. Default values

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host the server binds to.
    #[serde(default = "default_host")]
    pub server_host: String,

    /// Port the server listens on.
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Origin allowed to make cross-site requests. The value "none"
    /// disables CORS.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Path of the JSON round store. Unset keeps rounds in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    fairway_server::DEFAULT_CORS_ORIGIN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: default_host(),
            server_port: default_port(),
            cors_origin: default_cors_origin(),
            data_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from all sources.
    ///
    /// Reports warnings for configuration errors but falls back to defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("FAIRWAY_"));

        match figment.extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                // Report the error clearly to the user
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {}", e);
                eprintln!();
                eprintln!("  To fix, edit or delete the config file:");
                eprintln!("    rm {}", config_path.display());
                eprintln!();
                Config::default()
            }
        }
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fairway")
            .join("config.toml")
    }

    /// Returns the path to the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fairway")
    }

    /// Saves the current configuration to the config file.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_dir = Self::config_dir();
        std::fs::create_dir_all(&config_dir)?;

        let config_path = Self::config_path();
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&config_path, toml_str)?;
        Ok(())
    }

    /// Sets the round store data file and saves.
    pub fn set_data_file(&mut self, path: PathBuf) -> Result<(), std::io::Error> {
        self.data_file = Some(path);
        self.save()
    }

    /// Clears the round store data file and saves.
    pub fn clear_data_file(&mut self) -> Result<(), std::io::Error> {
        self.data_file = None;
        self.save()
    }

    /// Returns the configured CORS origin, or `None` when disabled.
    #[must_use]
    pub fn allowed_origin(&self) -> Option<String> {
        let origin = self.cors_origin.trim();
        if origin.is_empty() || origin.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(origin.to_string())
        }
    }
}

/// Prints the current configuration and its sources.
pub fn show_config() {
    let config = Config::load();
    let config_path = Config::config_path();

    println!("Fairway Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    println!("  server_host: {}", config.server_host);
    println!("  server_port: {}", config.server_port);
    println!("  cors_origin: {}", config.cors_origin);
    match &config.data_file {
        Some(path) => println!("  data_file: {}", path.display()),
        None => println!("  data_file: (not set, rounds kept in memory)"),
    }

    println!("\nEnvironment variables:");
    println!("  FAIRWAY_SERVER_HOST");
    println!("  FAIRWAY_SERVER_PORT");
    println!("  FAIRWAY_CORS_ORIGIN");
    println!("  FAIRWAY_DATA_FILE");
}
