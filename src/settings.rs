use std::env;

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    /// Where variables come from: `file` loads `.env` first, `server` does not
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub prefix: Option<String>,
    /// Path of the Graphviz `dot` executable
    #[serde(default = "default_graphviz_bin")]
    pub graphviz_bin: String,
    /// Write logs to a daily rolling file in this directory instead of stdout
    pub log_dir: Option<String>,
    /// `json` or `text`
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_graphviz_bin() -> String {
    "dot".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            host: default_host(),
            port: default_port(),
            prefix: None,
            graphviz_bin: default_graphviz_bin(),
            log_dir: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn log_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Load the configuration from the environment, reading `.env` unless
/// `ENV` says the variables are provided by the server.
///
/// Runs before logging is set up, so it does not log.
pub fn get_config() -> Result<Config, envy::Error> {
    let env_var = env::var("ENV")
        .or_else(|_| env::var("env"))
        .unwrap_or(default_env());
    if env_var == "file" {
        let _ = dotenvy::dotenv();
    }
    envy::from_env::<Config>()
}
