use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        mongo_uri: env::var("MONGO_URI").ok(),
        mongo_db_name: get_env_or_default("MONGO_DB_NAME", "summarizz"),
        host: get_env_or_default("HOST", "0.0.0.0"),
        port: get_env_or_default("PORT", "5000")
            .parse()
            .unwrap_or_else(|e| panic!("Invalid PORT value: {e}")),
    }
});

pub struct Config {
    mongo_uri: Option<String>,
    pub mongo_db_name: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// `MONGO_URI` is only required once something connects to MongoDB.
    pub fn mongo_uri(&self) -> Result<&str> {
        self.mongo_uri
            .as_deref()
            .context("Missing required environment variable: MONGO_URI")
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid HOST/PORT: {}:{}", self.host, self.port))
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
