use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default, so an empty environment serves `./data`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory or `http(s)://` base holding `data/config.json` and `data/jd.json`.
    pub assets_root: String,
    /// Base of resume image references handed to the renderer.
    pub resume_base: String,
    /// `memory`, `file:<path>` or `redis://...`
    pub storage_url: String,
    /// Serve the jobs, interviews and reports routes.
    pub full_routes: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            assets_root: env_or("ASSETS_ROOT", "."),
            resume_base: env_or("RESUME_BASE", "assets/resumes"),
            storage_url: env_or("STORAGE_URL", "memory"),
            full_routes: parse_flag(&env_or("FULL_ROUTES", "true"))
                .context("FULL_ROUTES must be true or false")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
