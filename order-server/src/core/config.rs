//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | WORK_DIR | ./data | store files, uploads, logs |
//! | HTTP_PORT | 5000 | HTTP API port |
//! | PUBLIC_BASE_URL | http://localhost:<port> | prefix for upload URLs |
//! | ENVIRONMENT | development | development \| staging \| production |
//!
//! # Example
//!
//! ```ignore
//! WORK_DIR=/var/lib/oakline HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the store, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Absolute URL prefix clients use to reach uploaded files
    pub public_base_url: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work dir and port, keeping everything else from the
    /// environment. Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// `<work_dir>/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// `<work_dir>/uploads` — served statically under `/uploads`
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// `<work_dir>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir().join("gallery"))?;
        std::fs::create_dir_all(self.uploads_dir().join("feedback"))?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
