//! Application configuration management

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::CliOptions;
use crate::services::image_assigner::{DEFAULT_IMAGE_PREFIX, ImageAssignerConfig};
use crate::services::logging::{LogFormat, LoggingConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL or path. DATABASE_PATH wins over DATABASE_URL.
    pub database_url: String,

    /// Create the database file if it does not exist
    pub database_create_if_missing: bool,

    /// Root of the media tree; images live under `<media_root>/<image_prefix>`
    pub media_root: PathBuf,

    /// Prefix stored on records and used to locate the image directory
    pub image_prefix: String,

    /// Compute matches without saving
    pub dry_run: bool,

    /// Print the JSON report after the summary
    pub json_report: bool,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url =
            resolve_database_url(env::var("DATABASE_PATH").ok(), env::var("DATABASE_URL").ok());

        let database_create_if_missing = match env::var("DATABASE_CREATE_IF_MISSING") {
            Ok(v) => parse_bool(&v).context("Invalid DATABASE_CREATE_IF_MISSING")?,
            Err(_) => false,
        };

        Ok(Self {
            database_url,
            database_create_if_missing,
            media_root: PathBuf::from(env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string())),
            image_prefix: env::var("IMAGE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_IMAGE_PREFIX.to_string()),
            dry_run: false,
            json_report: false,
            log_format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::from_str_lossy(&v))
                .unwrap_or_default(),
        })
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_cli(mut self, options: &CliOptions) -> Self {
        if let Some(ref root) = options.media_root {
            self.media_root = root.clone();
        }
        self.dry_run |= options.dry_run;
        self.json_report |= options.json;
        self
    }

    /// Directory scanned for candidate images
    pub fn media_dir(&self) -> PathBuf {
        self.image_prefix
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.media_root.clone(), |dir, part| dir.join(part))
    }

    pub fn assigner_config(&self) -> ImageAssignerConfig {
        ImageAssignerConfig {
            media_dir: self.media_dir(),
            image_prefix: self.image_prefix.clone(),
            dry_run: self.dry_run,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            format: self.log_format,
            ..LoggingConfig::default()
        }
    }
}

/// `DATABASE_PATH` wins over `DATABASE_URL`; both unset means `sqlite:db.sqlite3`.
fn resolve_database_url(path: Option<String>, url: Option<String>) -> String {
    path.or(url).unwrap_or_else(|| "sqlite:db.sqlite3".to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
