//! Configuration for Products API

use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig,
};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Comma-separated origins allowed by CORS
    pub allowed_origins: String,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    /// Environment variables, on top of `DATABASE_URL`/`DB_*` and `HOST`/`PORT`:
    /// - `APP_ENV` (default: development)
    /// - `CORS_ALLOWED_ORIGINS` (default: http://localhost:3000)
    /// - `RUN_MIGRATIONS` (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            allowed_origins: env_or_default("CORS_ALLOWED_ORIGINS", "http://localhost:3000"),
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}
