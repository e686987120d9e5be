use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(StoreBackend::Postgres),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let backend_name = env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string());
        let store_backend = match StoreBackend::from_str(&backend_name) {
            Some(backend) => backend,
            None => bail!("Unknown STORE_BACKEND '{}', expected 'postgres' or 'memory'", backend_name),
        };

        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|cost| cost.parse().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(bcrypt::DEFAULT_COST);

        let config = AppConfig {
            host,
            port,
            environment,
            log_level,
            store_backend,
            bcrypt_cost,
        };

        if config.is_production() && config.store_backend == StoreBackend::Memory {
            bail!("STORE_BACKEND=memory loses all data on restart and is not allowed in production");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
