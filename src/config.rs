use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub models: ModelsConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}
impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Raw data source. The series behind `source_path` must be ordered by
/// timestamp ascending; duplicates and gaps are the upstream's problem.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub source_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    pub store_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    pub seed: u64,
    /// Fraction of the series kept as the earliest contiguous training block.
    pub train_ratio: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("EF__").split("__"));
        Ok(figment.extract()?)
    }
}
