// src/service/config_service.rs
use crate::common::config::AppConfig;
use crate::common::error::{AppError, Result};
use crate::driver::storage::ConfigStorage;

pub struct ConfigService<S: ConfigStorage> {
    storage: S,
}

impl<S: ConfigStorage> ConfigService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 读取配置，存储为空时使用默认配置
    pub fn load_config(&mut self) -> Result<AppConfig> {
        match self.storage.read_config_block()? {
            Some(data) => {
                let config: AppConfig = serde_json::from_slice(&data)
                    .map_err(|e| AppError::ConfigError(e.to_string()))?;
                Ok(config.normalized())
            }
            None => {
                log::info!("No stored configuration, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}
