// src/driver/storage.rs
use std::fs;
use std::path::Path;

use crate::common::error::{AppError, Result};

/// 配置存储接口，按整块读取
pub trait ConfigStorage {
    /// 读取配置块，文件不存在时返回 `None`
    fn read_config_block(&mut self) -> Result<Option<Vec<u8>>>;
}

/// 从文件读取配置
pub struct FileConfigStorage {
    file_path: String,
}

impl FileConfigStorage {
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
        }
    }
}

impl ConfigStorage for FileConfigStorage {
    fn read_config_block(&mut self) -> Result<Option<Vec<u8>>> {
        let path = Path::new(&self.file_path);

        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(path).map_err(|e| {
            log::error!("Failed to read {}: {}", self.file_path, e);
            AppError::StorageError
        })?;

        Ok(Some(data))
    }
}

pub type DefaultConfigStorage = FileConfigStorage;
