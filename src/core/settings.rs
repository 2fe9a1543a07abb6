//! 本地持久化配置

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::features::DEFAULT_FRAME_MOD;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub capture: CaptureSettings,
}

/// 识别服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// 识别服务地址，请求发往 `{address}/reco`
    pub address: String,
    /// 代理所在的站点
    pub origin: String,
    pub proxy_path: String,
    /// 调试模式下直连识别服务，不走代理
    pub debug: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// 抽帧间隔，对应浏览器端 localStorage 的 frameModV3
    #[serde(rename = "frameModV3")]
    pub frame_mod: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:5000".to_string(),
            origin: "http://localhost:3000".to_string(),
            proxy_path: "/api/proxy".to_string(),
            debug: false,
            timeout_secs: 10,
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            frame_mod: DEFAULT_FRAME_MOD,
        }
    }
}

impl ServerSettings {
    pub fn reco_url(&self) -> String {
        format!("{}/reco", self.address.trim_end_matches('/'))
    }

    pub fn proxy_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.proxy_path)
    }
}

impl AppSettings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: AppSettings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 文件不存在时使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capture.frame_mod < 1 {
            return Err(SettingsError::Validation(
                "frame mod must be at least 1".to_string(),
            ));
        }
        if self.server.address.trim().is_empty() {
            return Err(SettingsError::Validation(
                "server address must not be empty".to_string(),
            ));
        }
        if self.server.timeout_secs == 0 {
            return Err(SettingsError::Validation(
                "request timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
