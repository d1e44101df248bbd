//! 解码器配置模块
//!
//! 唯一可调参数是API模式：模式1不转义，模式2启用字节转义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ProtocolError;

/// API模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiMode {
    /// 模式1：帧内字节原样传输
    #[default]
    #[serde(rename = "1", alias = "unescaped")]
    Unescaped,
    /// 模式2：帧内0x7E/0x7D等字节以0x7D前缀并异或0x20传输
    #[serde(rename = "2", alias = "escaped")]
    Escaped,
}

impl ApiMode {
    /// 是否启用反转义步骤
    pub fn is_escaped(self) -> bool {
        matches!(self, ApiMode::Escaped)
    }
}

impl FromStr for ApiMode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "unescaped" => Ok(ApiMode::Unescaped),
            "2" | "escaped" => Ok(ApiMode::Escaped),
            other => Err(ProtocolError::ConfigError(format!(
                "unknown API mode '{other}', expected 1 or 2"
            ))),
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Unescaped => write!(f, "1"),
            ApiMode::Escaped => write!(f, "2"),
        }
    }
}

/// 解码器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub api_mode: ApiMode,
}

impl DecoderConfig {
    pub fn new(api_mode: ApiMode) -> Self {
        Self { api_mode }
    }

    /// 从JSON文本加载配置
    pub fn from_json_str(json: &str) -> Result<Self, ProtocolError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// 从JSON文件加载配置
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ProtocolError::Io(format!("failed to read config {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded decoder config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
