//! 协议错误定义
//!
//! 解码路径本身没有致命错误，这里的错误只出现在配置加载、输入解析和帧生成中

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// 配置错误
    ConfigError(String),
    /// 解析错误
    ParseError(String),
    /// 长度错误
    LengthError(String),
    /// IO错误
    Io(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            ProtocolError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ProtocolError::LengthError(msg) => write!(f, "Length error: {msg}"),
            ProtocolError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<String> for ProtocolError {
    fn from(s: String) -> Self {
        ProtocolError::ParseError(s)
    }
}

impl From<&str> for ProtocolError {
    fn from(s: &str) -> Self {
        ProtocolError::ParseError(s.to_string())
    }
}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> Self {
        ProtocolError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::ConfigError(e.to_string())
    }
}
