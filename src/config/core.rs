//! # 配置管理模块 - 核心配置类型
//!
//! 注册表级别的配置：校验超时、默认后端、默认分页大小和消息语言

use crate::error::RevResult;
use rat_logger::info;
use serde::{Deserialize, Serialize};

/// 默认校验超时（毫秒）
pub const DEFAULT_VALIDATION_TIMEOUT_MS: u64 = 5000;
/// 默认后端名
pub const DEFAULT_BACKEND: &str = "default";
/// read 默认返回条数
pub const DEFAULT_READ_LIMIT: i64 = 20;

/// 框架配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevConfig {
    /// 校验超时（毫秒）
    pub validation_timeout_ms: u64,
    /// 未指定后端的模型使用的后端名
    pub default_backend: String,
    /// read 未指定 limit 时的条数
    pub read_limit: i64,
    /// 校验消息语言，如 `en-US`、`zh-CN`
    pub language: Option<String>,
}

impl Default for RevConfig {
    fn default() -> Self {
        Self {
            validation_timeout_ms: DEFAULT_VALIDATION_TIMEOUT_MS,
            default_backend: DEFAULT_BACKEND.to_string(),
            read_limit: DEFAULT_READ_LIMIT,
            language: None,
        }
    }
}

impl RevConfig {
    /// 创建配置构建器
    pub fn builder() -> super::builders::RevConfigBuilder {
        super::builders::RevConfigBuilder::new()
    }

    /// 从配置文件加载配置
    ///
    /// `.toml` 扩展名按 TOML 解析，其余按 JSON 解析。
    pub fn from_file<P: AsRef<std::path::Path>>(config_path: P) -> RevResult<Self> {
        let content = std::fs::read_to_string(config_path.as_ref()).map_err(|e| {
            crate::rev_error!(
                config,
                format!("读取配置文件失败 {:?}: {}", config_path.as_ref(), e)
            )
        })?;

        let config: RevConfig =
            if config_path.as_ref().extension().and_then(|s| s.to_str()) == Some("toml") {
                toml::from_str(&content)
                    .map_err(|e| crate::rev_error!(config, format!("解析TOML配置文件失败: {}", e)))?
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| crate::rev_error!(config, format!("解析JSON配置文件失败: {}", e)))?
            };
        config.check()?;

        info!("从文件加载配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    /// 检查配置取值
    pub fn check(&self) -> RevResult<()> {
        if self.validation_timeout_ms < 1 {
            return Err(crate::rev_error!(config, "validation_timeout_ms 必须大于等于 1"));
        }
        if self.read_limit < 1 {
            return Err(crate::rev_error!(config, "read_limit 必须大于等于 1"));
        }
        if self.default_backend.is_empty() {
            return Err(crate::rev_error!(config, "default_backend 不能为空"));
        }
        Ok(())
    }
}
