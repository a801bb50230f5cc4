//! # 配置构建器模块
//!
//! 提供 `RevConfig` 的构建器实现，支持链式调用，未设置的项使用默认值

use super::core::RevConfig;
use crate::error::RevResult;
use rat_logger::info;

/// 框架配置构建器
#[derive(Debug, Default)]
pub struct RevConfigBuilder {
    validation_timeout_ms: Option<u64>,
    default_backend: Option<String>,
    read_limit: Option<i64>,
    language: Option<String>,
}

impl RevConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置校验超时（毫秒）
    pub fn validation_timeout_ms(mut self, timeout: u64) -> Self {
        self.validation_timeout_ms = Some(timeout);
        self
    }

    /// 设置默认后端名
    pub fn default_backend(mut self, name: &str) -> Self {
        self.default_backend = Some(name.to_string());
        self
    }

    /// 设置 read 默认条数
    pub fn read_limit(mut self, limit: i64) -> Self {
        self.read_limit = Some(limit);
        self
    }

    /// 设置校验消息语言
    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    /// 构建配置
    ///
    /// # 错误
    ///
    /// 超时或条数小于 1、后端名为空时返回配置错误
    pub fn build(self) -> RevResult<RevConfig> {
        let defaults = RevConfig::default();
        let config = RevConfig {
            validation_timeout_ms: self
                .validation_timeout_ms
                .unwrap_or(defaults.validation_timeout_ms),
            default_backend: self.default_backend.unwrap_or(defaults.default_backend),
            read_limit: self.read_limit.unwrap_or(defaults.read_limit),
            language: self.language,
        };
        config.check()?;

        info!(
            "构建配置: timeout={}ms, backend={}, read_limit={}",
            config.validation_timeout_ms, config.default_backend, config.read_limit
        );
        Ok(config)
    }
}
