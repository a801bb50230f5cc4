//! 模型注册表核心结构

use crate::adapter::Backend;
use crate::config::RevConfig;
use crate::model::ModelMeta;
use dashmap::DashMap;
use rat_logger::info;
use std::sync::Arc;

/// 模型注册表
///
/// 模型元数据注册后只读共享；后端按名称注册，同名注册会替换旧的后端。
pub struct ModelRegistry {
    pub(crate) models: DashMap<String, Arc<ModelMeta>>,
    pub(crate) backends: DashMap<String, Arc<dyn Backend>>,
    config: RevConfig,
}

impl ModelRegistry {
    /// 使用默认配置创建注册表
    pub fn new() -> Self {
        Self::with_config(RevConfig::default())
    }

    /// 使用指定配置创建注册表
    pub fn with_config(config: RevConfig) -> Self {
        info!(
            "创建模型注册表: 默认后端={}, 校验超时={}ms",
            config.default_backend, config.validation_timeout_ms
        );
        Self {
            models: DashMap::new(),
            backends: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RevConfig {
        &self.config
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.get_model_names())
            .field("backends", &self.get_backend_names())
            .field("config", &self.config)
            .finish()
    }
}
