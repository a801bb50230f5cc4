//! 后端注册相关方法

use super::ModelRegistry;
use crate::adapter::Backend;
use crate::error::RevResult;
use rat_logger::{info, warn};
use std::sync::Arc;

impl ModelRegistry {
    /// 按名称注册后端，同名时替换
    pub fn register_backend(&self, name: &str, backend: Arc<dyn Backend>) -> RevResult<()> {
        if name.is_empty() {
            return Err(crate::rev_error!(
                config,
                "you must specify a name for the backend"
            ));
        }
        if self.backends.insert(name.to_string(), backend).is_some() {
            warn!("后端 {} 已存在，已替换", name);
        } else {
            info!("注册后端: {}", name);
        }
        Ok(())
    }

    /// 后端是否已注册
    pub fn is_backend_registered(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// 获取后端
    pub fn get_backend(&self, name: &str) -> RevResult<Arc<dyn Backend>> {
        self.backends
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                crate::rev_error!(
                    not_found,
                    format!("Backend '{}' has not been configured.", name)
                )
            })
    }

    /// 已注册的后端名（按名称排序）
    pub fn get_backend_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
