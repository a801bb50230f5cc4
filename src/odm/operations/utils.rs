//! 操作函数共用的辅助方法

use crate::adapter::Backend;
use crate::error::{RevError, RevResult};
use crate::manager::ModelRegistry;
use crate::model::ModelMeta;
use crate::odm::types::{ModelOperationResult, ValidationOptions};
use std::sync::Arc;

/// 取模型元数据（必须已初始化）
pub(crate) fn resolve_meta(registry: &ModelRegistry, model_name: &str) -> RevResult<Arc<ModelMeta>> {
    let meta = registry.get_model_meta(model_name)?;
    meta.check_initialised()?;
    Ok(meta)
}

/// 取模型元数据和它使用的后端
pub(crate) fn resolve(
    registry: &ModelRegistry,
    model_name: &str,
) -> RevResult<(Arc<ModelMeta>, Arc<dyn Backend>)> {
    let meta = resolve_meta(registry, model_name)?;
    let backend = registry.get_backend(meta.backend_name())?;
    Ok((meta, backend))
}

/// 不可存储的模型不能执行存储操作
pub(crate) fn ensure_stored(meta: &ModelMeta, operation: &str) -> RevResult<()> {
    if meta.stored {
        Ok(())
    } else {
        Err(crate::rev_error!(
            model,
            format!("Cannot call {}() on models with stored: false", operation)
        ))
    }
}

/// 填充未设置的校验超时
pub(crate) fn validation_options(
    registry: &ModelRegistry,
    options: Option<&ValidationOptions>,
) -> ValidationOptions {
    ValidationOptions {
        timeout_ms: Some(
            options
                .and_then(|o| o.timeout_ms)
                .unwrap_or(registry.config().validation_timeout_ms),
        ),
    }
}

/// 后端添加了错误时把结果转为 OperationFailed
pub(crate) fn check_result(result: ModelOperationResult) -> RevResult<ModelOperationResult> {
    if result.success && result.errors.is_empty() {
        Ok(result)
    } else {
        Err(RevError::OperationFailed {
            result: Box::new(result),
        })
    }
}
