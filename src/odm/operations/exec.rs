//! exec 操作

use super::utils::resolve_meta;
use super::validate::validate;
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::types::{ExecArgs, ExecOptions, ModelOperation, ModelOperationResult};
use rat_logger::debug;
use std::sync::Arc;

/// 执行模型方法
///
/// 模型元数据注册了同名方法时直接调用，否则交给后端的 `exec`。
pub async fn exec(
    registry: &ModelRegistry,
    model: &Model,
    method: &str,
    args: ExecArgs,
    options: Option<ExecOptions>,
) -> RevResult<ModelOperationResult> {
    if method.is_empty() {
        return Err(crate::rev_error!(argument, "Specified method name is not valid"));
    }
    let meta = resolve_meta(registry, model.model_name())?;
    let options = options.unwrap_or_default();

    let operation = ModelOperation::new(method);
    let mut result = ModelOperationResult::new(operation.clone());
    if options.validate {
        let validation = validate(registry, model, &operation, options.validation.clone()).await?;
        if !validation.valid {
            return Err(result.create_validation_error(validation));
        }
        result.validation = Some(validation);
    }

    if let Some(handler) = meta.methods.get(method).map(Arc::clone) {
        debug!("exec(): 调用模型方法 {}.{}", meta.name, method);
        result.data = Some(handler.call(registry, model, &args).await?);
        return Ok(result);
    }

    debug!("exec(): {}.{} 交给后端 {}", meta.name, method, meta.backend_name());
    let backend = registry.get_backend(meta.backend_name())?;
    let result = backend
        .exec(registry, model, method, &args, result, &options)
        .await?;
    super::utils::check_result(result)
}
