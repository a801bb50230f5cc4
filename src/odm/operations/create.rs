//! create 操作

use super::utils::{check_result, ensure_stored, resolve};
use super::validate::validate;
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::types::{
    CreateOptions, ModelOperation, ModelOperationResult, DEFAULT_CREATE_OPTIONS,
};
use rat_logger::debug;

/// 校验后把模型写入后端
///
/// 校验失败时返回携带校验结果的 `ValidationFailed`。
pub async fn create(
    registry: &ModelRegistry,
    model: &Model,
    options: Option<CreateOptions>,
) -> RevResult<ModelOperationResult> {
    let (meta, backend) = resolve(registry, model.model_name())?;
    ensure_stored(&meta, "create")?;
    let options = options.unwrap_or(DEFAULT_CREATE_OPTIONS);
    debug!("create(): {} -> 后端 {}", meta.name, meta.backend_name());

    let operation = ModelOperation::new("create");
    let mut result = ModelOperationResult::new(operation.clone());
    let validation = validate(registry, model, &operation, options.validation.clone()).await?;
    if !validation.valid {
        return Err(result.create_validation_error(validation));
    }
    result.validation = Some(validation);

    let result = backend.create(registry, model, result, &options).await?;
    check_result(result)
}
