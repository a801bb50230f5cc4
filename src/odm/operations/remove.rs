//! remove 操作

use super::utils::{check_result, ensure_stored, resolve};
use super::validate::validate_removal;
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::types::{ModelOperation, ModelOperationResult, RemoveOptions};
use rat_logger::debug;

/// 删除匹配的记录
///
/// 未给出 where 子句时按主键匹配；删除前运行模型的删除校验钩子。
pub async fn remove(
    registry: &ModelRegistry,
    model: &Model,
    options: Option<RemoveOptions>,
) -> RevResult<ModelOperationResult> {
    let (meta, backend) = resolve(registry, model.model_name())?;
    ensure_stored(&meta, "remove")?;
    let options = options.unwrap_or_default();

    let where_clause = match &options.where_clause {
        Some(clause) => clause.clone(),
        None => meta.primary_key_where(model).ok_or_else(|| {
            crate::rev_error!(
                argument,
                "remove() must be called with a where clause for models with no primaryKey"
            )
        })?,
    };
    debug!("remove(): {} where {}", meta.name, where_clause);

    let operation = ModelOperation::new("remove").with_where(where_clause.clone());
    let mut result = ModelOperationResult::new(operation.clone());
    if meta.validate_removal.is_some() || meta.validate_removal_async.is_some() {
        let validation =
            validate_removal(registry, model, &operation, options.validation.clone()).await?;
        if !validation.valid {
            return Err(result.create_validation_error(validation));
        }
        result.validation = Some(validation);
    }

    let result = backend
        .remove(registry, model, &where_clause, result, &options)
        .await?;
    check_result(result)
}
