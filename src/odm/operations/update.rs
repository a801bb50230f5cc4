//! update 操作

use super::utils::{check_result, ensure_stored, resolve};
use super::validate::validate;
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::types::{ModelOperation, ModelOperationResult, UpdateOptions};
use rat_logger::debug;
use serde_json::json;

/// 校验后用模型的当前值更新匹配的记录
///
/// 未给出 where 子句时，单例模型匹配全部记录，其余模型按主键匹配。
pub async fn update(
    registry: &ModelRegistry,
    model: &Model,
    options: Option<UpdateOptions>,
) -> RevResult<ModelOperationResult> {
    let (meta, backend) = resolve(registry, model.model_name())?;
    ensure_stored(&meta, "update")?;
    let options = options.unwrap_or_default();

    let where_clause = match &options.where_clause {
        Some(clause) => clause.clone(),
        None if meta.singleton => json!({}),
        None => meta.primary_key_where(model).ok_or_else(|| {
            crate::rev_error!(
                argument,
                "update() must be called with a where clause for models with no primaryKey"
            )
        })?,
    };
    debug!("update(): {} where {}", meta.name, where_clause);

    let operation = ModelOperation::new("update").with_where(where_clause.clone());
    let mut result = ModelOperationResult::new(operation.clone());
    let validation = validate(registry, model, &operation, options.validation.clone()).await?;
    if !validation.valid {
        return Err(result.create_validation_error(validation));
    }
    result.validation = Some(validation);

    let result = backend
        .update(registry, model, &where_clause, result, &options)
        .await?;
    check_result(result)
}
