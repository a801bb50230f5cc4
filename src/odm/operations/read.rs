//! read 操作

use super::utils::{check_result, resolve};
use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::ModelMeta;
use crate::odm::types::{ModelOperation, ModelOperationResult, ReadOptions, DEFAULT_READ_OPTIONS};
use crate::types::SortConfig;
use rat_logger::debug;
use serde_json::{json, Value as JsonValue};

/// 检查 order_by 条目
///
/// 条目为 `"字段"` 或 `"字段 asc|desc"`，字段必须存在于模型中。
pub fn validate_order_by(meta: &ModelMeta, order_by: &[String]) -> RevResult<()> {
    if order_by.is_empty() {
        return Err(crate::rev_error!(
            argument,
            "read(): order_by: must be an array with at least one item"
        ));
    }
    for entry in order_by {
        let sort = SortConfig::parse(entry).ok_or_else(|| {
            crate::rev_error!(argument, format!("read(): order_by: invalid entry '{}'", entry))
        })?;
        if !meta.has_field(&sort.field) {
            return Err(crate::rev_error!(
                argument,
                format!(
                    "read(): order_by: field '{}' does not exist in model {}",
                    sort.field, meta.name
                )
            ));
        }
    }
    Ok(())
}

/// 查询记录
///
/// 未给出 where 子句时匹配全部记录；limit / offset 未设置时使用默认值。
pub async fn read(
    registry: &ModelRegistry,
    model_name: &str,
    where_clause: Option<JsonValue>,
    options: Option<ReadOptions>,
) -> RevResult<ModelOperationResult> {
    let (meta, backend) = resolve(registry, model_name)?;
    let options = options.unwrap_or_default();
    if let Some(order_by) = &options.order_by {
        validate_order_by(&meta, order_by)?;
    }
    let options = ReadOptions {
        limit: options.limit.or(Some(registry.config().read_limit)),
        offset: options.offset.or(DEFAULT_READ_OPTIONS.offset),
        order_by: options.order_by,
    };

    let where_clause = where_clause.unwrap_or_else(|| json!({}));
    debug!("read(): {} where {}", meta.name, where_clause);
    let operation = ModelOperation::new("read").with_where(where_clause.clone());
    let result = backend
        .read(
            registry,
            &meta.name,
            &where_clause,
            ModelOperationResult::new(operation),
            &options,
        )
        .await?;
    check_result(result)
}
