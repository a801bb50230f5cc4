//! validate 操作
//!
//! 先运行所有字段的同步校验器，再并发运行所有异步校验器，最后运行模型级钩子。
//! 整个过程受超时约束，超时后丢弃尚未完成的校验。

use super::utils::{resolve_meta, validation_options};
use crate::error::RevResult;
use crate::i18n::validation_msg;
use crate::manager::ModelRegistry;
use crate::model::{
    FieldValidationContext, Model, ModelMeta, ModelValidationContext, ModelValidationResult,
};
use crate::odm::types::{ModelOperation, ValidationOptions};
use futures::future::try_join_all;
use parking_lot::Mutex;
use rat_logger::debug;
use serde_json::json;
use std::future::Future;
use std::time::Duration;

async fn with_timeout<F>(label: &str, timeout_ms: u64, fut: F) -> RevResult<ModelValidationResult>
where
    F: Future<Output = RevResult<ModelValidationResult>>,
{
    match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(outcome) => outcome,
        Err(_) => Err(crate::rev_error!(
            timeout,
            format!("{}() - timed out after {} milliseconds", label, timeout_ms)
        )),
    }
}

async fn run_validation(
    meta: &ModelMeta,
    model: &Model,
    operation: &ModelOperation,
    options: &ValidationOptions,
) -> RevResult<ModelValidationResult> {
    let result = Mutex::new(ModelValidationResult::new());

    for key in model.keys() {
        if !meta.has_field(key) {
            result.lock().add_model_error(
                validation_msg("extra_field", key, &[]),
                Some("extra_field"),
                Some(json!({ "field": key })),
            )?;
        }
    }

    let contexts: Vec<FieldValidationContext<'_>> = meta
        .fields
        .iter()
        .map(|field| FieldValidationContext {
            model,
            field,
            meta,
            operation,
            result: &result,
            options,
        })
        .collect();
    for ctx in &contexts {
        ctx.field.run_sync_validators(ctx)?;
    }
    try_join_all(contexts.iter().map(|ctx| ctx.field.run_async_validators(ctx))).await?;

    let model_ctx = ModelValidationContext {
        model,
        meta,
        operation,
        result: &result,
        options,
    };
    if let Some(hook) = &meta.validate {
        hook(&model_ctx)?;
    }
    if let Some(hook) = &meta.validate_async {
        hook.run(&model_ctx).await?;
    }

    Ok(result.into_inner())
}

async fn run_removal_validation(
    meta: &ModelMeta,
    model: &Model,
    operation: &ModelOperation,
    options: &ValidationOptions,
) -> RevResult<ModelValidationResult> {
    let result = Mutex::new(ModelValidationResult::new());
    let ctx = ModelValidationContext {
        model,
        meta,
        operation,
        result: &result,
        options,
    };
    if let Some(hook) = &meta.validate_removal {
        hook(&ctx)?;
    }
    if let Some(hook) = &meta.validate_removal_async {
        hook.run(&ctx).await?;
    }
    Ok(result.into_inner())
}

/// 校验模型实例
///
/// 实例上存在元数据中没有的键时记录 `extra_field` 模型错误。
pub async fn validate(
    registry: &ModelRegistry,
    model: &Model,
    operation: &ModelOperation,
    options: Option<ValidationOptions>,
) -> RevResult<ModelValidationResult> {
    let meta = resolve_meta(registry, model.model_name())?;
    let options = validation_options(registry, options.as_ref());
    let timeout_ms = options.timeout_ms.unwrap_or(registry.config().validation_timeout_ms);

    let result = with_timeout(
        "validate",
        timeout_ms,
        run_validation(&meta, model, operation, &options),
    )
    .await?;
    debug!(
        "校验 {} ({}): valid={}, 字段错误 {} 个, 模型错误 {} 个",
        meta.name,
        operation.operation,
        result.valid,
        result.field_error_count(),
        result.model_errors.len()
    );
    Ok(result)
}

/// 运行删除前的模型级钩子
pub async fn validate_removal(
    registry: &ModelRegistry,
    model: &Model,
    operation: &ModelOperation,
    options: Option<ValidationOptions>,
) -> RevResult<ModelValidationResult> {
    let meta = resolve_meta(registry, model.model_name())?;
    let options = validation_options(registry, options.as_ref());
    let timeout_ms = options.timeout_ms.unwrap_or(registry.config().validation_timeout_ms);
    with_timeout(
        "validateRemoval",
        timeout_ms,
        run_removal_validation(&meta, model, operation, &options),
    )
    .await
}
