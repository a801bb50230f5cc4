//! # 模型操作接口定义

use crate::error::RevResult;
use crate::model::{Model, ModelValidationResult};
use crate::odm::types::*;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// 模型操作接口
///
/// 与 [`crate::odm::operations`] 中的自由函数一一对应，由持有注册表的类型实现
#[async_trait]
pub trait ModelOperations {
    /// 校验模型
    async fn validate(
        &self,
        model: &Model,
        operation: &ModelOperation,
        options: Option<ValidationOptions>,
    ) -> RevResult<ModelValidationResult>;

    /// 创建记录
    async fn create(
        &self,
        model: &Model,
        options: Option<CreateOptions>,
    ) -> RevResult<ModelOperationResult>;

    /// 查询记录
    async fn read(
        &self,
        model_name: &str,
        where_clause: Option<JsonValue>,
        options: Option<ReadOptions>,
    ) -> RevResult<ModelOperationResult>;

    /// 更新记录
    async fn update(
        &self,
        model: &Model,
        options: Option<UpdateOptions>,
    ) -> RevResult<ModelOperationResult>;

    /// 删除记录
    async fn remove(
        &self,
        model: &Model,
        options: Option<RemoveOptions>,
    ) -> RevResult<ModelOperationResult>;

    /// 执行模型方法
    async fn exec(
        &self,
        model: &Model,
        method: &str,
        args: ExecArgs,
        options: Option<ExecOptions>,
    ) -> RevResult<ModelOperationResult>;
}
