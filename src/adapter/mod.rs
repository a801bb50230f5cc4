//! 存储后端模块
//!
//! 定义统一的后端接口，操作函数只通过该接口访问存储

use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::Model;
use crate::odm::{
    CreateOptions, ExecArgs, ExecOptions, ModelOperationResult, ReadOptions, RemoveOptions,
    UpdateOptions,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

mod memory;

pub use memory::InMemoryBackend;

/// 存储后端trait
///
/// 每个方法接收操作函数创建的结果对象，填充后返回。
/// 可恢复的问题通过 `result.add_error` 报告，无法继续时返回 `Err`。
#[async_trait]
pub trait Backend: Send + Sync {
    /// 写入新记录
    async fn create(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        result: ModelOperationResult,
        options: &CreateOptions,
    ) -> RevResult<ModelOperationResult>;

    /// 查询记录
    async fn read(
        &self,
        registry: &ModelRegistry,
        model_name: &str,
        where_clause: &JsonValue,
        result: ModelOperationResult,
        options: &ReadOptions,
    ) -> RevResult<ModelOperationResult>;

    /// 用模型的当前值更新匹配的记录
    async fn update(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        where_clause: &JsonValue,
        result: ModelOperationResult,
        options: &UpdateOptions,
    ) -> RevResult<ModelOperationResult>;

    /// 删除匹配的记录
    async fn remove(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        where_clause: &JsonValue,
        result: ModelOperationResult,
        options: &RemoveOptions,
    ) -> RevResult<ModelOperationResult>;

    /// 执行后端方法
    async fn exec(
        &self,
        registry: &ModelRegistry,
        model: &Model,
        method: &str,
        args: &ExecArgs,
        result: ModelOperationResult,
        options: &ExecOptions,
    ) -> RevResult<ModelOperationResult>;
}
