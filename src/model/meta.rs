//! 模型元数据
//!
//! `ModelMeta` 描述一个模型：字段列表、后端名、单例/存储标志、主键以及模型级钩子。
//! 元数据在注册时初始化一次，之后只读共享。

use crate::error::RevResult;
use crate::manager::ModelRegistry;
use crate::model::field_types::Field;
use crate::model::instance::Model;
use crate::model::validation::ModelValidationResult;
use crate::odm::{ExecArgs, ModelOperation, ValidationOptions};
use crate::types::DataValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// 模型级校验上下文
pub struct ModelValidationContext<'a> {
    pub model: &'a Model,
    pub meta: &'a ModelMeta,
    pub operation: &'a ModelOperation,
    pub result: &'a Mutex<ModelValidationResult>,
    pub options: &'a ValidationOptions,
}

impl<'a> ModelValidationContext<'a> {
    pub fn add_field_error(&self, field: &str, message: impl Into<String>, code: Option<&str>) -> RevResult<()> {
        self.result.lock().add_field_error(field, message, code, None)
    }

    pub fn add_model_error(&self, message: impl Into<String>, code: Option<&str>) -> RevResult<()> {
        self.result.lock().add_model_error(message, code, None)
    }
}

/// 删除前校验使用同样的上下文
pub type RemovalValidationContext<'a> = ModelValidationContext<'a>;

/// 同步模型级钩子
pub type ModelHook = Arc<dyn Fn(&ModelValidationContext<'_>) -> RevResult<()> + Send + Sync>;

/// 异步模型级钩子
#[async_trait]
pub trait AsyncModelHook: Send + Sync {
    async fn run(&self, ctx: &ModelValidationContext<'_>) -> RevResult<()>;
}

/// 模型方法，供 `exec` 调用
#[async_trait]
pub trait ModelMethod: Send + Sync {
    async fn call(&self, registry: &ModelRegistry, model: &Model, args: &ExecArgs) -> RevResult<DataValue>;
}

/// 模型元数据
#[derive(Clone)]
pub struct ModelMeta {
    /// 模型名
    pub name: String,
    /// 显示名，初始化时默认为模型名
    pub label: Option<String>,
    /// 有序字段列表
    pub fields: Vec<Field>,
    fields_by_name: HashMap<String, usize>,
    /// 后端名，初始化时默认为注册表的默认后端
    pub backend: Option<String>,
    pub singleton: bool,
    pub stored: bool,
    /// 主键字段名列表
    pub primary_key: Vec<String>,
    pub validate: Option<ModelHook>,
    pub validate_async: Option<Arc<dyn AsyncModelHook>>,
    pub validate_removal: Option<ModelHook>,
    pub validate_removal_async: Option<Arc<dyn AsyncModelHook>>,
    pub methods: HashMap<String, Arc<dyn ModelMethod>>,
    initialised: bool,
}

impl std::fmt::Debug for ModelMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("ModelMeta")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("fields", &self.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>())
            .field("backend", &self.backend)
            .field("singleton", &self.singleton)
            .field("stored", &self.stored)
            .field("primary_key", &self.primary_key)
            .field("methods", &methods)
            .field("initialised", &self.initialised)
            .finish()
    }
}

impl ModelMeta {
    /// 创建未初始化的元数据
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            fields: Vec::new(),
            fields_by_name: HashMap::new(),
            backend: None,
            singleton: false,
            stored: true,
            primary_key: Vec::new(),
            validate: None,
            validate_async: None,
            validate_removal: None,
            validate_removal_async: None,
            methods: HashMap::new(),
            initialised: false,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn backend(mut self, backend: &str) -> Self {
        self.backend = Some(backend.to_string());
        self
    }

    pub fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    pub fn stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    pub fn primary_key(mut self, fields: &[&str]) -> Self {
        self.primary_key = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_validate<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ModelValidationContext<'_>) -> RevResult<()> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(hook));
        self
    }

    pub fn with_validate_async(mut self, hook: Arc<dyn AsyncModelHook>) -> Self {
        self.validate_async = Some(hook);
        self
    }

    pub fn with_validate_removal<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RemovalValidationContext<'_>) -> RevResult<()> + Send + Sync + 'static,
    {
        self.validate_removal = Some(Arc::new(hook));
        self
    }

    pub fn with_validate_removal_async(mut self, hook: Arc<dyn AsyncModelHook>) -> Self {
        self.validate_removal_async = Some(hook);
        self
    }

    pub fn with_method(mut self, name: &str, method: Arc<dyn ModelMethod>) -> Self {
        self.methods.insert(name.to_string(), method);
        self
    }

    /// 初始化元数据：建立字段索引并填充默认值
    pub fn initialise(&mut self, default_backend: &str) -> RevResult<()> {
        if self.fields.is_empty() {
            return Err(crate::rev_error!(
                metadata,
                format!("model '{}' must define at least one field", self.name)
            ));
        }

        let mut by_name = HashMap::with_capacity(self.fields.len());
        for (idx, field) in self.fields.iter().enumerate() {
            if by_name.insert(field.name.clone(), idx).is_some() {
                return Err(crate::rev_error!(
                    metadata,
                    format!("field '{}' is defined more than once in model '{}'", field.name, self.name)
                ));
            }
        }

        if self.primary_key.is_empty() {
            self.primary_key = self
                .fields
                .iter()
                .filter(|f| f.is_primary_key())
                .map(|f| f.name.clone())
                .collect();
        }
        if let Some(unknown) = self.primary_key.iter().find(|pk| !by_name.contains_key(*pk)) {
            return Err(crate::rev_error!(
                metadata,
                format!("primary key field '{}' does not exist in model '{}'", unknown, self.name)
            ));
        }

        self.fields_by_name = by_name;
        if self.label.is_none() {
            self.label = Some(self.name.clone());
        }
        if self.backend.is_none() {
            self.backend = Some(default_backend.to_string());
        }
        self.initialised = true;
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// 未初始化时返回 MetadataError
    pub fn check_initialised(&self) -> RevResult<()> {
        if self.initialised {
            Ok(())
        } else {
            Err(crate::rev_error!(
                metadata,
                format!("metadata for model '{}' has not been initialised", self.name)
            ))
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields_by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields_by_name.contains_key(name)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.as_deref().unwrap_or(crate::config::DEFAULT_BACKEND)
    }

    /// 根据主键值构造 where 子句；没有主键或主键值未设置时返回 None
    pub fn primary_key_where(&self, model: &Model) -> Option<JsonValue> {
        if self.primary_key.is_empty() {
            return None;
        }
        let mut clause = serde_json::Map::new();
        for pk in &self.primary_key {
            match model.get(pk) {
                Some(value) if !value.is_null() => {
                    clause.insert(pk.clone(), value.to_json_value());
                }
                _ => return None,
            }
        }
        Some(JsonValue::Object(clause))
    }
}

/// 模型定义
///
/// 类型化的模型声明：静态模型名加上字段列表，可选地调整元数据。
pub trait ModelDefinition: Send + Sync + 'static {
    fn model_name() -> &'static str;

    fn fields() -> RevResult<Vec<Field>>;

    fn configure(meta: ModelMeta) -> ModelMeta {
        meta
    }

    fn meta() -> RevResult<ModelMeta> {
        Ok(Self::configure(ModelMeta::new(Self::model_name()).fields(Self::fields()?)))
    }
}
