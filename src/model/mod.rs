//! 模型定义系统模块
//!
//! 字段、校验器、校验结果、模型元数据和模型实例

pub mod convenience;
pub mod field_types;
pub mod instance;
pub mod macros;
pub mod meta;
pub mod validation;
pub mod validators;

pub use convenience::*;
pub use field_types::{
    Field, FieldKind, FieldOptions, NumberConstraints, SelectionItem, TextConstraints,
};
pub use instance::Model;
pub use meta::{
    AsyncModelHook, ModelDefinition, ModelHook, ModelMeta, ModelMethod, ModelValidationContext,
    RemovalValidationContext,
};
pub use validation::{FieldError, ModelError, ModelValidationResult};
pub use validators::{AsyncFieldValidator, BuiltinValidator, FieldValidationContext, Validator};
