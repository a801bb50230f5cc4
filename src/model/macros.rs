//! 模型相关的宏定义
//!
//! 提供便捷的宏来声明类型化模型

/// 便捷宏：定义模型
///
/// 生成一个单元结构体并为其实现 `ModelDefinition`。
///
/// ```ignore
/// define_model! {
///     pub struct Person("Person") {
///         name: text_field("name", TextConstraints::default(), FieldOptions::new()),
///         age: integer_field("age", NumberConstraints::default(), FieldOptions::new()),
///     }
///     configure = |meta| meta.primary_key(&["name"]),
/// }
/// ```
#[macro_export]
macro_rules! define_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($model_name:expr) {
            $(
                $field:ident: $field_def:expr,
            )*
        }
        $(
            configure = $configure:expr,
        )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::model::ModelDefinition for $name {
            fn model_name() -> &'static str {
                $model_name
            }

            fn fields() -> $crate::error::RevResult<Vec<$crate::model::Field>> {
                let fields: Vec<$crate::model::Field> = vec![
                    $(
                        $field_def?,
                    )*
                ];
                $(
                    $crate::debug_log!("声明字段: {}.{}", $model_name, stringify!($field));
                )*
                Ok(fields)
            }

            $(
                fn configure(meta: $crate::model::ModelMeta) -> $crate::model::ModelMeta {
                    let configure: fn($crate::model::ModelMeta) -> $crate::model::ModelMeta = $configure;
                    configure(meta)
                }
            )?
        }
    };
}
