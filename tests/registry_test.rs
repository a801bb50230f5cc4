#[cfg(test)]
mod tests {
    use rev_models::{
        create, define_model, text_field, FieldOptions, InMemoryBackend, Model, ModelMeta,
        ModelRegistry, RevConfig, RevError, TextConstraints,
    };
    use std::sync::Arc;

    define_model! {
        pub struct Tag("Tag") {
            label: text_field("label", TextConstraints::default().max_length(20), FieldOptions::new()),
        }
    }

    #[test]
    fn test_register_and_lookup_models() {
        println!("🔍 测试模型注册");
        let registry = ModelRegistry::new();
        registry.register::<Tag>(None).unwrap();

        assert!(registry.is_registered("Tag"));
        assert_eq!(registry.get_model_names(), vec!["Tag".to_string()]);
        let meta = registry.get_model_meta("Tag").unwrap();
        assert!(meta.is_initialised());
        assert_eq!(meta.label.as_deref(), Some("Tag"));
        assert_eq!(meta.backend_name(), "default");

        let err = registry.register::<Tag>(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ModelError: Model 'Tag' already exists in the registry."
        );

        let err = registry.get_model_meta("Nope").unwrap_err();
        assert!(matches!(err, RevError::NotFound { .. }));
        assert!(err
            .to_string()
            .contains("Model 'Nope' does not exist in the registry."));
        println!("✅ 注册表消息正确");
    }

    #[test]
    fn test_register_rejects_mismatched_meta_name() {
        let registry = ModelRegistry::new();
        let err = registry
            .register::<Tag>(Some(ModelMeta::new("Label")))
            .unwrap_err();
        assert!(err.to_string().contains("Model name does not match meta.name"));
        assert!(!registry.is_registered("Label"));

        // 提供的元数据没有字段时使用模型声明的字段
        registry
            .register::<Tag>(Some(ModelMeta::new("Tag").label("Tags")))
            .unwrap();
        let meta = registry.get_model_meta("Tag").unwrap();
        assert_eq!(meta.label.as_deref(), Some("Tags"));
        assert!(meta.has_field("label"));
    }

    #[test]
    fn test_register_meta_requires_fields() {
        let registry = ModelRegistry::new();
        let err = registry.register_meta(ModelMeta::new("Empty")).unwrap_err();
        assert!(matches!(err, RevError::MetadataError { .. }));
        assert!(!registry.is_registered("Empty"));
    }

    #[test]
    fn test_backend_registration() {
        let registry = ModelRegistry::new();

        let err = registry
            .register_backend("", Arc::new(InMemoryBackend::new()))
            .unwrap_err();
        assert!(err.to_string().contains("you must specify a name for the backend"));

        registry
            .register_backend("main", Arc::new(InMemoryBackend::new()))
            .unwrap();
        registry
            .register_backend("main", Arc::new(InMemoryBackend::new()))
            .unwrap();
        assert!(registry.is_backend_registered("main"));
        assert_eq!(registry.get_backend_names(), vec!["main".to_string()]);

        let err = registry.get_backend("archive").err().unwrap();
        assert!(err
            .to_string()
            .contains("Backend 'archive' has not been configured."));
    }

    #[test]
    fn test_config_default_backend_applies_to_models() {
        let config = RevConfig::builder()
            .default_backend("memory")
            .build()
            .unwrap();
        let registry = ModelRegistry::with_config(config);
        registry.register::<Tag>(None).unwrap();
        assert_eq!(registry.get_model_meta("Tag").unwrap().backend_name(), "memory");

        let explicit = ModelMeta::new("Note")
            .backend("archive")
            .field(text_field("body", TextConstraints::default(), FieldOptions::new()).unwrap());
        registry.register_meta(explicit).unwrap();
        assert_eq!(registry.get_model_meta("Note").unwrap().backend_name(), "archive");
    }

    #[test]
    fn test_operations_need_configured_backend() {
        let registry = ModelRegistry::new();
        registry.register::<Tag>(None).unwrap();

        let model = Model::of::<Tag>().with("label", "rust");
        let err = tokio_test::block_on(create(&registry, &model, None)).unwrap_err();
        assert!(err
            .to_string()
            .contains("Backend 'default' has not been configured."));

        let err = tokio_test::block_on(create(&registry, &Model::new("Ghost"), None)).unwrap_err();
        assert!(err
            .to_string()
            .contains("Model 'Ghost' does not exist in the registry."));
    }
}
