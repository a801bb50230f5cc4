#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rev_models::i18n;
    use rev_models::{
        boolean_field, date_field, datetime_field, email_field, integer_field, number_field,
        record_field, record_list_field, selection_field, text_field, time_field, validate,
        AsyncFieldValidator, DataValue, FieldOptions, FieldValidationContext, InMemoryBackend,
        Model, ModelMeta, ModelOperation, ModelRegistry, ModelValidationResult, NumberConstraints,
        RevResult, SelectionItem, TextConstraints,
    };
    use std::sync::Arc;

    fn optional() -> FieldOptions {
        FieldOptions::new().required(false)
    }

    fn profile_meta() -> ModelMeta {
        ModelMeta::new("Profile").fields(vec![
            text_field(
                "name",
                TextConstraints::default().min_length(2).max_length(5),
                FieldOptions::new().label("Name"),
            )
            .unwrap(),
            text_field("nickname", TextConstraints::default().regex("^[a-z]+$"), optional()).unwrap(),
            email_field("email", optional()).unwrap(),
            number_field(
                "score",
                NumberConstraints::default().min_value(0.0).max_value(10.0),
                optional(),
            )
            .unwrap(),
            integer_field("count", NumberConstraints::default(), optional()).unwrap(),
            boolean_field("active", optional()).unwrap(),
            selection_field(
                "color",
                vec![SelectionItem::new("red", "Red"), SelectionItem::new("green", "Green")],
                false,
                optional(),
            )
            .unwrap(),
            selection_field(
                "tags",
                vec![SelectionItem::new("a", "A"), SelectionItem::new("b", "B")],
                true,
                FieldOptions::new(),
            )
            .unwrap(),
            date_field("birthday", optional()).unwrap(),
            time_field("alarm", optional()).unwrap(),
            datetime_field("updated", optional()).unwrap(),
            record_field("owner", "Tag", optional()).unwrap(),
            record_list_field("friends", "Tag", optional()).unwrap(),
        ])
    }

    fn registry_with(meta: ModelMeta) -> ModelRegistry {
        let registry = ModelRegistry::new();
        registry
            .register_backend("default", Arc::new(InMemoryBackend::new()))
            .unwrap();
        registry.register_meta(meta).unwrap();
        registry
    }

    fn valid_profile() -> Model {
        Model::new("Profile")
            .with("name", "Jane")
            .with("tags", vec!["a"])
    }

    async fn check(registry: &ModelRegistry, model: &Model) -> ModelValidationResult {
        validate(registry, model, &ModelOperation::new("create"), None)
            .await
            .unwrap()
    }

    fn codes(result: &ModelValidationResult, field: &str) -> Vec<String> {
        result
            .errors_for(field)
            .iter()
            .filter_map(|e| e.code.clone())
            .collect()
    }

    async fn field_codes(registry: &ModelRegistry, field: &str, value: impl Into<DataValue>) -> Vec<String> {
        let model = valid_profile().with(field, value);
        codes(&check(registry, &model).await, field)
    }

    #[tokio::test]
    async fn test_valid_profile_passes() {
        let registry = registry_with(profile_meta());
        let result = check(&registry, &valid_profile()).await;
        assert!(result.valid, "{:?}", result);
    }

    #[tokio::test]
    async fn test_required_fields() {
        let registry = registry_with(profile_meta());
        let result = check(&registry, &Model::new("Profile")).await;
        assert!(!result.valid);
        assert_eq!(codes(&result, "name"), vec!["required"]);
        assert_eq!(codes(&result, "tags"), vec!["required"]);
        assert!(codes(&result, "email").is_empty());

        let explicit_null = valid_profile().with("name", DataValue::Null);
        assert_eq!(codes(&check(&registry, &explicit_null).await, "name"), vec!["required"]);
    }

    #[tokio::test]
    async fn test_text_validators() {
        let registry = registry_with(profile_meta());
        assert_eq!(
            field_codes(&registry, "name", "").await,
            vec!["string_empty", "min_string_length"]
        );
        assert!(field_codes(&registry, "name", "   ").await.is_empty());
        assert_eq!(field_codes(&registry, "name", "abcdefg").await, vec!["max_string_length"]);
        assert_eq!(field_codes(&registry, "name", 42).await, vec!["not_a_string"]);
        assert_eq!(field_codes(&registry, "nickname", "ABC").await, vec!["no_regex_match"]);
        assert_eq!(field_codes(&registry, "email", "bad").await, vec!["no_regex_match"]);
        assert!(field_codes(&registry, "email", "jane@example.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_number_validators() {
        let registry = registry_with(profile_meta());
        assert_eq!(field_codes(&registry, "score", 11).await, vec!["max_value"]);
        assert_eq!(field_codes(&registry, "score", -1).await, vec!["min_value"]);
        assert_eq!(field_codes(&registry, "score", "abc").await, vec!["not_a_number"]);
        assert!(field_codes(&registry, "score", "5").await.is_empty());

        assert_eq!(field_codes(&registry, "count", 12.345).await, vec!["not_an_integer"]);
        assert_eq!(field_codes(&registry, "count", "3.0").await, vec!["not_an_integer"]);
        assert!(field_codes(&registry, "count", "34").await.is_empty());
        assert!(field_codes(&registry, "count", 7.0).await.is_empty());
        assert_eq!(
            field_codes(&registry, "count", true).await,
            vec!["not_an_integer", "not_a_number"]
        );
    }

    #[tokio::test]
    async fn test_boolean_and_selection_validators() {
        let registry = registry_with(profile_meta());
        assert_eq!(field_codes(&registry, "active", "yes").await, vec!["not_a_boolean"]);
        assert!(field_codes(&registry, "active", false).await.is_empty());

        assert_eq!(field_codes(&registry, "color", "blue").await, vec!["no_selection_match"]);
        assert!(field_codes(&registry, "color", "red").await.is_empty());

        let empty: Vec<&str> = Vec::new();
        assert_eq!(field_codes(&registry, "tags", empty).await, vec!["list_empty"]);
        assert_eq!(field_codes(&registry, "tags", vec!["a", "c"]).await, vec!["no_selection_match"]);
        assert_eq!(field_codes(&registry, "tags", "a").await, vec!["no_selection_match"]);
        assert!(field_codes(&registry, "tags", vec!["a", "b"]).await.is_empty());
    }

    #[tokio::test]
    async fn test_date_and_time_validators() {
        let registry = registry_with(profile_meta());
        assert_eq!(field_codes(&registry, "birthday", "2024-02-30").await, vec!["not_a_date"]);
        assert!(field_codes(&registry, "birthday", "2024-02-29").await.is_empty());
        assert_eq!(field_codes(&registry, "alarm", "25:00:00").await, vec!["not_a_time"]);
        assert!(field_codes(&registry, "alarm", "23:59:59").await.is_empty());
        assert_eq!(
            field_codes(&registry, "updated", "2024-01-01 10:00:00").await,
            vec!["not_a_datetime"]
        );
        assert!(field_codes(&registry, "updated", "2024-01-01T10:00:00").await.is_empty());
    }

    #[tokio::test]
    async fn test_record_validators() {
        let registry = registry_with(profile_meta());
        assert!(field_codes(&registry, "owner", Model::new("Tag")).await.is_empty());
        assert_eq!(field_codes(&registry, "owner", Model::new("Other")).await, vec!["invalid_record"]);
        assert_eq!(field_codes(&registry, "owner", "Tag").await, vec!["invalid_record"]);

        assert!(field_codes(&registry, "friends", vec![Model::new("Tag")]).await.is_empty());
        assert_eq!(field_codes(&registry, "friends", DataValue::Null).await, vec!["invalid_record"]);
        assert_eq!(
            field_codes(&registry, "friends", vec![Model::new("Other")]).await,
            vec!["invalid_record"]
        );
    }

    #[tokio::test]
    async fn test_extra_fields_become_model_errors() {
        let registry = registry_with(profile_meta());
        let result = check(&registry, &valid_profile().with("unknown", 1)).await;
        assert!(!result.valid);
        assert_eq!(result.model_errors.len(), 1);
        assert_eq!(result.model_errors[0].code.as_deref(), Some("extra_field"));
        assert_eq!(
            result.model_errors[0].data.get("field"),
            Some(&serde_json::json!("unknown"))
        );
    }

    struct RejectTaken;

    #[async_trait]
    impl AsyncFieldValidator for RejectTaken {
        fn name(&self) -> &str {
            "reject_taken"
        }

        async fn validate(&self, ctx: &FieldValidationContext<'_>) -> RevResult<()> {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            if ctx.value() == Some(&DataValue::from("taken")) {
                ctx.add_error("that username is taken".to_string(), "taken")?;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_custom_and_model_level_validators() {
        let username = text_field("username", TextConstraints::default(), FieldOptions::new())
            .unwrap()
            .with_validator("no_admin", |ctx| {
                if ctx.value() == Some(&DataValue::from("admin")) {
                    ctx.add_error("reserved".to_string(), "reserved")?;
                }
                Ok(())
            })
            .with_async_validator(Arc::new(RejectTaken));
        let meta = ModelMeta::new("Account")
            .field(username)
            .field(text_field("password", TextConstraints::default(), optional()).unwrap())
            .with_validate(|ctx| {
                if ctx.model.get("password") == ctx.model.get("username") {
                    ctx.add_field_error("password", "password must differ from username", Some("same_as_username"))?;
                }
                Ok(())
            });
        let registry = registry_with(meta);

        let admin = Model::new("Account").with("username", "admin");
        assert_eq!(codes(&check(&registry, &admin).await, "username"), vec!["reserved"]);

        let taken = Model::new("Account").with("username", "taken");
        assert_eq!(codes(&check(&registry, &taken).await, "username"), vec!["taken"]);

        let same = Model::new("Account")
            .with("username", "jane")
            .with("password", "jane");
        let result = check(&registry, &same).await;
        assert_eq!(codes(&result, "password"), vec!["same_as_username"]);
        assert!(codes(&result, "username").is_empty());

        let fine = Model::new("Account")
            .with("username", "jane")
            .with("password", "s3cret");
        assert!(check(&registry, &fine).await.valid);
    }

    #[test]
    fn test_validation_messages_follow_language() {
        i18n::ValidationMessageI18n::init(Some("en-US"));
        assert_eq!(i18n::validation_msg("required", "Name", &[]), "Name is required");
        assert_eq!(
            i18n::validation_msg("min_string_length", "Name", &[("length", "2")]),
            "Name must be at least 2 characters"
        );

        i18n::set_language("zh-CN");
        assert_eq!(i18n::validation_msg("required", "名称", &[]), "名称 为必填项");
        i18n::set_language("en-US");
    }
}
