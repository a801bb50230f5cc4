//! 多语言校验消息模块
//!
//! 使用rat_embed_lang框架提供内置校验器的多语言错误消息

use once_cell::sync::Lazy;
use rat_embed_lang::register_translations;
use std::collections::HashMap;

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en-US";

static REGISTERED: Lazy<()> = Lazy::new(ValidationMessageI18n::register_all_translations);

/// 校验消息翻译注册器
pub struct ValidationMessageI18n;

impl ValidationMessageI18n {
    fn entry(
        translations: &mut HashMap<String, HashMap<String, String>>,
        code: &str,
        en: &str,
        zh: &str,
        ja: &str,
    ) {
        let mut messages = HashMap::new();
        messages.insert("en-US".to_string(), en.to_string());
        messages.insert("zh-CN".to_string(), zh.to_string());
        messages.insert("ja-JP".to_string(), ja.to_string());
        translations.insert(format!("validation.{}", code), messages);
    }

    /// 注册所有校验消息翻译
    pub fn register_all_translations() {
        let mut tr = HashMap::new();

        Self::entry(&mut tr, "required", "{field} is required", "{field} 为必填项", "{field} は必須です");
        Self::entry(&mut tr, "not_a_string", "{field} should be a string", "{field} 必须是字符串", "{field} は文字列である必要があります");
        Self::entry(&mut tr, "string_empty", "{field} must not be empty", "{field} 不能为空", "{field} を空にすることはできません");
        Self::entry(&mut tr, "no_regex_match", "{field} is not in the correct format", "{field} 格式不正确", "{field} の形式が正しくありません");
        Self::entry(&mut tr, "not_a_number", "{field} should be a number", "{field} 必须是数字", "{field} は数値である必要があります");
        Self::entry(&mut tr, "not_an_integer", "{field} should be an integer", "{field} 必须是整数", "{field} は整数である必要があります");
        Self::entry(&mut tr, "not_a_boolean", "{field} should be either true or false", "{field} 必须是 true 或 false", "{field} は true か false である必要があります");
        Self::entry(&mut tr, "min_string_length", "{field} must be at least {length} characters", "{field} 至少需要 {length} 个字符", "{field} は {length} 文字以上である必要があります");
        Self::entry(&mut tr, "max_string_length", "{field} must not be longer than {length} characters", "{field} 不能超过 {length} 个字符", "{field} は {length} 文字以下である必要があります");
        Self::entry(&mut tr, "min_value", "{field} must be at least {value}", "{field} 不能小于 {value}", "{field} は {value} 以上である必要があります");
        Self::entry(&mut tr, "max_value", "{field} must not be greater than {value}", "{field} 不能大于 {value}", "{field} は {value} 以下である必要があります");
        Self::entry(&mut tr, "no_selection_match", "{field} contains an invalid selection", "{field} 包含无效的选项", "{field} に無効な選択肢が含まれています");
        Self::entry(&mut tr, "list_empty", "{field} requires at least one selection", "{field} 至少需要选择一项", "{field} は少なくとも一つ選択する必要があります");
        Self::entry(&mut tr, "invalid_record", "{field} does not contain a valid record", "{field} 不是有效的记录", "{field} に有効なレコードが含まれていません");
        Self::entry(&mut tr, "not_a_date", "{field} should be a date", "{field} 必须是日期", "{field} は日付である必要があります");
        Self::entry(&mut tr, "not_a_time", "{field} should be a time", "{field} 必须是时间", "{field} は時刻である必要があります");
        Self::entry(&mut tr, "not_a_datetime", "{field} should be a date and time", "{field} 必须是日期时间", "{field} は日時である必要があります");
        Self::entry(&mut tr, "extra_field", "{field} is not a field of this model", "{field} 不是该模型的字段", "{field} はこのモデルのフィールドではありません");

        register_translations(tr);
    }

    /// 注册翻译并设置语言
    ///
    /// 未指定语言时依次读取 RAT_LANG、LANG 环境变量，最后回退到 en-US。
    pub fn init(language: Option<&str>) {
        Lazy::force(&REGISTERED);
        let lang = match language {
            Some(lang) => lang.to_string(),
            None => std::env::var("RAT_LANG")
                .or_else(|_| std::env::var("LANG"))
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
        };
        use rat_embed_lang::normalize_language_code;
        set_language(&normalize_language_code(&lang));
    }
}

/// 内置校验器的错误消息
///
/// `code` 为错误码（同时作为翻译键的后缀），`label` 替换消息中的 `{field}`。
pub fn validation_msg(code: &str, label: &str, params: &[(&str, &str)]) -> String {
    Lazy::force(&REGISTERED);
    let mut args: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
    args.push(("field", label));
    args.extend_from_slice(params);
    tf(&format!("validation.{}", code), &args)
}

/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{current_language, set_language, t, tf};
