// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

/// 规范化语言代码
///
/// "zh" / "zh_CN" / "zh-cn" → "zh-CN"；"en-US" / "en_GB" → "en"；
/// 无法识别的返回 None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let lower = raw.trim().to_lowercase().replace('_', "-");
    let primary = lower.split('-').next().unwrap_or_default();
    match primary {
        "zh" => Some("zh-CN"),
        "en" => Some("en"),
        _ => None,
    }
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言（无法识别时回落到默认语言）
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    let resolved = normalize_locale(locale).unwrap_or(DEFAULT_LOCALE);
    if normalize_locale(locale).is_none() {
        tracing::warn!(requested = locale, fallback = resolved, "unsupported locale");
    }
    rust_i18n::set_locale(resolved);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inventory_reorder::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use inventory_reorder::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/products.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 错误码对应的本地化标题
pub fn error_title(code: &str) -> String {
    t(&format!("error.{}", code.to_lowercase()))
}
