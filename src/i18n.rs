// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文，仅用于控制台提示
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）；不支持的语言回退到 zh-CN
pub fn set_locale(locale: &str) {
    let supported = rust_i18n::available_locales!();
    if supported.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale = %locale, "不支持的界面语言，使用 zh-CN");
        rust_i18n::set_locale("zh-CN");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use starward_uigf_sync::i18n::t;
/// let msg = t("resolve.done");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use starward_uigf_sync::i18n::t_with_args;
/// let msg = t_with_args("convert.done", &[("path", "/tmp/Starward_UIGF.json")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
