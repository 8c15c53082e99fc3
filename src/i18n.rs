// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（回退语言）和波斯语
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
/// - locale: 语言代码（"en" 或 "fa"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use smart_vista::i18n::t;
/// let msg = t("common.nominal");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use smart_vista::i18n::t_with_args;
/// let msg = t_with_args("alerts.energy_above_target", &[("carrier", "Gas")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
// 为避免测试互相干扰，涉及 locale 的测试通过此锁串行化。
#[cfg(test)]
pub(crate) fn locale_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCALE_TEST_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_locale() {
        let _guard = locale_test_guard();
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("fa");
        assert_eq!(current_locale(), "fa");

        // 恢复默认语言
        set_locale("en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = locale_test_guard();
        set_locale("en");
        assert_eq!(t("common.nominal"), "System stable");

        set_locale("fa");
        assert_eq!(t("common.nominal"), "سیستم پایدار است");

        set_locale("en");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = locale_test_guard();
        set_locale("en");
        let msg = t_with_args("alerts.energy_above_target", &[("carrier", "Gas")]);
        assert_eq!(msg, "Gas usage is above target");

        set_locale("fa");
        let msg = t_with_args("alerts.energy_above_target", &[("carrier", "گاز")]);
        assert!(msg.contains("گاز"));

        set_locale("en");
    }
}
