// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库, 语言文件位于 locales/
// 用途: 选择拒绝 / 分组校验失败的操作员提示
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化（fallback = en）
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）, 占位符格式 `%{name}`
///
/// # 示例
/// ```no_run
/// use solar_install_batching::i18n::t_with_args;
/// let msg = t_with_args("group.too_many_commercial", &[("count", "2")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |msg, (k, v)| {
        msg.replace(&format!("%{{{}}}", k), v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectId;
    use crate::domain::types::Classification;
    use crate::engine::error::{GroupValidationError, SelectionRejection};
    use std::sync::Mutex;

    // locale 为全局状态,测试默认并行执行,相关测试需串行化
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t("common.success"), "操作成功");

        set_locale("en");
        assert_eq!(t("common.success"), "Operation successful");
    }

    #[test]
    fn test_rejection_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let rejection = SelectionRejection::CapacityExceeded {
            project_id: ProjectId::new("R-7"),
            prospective_kw: 27.0,
            ceiling_kw: 25.0,
        };
        let msg = rejection.localized_message();
        assert!(msg.contains("27.00 kW"));
        assert!(msg.contains("25.00 kW"));

        let rejection = SelectionRejection::MixedClassification {
            project_id: ProjectId::new("C-1"),
            selected: Classification::Residential,
        };
        assert!(rejection.localized_message().contains("C-1"));

        set_locale("zh-CN");
        let msg = GroupValidationError::EmptyName.localized_message();
        assert_eq!(msg, "安装组名称不能为空");

        set_locale("en");
    }
}
