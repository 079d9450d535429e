// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// 内容: 问卷题目、步骤标题、地图弹窗标签
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{AssessmentStep, EsgCategory};

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 已提供的语言
pub fn available_locales() -> Vec<String> {
    rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use esg_atlas::i18n::t;
/// let msg = t("map.popup.esg_score");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 按指定语言翻译（不修改全局语言）
pub fn t_locale(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use esg_atlas::i18n::t_with_args;
/// let msg = t_with_args("cli.ingest.summary", &[("accepted", "3"), ("dropped", "1")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 问卷题目文本
///
/// index 为 0 起的题号
pub fn question_text(category: EsgCategory, index: usize, locale: &str) -> String {
    t_locale(
        &format!("questions.{}.q{}", category.as_str(), index + 1),
        locale,
    )
}

/// 步骤标题
pub fn step_title(step: AssessmentStep, locale: &str) -> String {
    t_locale(step.i18n_key(), locale)
}

/// 进度文本（如 "Step 2 of 5"）
pub fn progress_text((current, total): (u8, u8), locale: &str) -> String {
    t_locale("assessment.progress", locale)
        .replace("%{current}", &current.to_string())
        .replace("%{total}", &total.to_string())
}
