//! Keyword classifier for incoming support messages.
//!
//! Categories are tested in a fixed priority order and the first match
//! wins, so a message mentioning both a password and a VPN is filed under
//! `password`. Matching is a case-insensitive substring test.

use helpdesk_types::exchange::Category;

/// Ordered (category, keywords) table. Order is the tie-break policy.
pub const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Password,
        &["пароль", "password", "забыл", "сброс", "reset", "войти", "логин"],
    ),
    (
        Category::Access,
        &["доступ", "папка", "файл", "права", "разрешение", "access", "folder"],
    ),
    (
        Category::Documents,
        &["документ", "отправить", "файл", "прикрепить", "загрузить", "document"],
    ),
    (
        Category::Connection,
        &["подключение", "интернет", "сеть", "vpn", "wi-fi", "wifi", "connection"],
    ),
    (
        Category::Software,
        &["программа", "установить", "обновить", "софт", "приложение", "software"],
    ),
];

/// Classify a message into a support category.
///
/// Total over all input; anything without a keyword hit (including the
/// empty string) is `General`.
pub fn classify(message: &str) -> Category {
    let lowered = message.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
