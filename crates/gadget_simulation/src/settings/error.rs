//! Ошибки загрузки настроек

use thiserror::Error;

/// Ошибки загрузки gameplay настроек
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Файл настроек не прочитался
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// RON не распарсился
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Имя клавиши не распознано
    #[error("unknown key `{key}` bound to action `{action}`")]
    UnknownKey {
        /// Action из `controls` (right/left/jump/shoot)
        action: &'static str,
        /// Имя клавиши из файла
        key: String,
    },

    /// Значение вне допустимого диапазона
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
