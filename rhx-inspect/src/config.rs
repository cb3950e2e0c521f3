use std::{
    path::PathBuf,
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

use rhx_core::DecodeOptions;

use crate::{InspectError, InspectResult};

/// Формат вывода отчёта.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Человекочитаемая сводка.
    #[default]
    Text,
    /// Полный дамп `HeaderInfo` в JSON.
    Json,
}

/// Конфигурация запуска инспектора.
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    /// Файлы заголовков (.rhd / .rhs)
    pub files: Vec<PathBuf>,
    /// Формат вывода
    pub format: OutputFormat,
    /// Выводить каналы каждой группы (только для текстового формата)
    pub list_channels: bool,
    /// Ограничение времени на один файл (None = без ограничения)
    pub timeout: Option<Duration>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl InspectConfig {
    pub fn validate(&self) -> InspectResult<()> {
        if self.files.is_empty() {
            return Err(InspectError::Config("no input files given".to_string()));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(InspectError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Параметры декодирования для очередного файла. Срок отсчитывается от
    /// момента вызова.
    pub fn decode_options(
        &self,
        cancel: Arc<AtomicBool>,
    ) -> DecodeOptions {
        let options = DecodeOptions::new().with_cancel_flag(cancel);

        match self.timeout {
            Some(timeout) => options.with_timeout(timeout),
            None => options,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OutputFormat
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "summary" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format '{s}'. Use: text, json")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
