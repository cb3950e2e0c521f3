use std::path::PathBuf;

use rhx_types::DecodeError;
use thiserror::Error;

pub type InspectResult<T> = std::result::Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    /// Заголовок не прошёл декодирование
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Ошибка вывода отчёта
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации в JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Некорректные параметры запуска
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Ошибка конкретного файла (путь + причина)
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<InspectError>,
    },
}

impl InspectError {
    pub fn in_file(
        self,
        path: impl Into<PathBuf>,
    ) -> Self {
        InspectError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
