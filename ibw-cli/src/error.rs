use std::path::PathBuf;

use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка чтения или записи файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка формата IBW
    #[error("IBW error: {0}")]
    Ibw(#[from] ibw_types::IbwError),

    /// Ошибка сериализации сводки
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Во входном файле нет изображений для записи
    #[error("No image channels to export in {0:?}")]
    NoImages(PathBuf),
}
