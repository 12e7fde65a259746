use thiserror::Error;

/// Результат для операций IBW
pub type IbwResult<T> = std::result::Result<T, IbwError>;

/// Типы ошибок чтения и записи IBW файлов.
#[derive(Debug, Error)]
pub enum IbwError {
    /// Буфер короче минимального заголовка
    #[error("File is too short: {0}")]
    TooShort(String),

    /// Неизвестная или неподдерживаемая версия формата
    #[error("Unsupported version {found}: {detail}")]
    UnsupportedVersion { found: u16, detail: String },

    /// Контрольная сумма не сходится ни в одном порядке байт
    #[error("Checksum mismatch: header words sum to {sum:#06x}, not an IGOR binary wave")]
    ChecksumMismatch { sum: u16 },

    /// Тип данных не поддерживается (текст, unsigned float, ...)
    #[error("Unsupported data type: {0}")]
    UnsupportedType(String),

    /// Недопустимая комбинация размерностей
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Объявленный размер данных не согласован с размерностями
    #[error("Data size mismatch: {0}")]
    DataSizeMismatch(String),

    /// Объявленная длина секции выходит за конец файла
    #[error("Truncated section '{section}': needs {needed} bytes, {remaining} remaining")]
    TruncatedSection {
        section: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Некорректные входные данные для записи
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Вид ошибки без деталей, удобен для сравнения в тестах и у вызывающей стороны.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbwErrorKind {
    TooShort,
    UnsupportedVersion,
    ChecksumMismatch,
    UnsupportedType,
    UnsupportedShape,
    DataSizeMismatch,
    TruncatedSection,
    InvalidInput,
    Io,
}

impl IbwError {
    /// Удобные конструкторы
    pub fn too_short<S: Into<String>>(s: S) -> Self {
        Self::TooShort(s.into())
    }

    pub fn unsupported_type<S: Into<String>>(s: S) -> Self {
        Self::UnsupportedType(s.into())
    }

    pub fn unsupported_shape<S: Into<String>>(s: S) -> Self {
        Self::UnsupportedShape(s.into())
    }

    pub fn data_size_mismatch<S: Into<String>>(s: S) -> Self {
        Self::DataSizeMismatch(s.into())
    }

    pub fn invalid_input<S: Into<String>>(s: S) -> Self {
        Self::InvalidInput(s.into())
    }

    pub fn truncated(
        section: &'static str,
        needed: usize,
        remaining: usize,
    ) -> Self {
        Self::TruncatedSection {
            section,
            needed,
            remaining,
        }
    }

    pub fn kind(&self) -> IbwErrorKind {
        match self {
            IbwError::TooShort(_) => IbwErrorKind::TooShort,
            IbwError::UnsupportedVersion { .. } => IbwErrorKind::UnsupportedVersion,
            IbwError::ChecksumMismatch { .. } => IbwErrorKind::ChecksumMismatch,
            IbwError::UnsupportedType(_) => IbwErrorKind::UnsupportedType,
            IbwError::UnsupportedShape(_) => IbwErrorKind::UnsupportedShape,
            IbwError::DataSizeMismatch(_) => IbwErrorKind::DataSizeMismatch,
            IbwError::TruncatedSection { .. } => IbwErrorKind::TruncatedSection,
            IbwError::InvalidInput(_) => IbwErrorKind::InvalidInput,
            IbwError::Io(_) => IbwErrorKind::Io,
        }
    }

    /// Ошибка структуры файла, прерывающая декодирование целиком.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self.kind(),
            IbwErrorKind::TruncatedSection | IbwErrorKind::InvalidInput | IbwErrorKind::Io
        )
    }
}
