use ibw_types::Endian;

/// Префиксы записей заметки, которые не переносятся в метаданные каналов.
pub const DEFAULT_IGNORE_PREFIXES: &[&str] = &[
    "Channel", "ColorMap", "Display", "Flatten", "PlaneFit", "Planefit",
];

/// Префикс имени волны при записи
pub const DEFAULT_NAME_PREFIX: &str = "ibw";

/// Настройки чтения файла.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Разбирать заметку даже без сигнатуры Asylum Research
    pub parse_base_notes: bool,
    /// Прикреплять записи заметки к каналам как метаданные
    pub channel_metadata: bool,
    /// Префиксы ключей заметки, которые пропускаются
    pub ignore_prefixes: Vec<String>,
}

/// Настройки записи файла.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Порядок байт выходного файла
    pub endian: Endian,
    /// Префикс случайного имени волны
    pub name_prefix: String,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Нужно ли разбирать заметку для файла данной программы.
    pub fn parse_note_for(
        &self,
        asylum: bool,
    ) -> bool {
        asylum || self.parse_base_notes
    }
}

impl ExportConfig {
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            ..Self::default()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для DecodeConfig, ExportConfig
////////////////////////////////////////////////////////////////////////////////

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            parse_base_notes: false,
            channel_metadata: true,
            ignore_prefixes: DEFAULT_IGNORE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            endian: Endian::Little,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
