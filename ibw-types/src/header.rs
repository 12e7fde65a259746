use crate::{DataType, Endian};

/// Максимальное число измерений волны
pub const MAX_DIMS: usize = 4;

/// Максимальная длина строки единиц измерения (без завершающего нуля)
pub const MAX_UNIT_CHARS: usize = 3;

/// Максимальная длина имени волны версии 5 (без завершающего нуля)
pub const MAX_WAVE_NAME5: usize = 31;

/// Внешний заголовок файла (BinHeader).
///
/// Набор полей зависит от версии; отсутствующие в версии размеры равны нулю.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinHeader {
    /// Версия формата (1, 2, 3 или 5)
    pub version: u16,
    /// Хранимая контрольная сумма заголовка и заголовка волны
    pub checksum: u16,
    /// Размер заголовка волны плюс данные
    pub wfm_size: u32,
    /// Размер формулы зависимости
    pub formula_size: u32,
    /// Размер текста заметки
    pub note_size: u32,
    /// Зарезервировано (0)
    pub pict_size: u32,
    /// Размер расширенных единиц данных
    pub data_e_units_size: u32,
    /// Размеры расширенных единиц по осям
    pub dim_e_units_size: [u32; MAX_DIMS],
    /// Размеры меток по осям
    pub dim_labels_size: [u32; MAX_DIMS],
    /// Размер строковых индексов (только текстовые волны)
    pub indices_size: u32,
    /// Зарезервировано (0)
    pub options_size1: u32,
    /// Зарезервировано (0)
    pub options_size2: u32,
}

/// Заголовок волны версии 5 (WaveHeader5), только значимые поля.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveHeader5 {
    /// Время создания (секунды с 1904-01-01)
    pub creation_date: u32,
    /// Время последнего изменения
    pub mod_date: u32,
    /// Общее число точек (произведение ненулевых размерностей)
    pub npts: u32,
    /// Тип значений
    pub data_type: DataType,
    /// Зарезервировано (1)
    pub wh_version: u16,
    /// Имя волны
    pub name: String,
    /// Число элементов по каждой оси, 0 — ось не используется.
    /// `[0]` — строки, `[1]` — столбцы и т.д.
    pub n_dim: [u32; MAX_DIMS],
    /// Шаг по оси: значение элемента `e` равно `sf_a[d] * e + sf_b[d]`
    pub sf_a: [f64; MAX_DIMS],
    /// Смещение по оси
    pub sf_b: [f64; MAX_DIMS],
    /// Единицы данных
    pub data_units: String,
    /// Единицы по осям
    pub dim_units: [String; MAX_DIMS],
    /// Значения полной шкалы имеют смысл
    pub fs_valid: bool,
    /// Максимум полной шкалы прибора
    pub top_full_scale: f64,
    /// Минимум полной шкалы прибора
    pub bot_full_scale: f64,
}

/// Результат разбора обоих заголовков.
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    /// Определённый по контрольной сумме порядок байт
    pub endian: Endian,
    pub bin: BinHeader,
    /// Заголовок волны, только для версии 5
    pub wave: Option<WaveHeader5>,
    /// Размер внешнего заголовка
    pub bin_header_size: usize,
    /// Размер заголовка волны
    pub wave_header_size: usize,
}

impl Headers {
    /// Суммарный размер обоих заголовков, смещение начала данных.
    pub fn headers_size(&self) -> usize {
        self.bin_header_size + self.wave_header_size
    }
}
