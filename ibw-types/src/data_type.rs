use crate::{IbwError, IbwResult};

/// Флаг комплексных данных в слове типа.
pub const TYPE_COMPLEX: u16 = 0x01;
pub const TYPE_SINGLE: u16 = 0x02;
pub const TYPE_DOUBLE: u16 = 0x04;
pub const TYPE_INT8: u16 = 0x08;
pub const TYPE_INT16: u16 = 0x10;
pub const TYPE_INT32: u16 = 0x20;
/// Флаг беззнаковых целых в слове типа.
pub const TYPE_UNSIGNED: u16 = 0x40;

/// Базовый числовой тип одной компоненты выборки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

/// Вещественные или комплексные выборки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Components {
    Real,
    /// Действительная и мнимая части чередуются внутри каждой выборки
    Complex,
}

/// Тип значений волны.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub kind: NumberKind,
    pub components: Components,
}

impl NumberKind {
    /// Размер одной компоненты в байтах
    pub fn size(&self) -> usize {
        match self {
            NumberKind::Int8 | NumberKind::UInt8 => 1,
            NumberKind::Int16 | NumberKind::UInt16 => 2,
            NumberKind::Int32 | NumberKind::UInt32 | NumberKind::Float32 => 4,
            NumberKind::Float64 => 8,
        }
    }

    fn flags(&self) -> u16 {
        match self {
            NumberKind::Int8 => TYPE_INT8,
            NumberKind::UInt8 => TYPE_INT8 | TYPE_UNSIGNED,
            NumberKind::Int16 => TYPE_INT16,
            NumberKind::UInt16 => TYPE_INT16 | TYPE_UNSIGNED,
            NumberKind::Int32 => TYPE_INT32,
            NumberKind::UInt32 => TYPE_INT32 | TYPE_UNSIGNED,
            NumberKind::Float32 => TYPE_SINGLE,
            NumberKind::Float64 => TYPE_DOUBLE,
        }
    }
}

impl DataType {
    pub const FLOAT32: DataType = DataType::real(NumberKind::Float32);

    pub const fn real(kind: NumberKind) -> Self {
        DataType {
            kind,
            components: Components::Real,
        }
    }

    pub const fn complex(kind: NumberKind) -> Self {
        DataType {
            kind,
            components: Components::Complex,
        }
    }

    /// Разбирает слово типа из заголовка волны.
    ///
    /// Текстовые волны (нет ни одного базового бита), unsigned float и
    /// неизвестные биты дают [`IbwError::UnsupportedType`].
    pub fn from_flags(flags: u16) -> IbwResult<Self> {
        let known = TYPE_COMPLEX
            | TYPE_SINGLE
            | TYPE_DOUBLE
            | TYPE_INT8
            | TYPE_INT16
            | TYPE_INT32
            | TYPE_UNSIGNED;
        if flags & !known != 0 {
            return Err(IbwError::unsupported_type(format!(
                "unknown type flags {flags:#06x}"
            )));
        }

        let unsigned = flags & TYPE_UNSIGNED != 0;
        let components = if flags & TYPE_COMPLEX != 0 {
            Components::Complex
        } else {
            Components::Real
        };

        let kind = match (flags & !(TYPE_COMPLEX | TYPE_UNSIGNED), unsigned) {
            (0, _) => {
                return Err(IbwError::unsupported_type(format!(
                    "text waves are not supported (flags {flags:#06x})"
                )))
            }
            (TYPE_INT8, false) => NumberKind::Int8,
            (TYPE_INT8, true) => NumberKind::UInt8,
            (TYPE_INT16, false) => NumberKind::Int16,
            (TYPE_INT16, true) => NumberKind::UInt16,
            (TYPE_INT32, false) => NumberKind::Int32,
            (TYPE_INT32, true) => NumberKind::UInt32,
            (TYPE_SINGLE, false) => NumberKind::Float32,
            (TYPE_DOUBLE, false) => NumberKind::Float64,
            (TYPE_SINGLE | TYPE_DOUBLE, true) => {
                return Err(IbwError::unsupported_type(format!(
                    "unsigned floating point (flags {flags:#06x})"
                )))
            }
            _ => {
                return Err(IbwError::unsupported_type(format!(
                    "ambiguous base type (flags {flags:#06x})"
                )))
            }
        };

        Ok(DataType { kind, components })
    }

    /// Обратное преобразование в слово типа.
    pub fn as_flags(&self) -> u16 {
        let complex = match self.components {
            Components::Real => 0,
            Components::Complex => TYPE_COMPLEX,
        };
        self.kind.flags() | complex
    }

    pub fn is_complex(&self) -> bool {
        self.components == Components::Complex
    }

    /// Размер одной выборки в байтах (обе компоненты для комплексных)
    pub fn size(&self) -> usize {
        match self.components {
            Components::Real => self.kind.size(),
            Components::Complex => 2 * self.kind.size(),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.components {
            Components::Real => write!(f, "{:?}", self.kind),
            Components::Complex => write!(f, "Complex{:?}", self.kind),
        }
    }
}
