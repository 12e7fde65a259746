/// Порядок байт файла.
///
/// Формат не хранит его явно: порядок выводится из младшего байта поля
/// версии и подтверждается контрольной суммой заголовка.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Little-endian (Windows, x86 Mac)
    #[default]
    Little,
    /// Big-endian (PowerPC Mac)
    Big,
}

impl Endian {
    pub fn is_little(&self) -> bool {
        *self == Endian::Little
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endian::Little => "little-endian",
            Endian::Big => "big-endian",
        }
    }
}

impl std::fmt::Display for Endian {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
