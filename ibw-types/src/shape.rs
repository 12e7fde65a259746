/// Форма данных волны.
///
/// Значение совпадает с рангом: индекс оси, которая хранит число каналов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataShape {
    /// Набор кривых
    Curve = 1,
    /// Набор изображений
    Image = 2,
    /// Набор объёмных данных
    Volume = 3,
}

impl DataShape {
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataShape::Curve => "curve",
            DataShape::Image => "image",
            DataShape::Volume => "volume",
        }
    }
}

impl std::fmt::Display for DataShape {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
