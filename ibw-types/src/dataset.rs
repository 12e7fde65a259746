use crate::DataShape;

/// Одна ось набора данных.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Число элементов
    pub res: usize,
    /// Физическая длина оси (шаг × res) в базовых единицах СИ
    pub real: f64,
    /// Смещение начала оси
    pub offset: f64,
    /// Базовая единица СИ (без приставки)
    pub unit: String,
}

/// Кривая: одномерные выборки.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub x: Axis,
    pub y_unit: String,
    pub data: Vec<f64>,
    /// Мнимая часть для комплексных волн
    pub imaginary: Option<Vec<f64>>,
}

/// Изображение: двумерные выборки, построчно, `data[row * xres + col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub x: Axis,
    pub y: Axis,
    pub z_unit: String,
    pub data: Vec<f64>,
    /// Мнимая часть для комплексных волн
    pub imaginary: Option<Vec<f64>>,
}

/// Объём: трёхмерные выборки, `data[(level * yres + row) * xres + col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub x: Axis,
    pub y: Axis,
    pub z: Axis,
    pub w_unit: String,
    pub data: Vec<f64>,
    /// Мнимая часть для комплексных волн
    pub imaginary: Option<Vec<f64>>,
}

/// Готовый набор данных одного канала.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Curve(Curve),
    Image(Image),
    Volume(Volume),
}

impl Axis {
    pub fn new(
        res: usize,
        real: f64,
        unit: &str,
    ) -> Self {
        Axis {
            res,
            real,
            offset: 0.0,
            unit: unit.to_string(),
        }
    }

    /// Шаг между соседними элементами
    pub fn step(&self) -> f64 {
        if self.res == 0 {
            0.0
        } else {
            self.real / self.res as f64
        }
    }
}

impl Image {
    pub fn xres(&self) -> usize {
        self.x.res
    }

    pub fn yres(&self) -> usize {
        self.y.res
    }

    /// Значение в точке (`col`, `row`).
    pub fn get(
        &self,
        col: usize,
        row: usize,
    ) -> f64 {
        self.data[row * self.x.res + col]
    }

    /// Маска нечисловых выборок (NaN, ±inf); `None`, если таких нет.
    pub fn nan_mask(&self) -> Option<Vec<bool>> {
        if self.data.iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(self.data.iter().map(|v| !v.is_finite()).collect())
    }
}

impl Dataset {
    pub fn shape(&self) -> DataShape {
        match self {
            Dataset::Curve(_) => DataShape::Curve,
            Dataset::Image(_) => DataShape::Image,
            Dataset::Volume(_) => DataShape::Volume,
        }
    }

    pub fn data(&self) -> &[f64] {
        match self {
            Dataset::Curve(c) => &c.data,
            Dataset::Image(i) => &i.data,
            Dataset::Volume(v) => &v.data,
        }
    }

    pub fn imaginary(&self) -> Option<&[f64]> {
        match self {
            Dataset::Curve(c) => c.imaginary.as_deref(),
            Dataset::Image(i) => i.imaginary.as_deref(),
            Dataset::Volume(v) => v.imaginary.as_deref(),
        }
    }

    /// Единица значений (y для кривой, z для изображения, w для объёма)
    pub fn value_unit(&self) -> &str {
        match self {
            Dataset::Curve(c) => &c.y_unit,
            Dataset::Image(i) => &i.z_unit,
            Dataset::Volume(v) => &v.w_unit,
        }
    }

    /// Оси в порядке x, y, z.
    pub fn axes(&self) -> Vec<&Axis> {
        match self {
            Dataset::Curve(c) => vec![&c.x],
            Dataset::Image(i) => vec![&i.x, &i.y],
            Dataset::Volume(v) => vec![&v.x, &v.y, &v.z],
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Dataset::Image(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(data: Vec<f64>) -> Image {
        Image {
            x: Axis::new(2, 2e-6, "m"),
            y: Axis::new(2, 4e-6, "m"),
            z_unit: "V".to_string(),
            data,
            imaginary: None,
        }
    }

    #[test]
    fn test_axis_step() {
        assert_eq!(Axis::new(4, 2.0, "m").step(), 0.5);
        assert_eq!(Axis::new(0, 2.0, "m").step(), 0.0);
    }

    #[test]
    fn test_nan_mask() {
        assert!(image(vec![1.0, 2.0, 3.0, 4.0]).nan_mask().is_none());

        let mask = image(vec![1.0, f64::NAN, 3.0, f64::INFINITY])
            .nan_mask()
            .unwrap();
        assert_eq!(mask, vec![false, true, false, true]);
    }

    #[test]
    fn test_dataset_accessors() {
        let ds = Dataset::Image(image(vec![1.0, 2.0, 3.0, 4.0]));
        assert_eq!(ds.shape(), DataShape::Image);
        assert_eq!(ds.value_unit(), "V");
        assert_eq!(ds.axes().len(), 2);
        assert!(ds.imaginary().is_none());
        assert_eq!(ds.as_image().unwrap().get(1, 1), 4.0);
    }
}
