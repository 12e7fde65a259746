//! Извлечение выборок каналов из блока данных волны.
//!
//! Каналы лежат друг за другом целыми блоками. В комплексных волнах
//! действительная и мнимая части чередуются внутри каждой выборки.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ibw_types::{
    Axis, Curve, DataShape, DataType, Dataset, Endian, IbwResult, Image, NumberKind, Volume,
    WaveHeader5,
};

use crate::{binary::ByteCursor, shape::Classification, units::parse_unit};

/// Какую компоненту комплексной выборки читать.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Real,
    Imaginary,
}

/// Всё, что нужно для извлечения любого канала одной волны.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    pub buf: &'a [u8],
    /// Смещение начала данных (сразу за заголовками)
    pub origin: usize,
    pub endian: Endian,
    pub wave: &'a WaveHeader5,
    pub class: &'a Classification,
}

impl<'a> Extractor<'a> {
    /// Сырые выборки канала `i`, переведённые в f64 и умноженные на `q`.
    pub fn read_channel(
        &self,
        i: usize,
        part: Part,
        q: f64,
    ) -> IbwResult<Vec<f64>> {
        let data_type = self.wave.data_type;
        let n = self.class.samples_per_channel()?;
        let block_size = n * data_type.size();

        let mut cur = ByteCursor::at(self.buf, self.origin + i * block_size, self.endian);
        let block = cur.take(block_size, "wave data")?;

        Ok(convert_raw(block, n, data_type, part, self.endian, q))
    }

    /// Канал `i` как готовый набор данных.
    ///
    /// `unit` заменяет единицу данных из заголовка волны.
    pub fn dataset(
        &self,
        i: usize,
        unit: Option<&str>,
    ) -> IbwResult<Dataset> {
        let value = parse_unit(unit.unwrap_or(&self.wave.data_units));
        let q = value.multiplier();

        let data = self.read_channel(i, Part::Real, q)?;
        let imaginary = if self.wave.data_type.is_complex() {
            Some(self.read_channel(i, Part::Imaginary, q)?)
        } else {
            None
        };

        let n_dim = &self.class.n_dim;
        let dataset = match self.class.shape {
            DataShape::Curve => Dataset::Curve(Curve {
                x: self.axis(0),
                y_unit: value.base,
                data,
                imaginary,
            }),
            DataShape::Image => {
                let xres = n_dim[0] as usize;
                Dataset::Image(Image {
                    x: self.axis(0),
                    y: self.axis(1),
                    z_unit: value.base,
                    data: flip_rows(data, xres),
                    imaginary: imaginary.map(|im| flip_rows(im, xres)),
                })
            }
            DataShape::Volume => Dataset::Volume(Volume {
                x: self.axis(0),
                y: self.axis(1),
                z: self.axis(2),
                w_unit: value.base,
                data,
                imaginary,
            }),
        };

        Ok(dataset)
    }

    /// Ось `d` в базовых единицах СИ.
    fn axis(
        &self,
        d: usize,
    ) -> Axis {
        let unit = parse_unit(&self.wave.dim_units[d]);
        let q = unit.multiplier();
        let res = self.class.n_dim[d] as usize;

        Axis {
            res,
            real: q * self.wave.sf_a[d] * res as f64,
            offset: q * self.wave.sf_b[d],
            unit: unit.base,
        }
    }
}

/// Переводит `n` выборок блока в f64.
///
/// Для комплексных данных шаг равен двум компонентам, мнимая часть
/// начинается со смещения `type_size / 2`.
pub fn convert_raw(
    block: &[u8],
    n: usize,
    data_type: DataType,
    part: Part,
    endian: Endian,
    q: f64,
) -> Vec<f64> {
    match endian {
        Endian::Little => convert_typed::<LittleEndian>(block, n, data_type, part, q),
        Endian::Big => convert_typed::<BigEndian>(block, n, data_type, part, q),
    }
}

fn convert_typed<E: ByteOrder>(
    block: &[u8],
    n: usize,
    data_type: DataType,
    part: Part,
    q: f64,
) -> Vec<f64> {
    let size = data_type.kind.size();
    let stride = data_type.size();
    let start = match part {
        Part::Real => 0,
        Part::Imaginary => stride / 2,
    };

    (0..n)
        .map(|k| {
            let p = start + k * stride;
            q * read_value::<E>(&block[p..p + size], data_type.kind)
        })
        .collect()
}

fn read_value<E: ByteOrder>(
    b: &[u8],
    kind: NumberKind,
) -> f64 {
    match kind {
        NumberKind::Int8 => b[0] as i8 as f64,
        NumberKind::UInt8 => b[0] as f64,
        NumberKind::Int16 => E::read_i16(b) as f64,
        NumberKind::UInt16 => E::read_u16(b) as f64,
        NumberKind::Int32 => E::read_i32(b) as f64,
        NumberKind::UInt32 => E::read_u32(b) as f64,
        NumberKind::Float32 => E::read_f32(b) as f64,
        NumberKind::Float64 => E::read_f64(b),
    }
}

/// Переворачивает порядок строк: строка 0 файла становится последней.
pub fn flip_rows(
    data: Vec<f64>,
    xres: usize,
) -> Vec<f64> {
    if xres == 0 {
        return data;
    }
    data.chunks_exact(xres).rev().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_int_types() {
        let block = [0xFF, 0x01, 0x80, 0x00];
        let v = convert_raw(
            &block,
            4,
            DataType::real(NumberKind::Int8),
            Part::Real,
            Endian::Little,
            1.0,
        );
        assert_eq!(v, vec![-1.0, 1.0, -128.0, 0.0]);

        let v = convert_raw(
            &block,
            4,
            DataType::real(NumberKind::UInt8),
            Part::Real,
            Endian::Little,
            2.0,
        );
        assert_eq!(v, vec![510.0, 2.0, 256.0, 0.0]);

        let v = convert_raw(
            &block,
            2,
            DataType::real(NumberKind::Int16),
            Part::Real,
            Endian::Big,
            1.0,
        );
        assert_eq!(v, vec![-255.0, -32768.0]);

        let v = convert_raw(
            &block,
            1,
            DataType::real(NumberKind::UInt32),
            Part::Real,
            Endian::Little,
            1.0,
        );
        assert_eq!(v, vec![0x0080_01FF as f64]);
    }

    #[test]
    fn test_convert_complex_parts() {
        let mut block = Vec::new();
        for x in [1.0f32, -1.0, 2.0, -2.0, 3.0, -3.0] {
            block.extend_from_slice(&x.to_be_bytes());
        }
        let t = DataType::complex(NumberKind::Float32);

        let re = convert_raw(&block, 3, t, Part::Real, Endian::Big, 1.0);
        let im = convert_raw(&block, 3, t, Part::Imaginary, Endian::Big, 1.0);
        assert_eq!(re, vec![1.0, 2.0, 3.0]);
        assert_eq!(im, vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_convert_double_scaled() {
        let mut block = Vec::new();
        block.extend_from_slice(&250.0f64.to_le_bytes());
        let v = convert_raw(
            &block,
            1,
            DataType::real(NumberKind::Float64),
            Part::Real,
            Endian::Little,
            1e-3,
        );
        assert!((v[0] - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_flip_rows() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(flip_rows(data, 2), vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        assert_eq!(flip_rows(vec![], 3), Vec::<f64>::new());
    }
}
