use ibw_types::{DataShape, IbwError, IbwResult, MAX_DIMS};
use log::warn;

/// Результат классификации размерностей.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub shape: DataShape,
    /// Размерности после возможной коррекции
    pub n_dim: [u32; MAX_DIMS],
    /// Число каналов: размер оси с индексом ранга
    pub channels: usize,
    /// Сработала коррекция кривой в изображение
    pub corrected: bool,
}

impl Classification {
    /// Число точек одного канала
    pub fn samples_per_channel(&self) -> IbwResult<usize> {
        let n = checked_product(&self.n_dim[..self.shape.rank()])?;
        usize::try_from(n).map_err(|_| {
            IbwError::data_size_mismatch(format!("{n} samples per channel do not fit in memory"))
        })
    }

    /// Произведение размерностей 0..=rank, должно совпасть с npts
    pub fn total_points(&self) -> IbwResult<u64> {
        checked_product(&self.n_dim[..=self.shape.rank()])
    }
}

fn checked_product(dims: &[u32]) -> IbwResult<u64> {
    dims.iter()
        .try_fold(1u64, |acc, &n| acc.checked_mul(u64::from(n)))
        .ok_or_else(|| {
            IbwError::data_size_mismatch(format!("resolutions {dims:?} overflow the point count"))
        })
}

/// Определяет форму данных по ненулевым размерностям.
pub fn classify(n_dim: [u32; MAX_DIMS]) -> IbwResult<Classification> {
    let mut n_dim = n_dim;

    let mut shape = if n_dim[3] != 0 {
        // Многоканальные объёмы, похоже, всегда разбиты на отдельные файлы.
        if n_dim[3] != 1 {
            return Err(IbwError::unsupported_shape(format!(
                "n_dim[3] = {}, only 1 is supported",
                n_dim[3]
            )));
        }
        DataShape::Volume
    } else if n_dim[2] != 0 {
        DataShape::Image
    } else if n_dim[1] != 0 {
        DataShape::Curve
    } else {
        return Err(IbwError::unsupported_shape(format!(
            "n_dim[1] = 0 (dimensions {n_dim:?})"
        )));
    };

    let corrected = fix_zero_channel_image(&mut shape, &mut n_dim);

    for (i, &n) in n_dim[..=shape.rank()].iter().enumerate() {
        if n == 0 {
            return Err(IbwError::unsupported_shape(format!(
                "n_dim[{i}] = 0 below the {shape} rank"
            )));
        }
    }

    Ok(Classification {
        shape,
        n_dim,
        channels: n_dim[shape.rank()] as usize,
        corrected,
    })
}

/// Некоторые программы записывают одноканальное изображение с n_dim[2] = 0,
/// тогда оно выглядит как набор кривых с n_dim[1] == n_dim[0]. Такие данные
/// считаем одним изображением. Граница условия подобрана по реальным файлам.
fn fix_zero_channel_image(
    shape: &mut DataShape,
    n_dim: &mut [u32; MAX_DIMS],
) -> bool {
    if *shape == DataShape::Curve && n_dim[1] == n_dim[0] {
        warn!("Fixing data with zero n_dim[2] to a single image.");
        *shape = DataShape::Image;
        n_dim[DataShape::Image.rank()] = 1;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use ibw_types::IbwErrorKind;

    use super::*;

    #[test]
    fn test_single_curve() {
        let c = classify([10, 1, 0, 0]).unwrap();
        assert_eq!(c.shape, DataShape::Curve);
        assert_eq!(c.channels, 1);
        assert_eq!(c.samples_per_channel().unwrap(), 10);
        assert!(!c.corrected);
    }

    #[test]
    fn test_multichannel_curves() {
        let c = classify([10, 5, 0, 0]).unwrap();
        assert_eq!(c.shape, DataShape::Curve);
        assert_eq!(c.channels, 5);
        assert_eq!(c.total_points().unwrap(), 50);
    }

    #[test]
    fn test_zero_channel_image_fix() {
        let c = classify([10, 10, 0, 0]).unwrap();
        assert_eq!(c.shape, DataShape::Image);
        assert_eq!(c.channels, 1);
        assert_eq!(c.n_dim, [10, 10, 1, 0]);
        assert_eq!(c.samples_per_channel().unwrap(), 100);
        assert!(c.corrected);
    }

    #[test]
    fn test_image_and_volume() {
        let c = classify([256, 128, 4, 0]).unwrap();
        assert_eq!(c.shape, DataShape::Image);
        assert_eq!(c.channels, 4);
        assert_eq!(c.samples_per_channel().unwrap(), 256 * 128);

        let c = classify([8, 8, 16, 1]).unwrap();
        assert_eq!(c.shape, DataShape::Volume);
        assert_eq!(c.channels, 1);
        assert_eq!(c.total_points().unwrap(), 8 * 8 * 16);
    }

    #[test]
    fn test_huge_resolutions_overflow() {
        let c = classify([u32::MAX, u32::MAX, u32::MAX, 0]).unwrap();
        assert_eq!(
            c.total_points().unwrap_err().kind(),
            IbwErrorKind::DataSizeMismatch
        );
        // Две оси u32::MAX ещё помещаются в u64.
        assert_eq!(
            c.samples_per_channel().unwrap() as u64,
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );

        let c = classify([u32::MAX, u32::MAX, u32::MAX, 1]).unwrap();
        assert_eq!(
            c.samples_per_channel().unwrap_err().kind(),
            IbwErrorKind::DataSizeMismatch
        );
    }

    #[test]
    fn test_rejected_shapes() {
        for n_dim in [[8, 8, 16, 2], [10, 0, 0, 0], [0, 0, 0, 0], [0, 5, 3, 0]] {
            let err = classify(n_dim).unwrap_err();
            assert_eq!(err.kind(), IbwErrorKind::UnsupportedShape, "{n_dim:?}");
        }
    }
}
