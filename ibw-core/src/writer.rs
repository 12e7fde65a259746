//! Запись изображений в файл версии 5.
//!
//! Все каналы должны иметь одинаковую геометрию: они сохраняются как одна
//! трёхмерная волна `xres × yres × nch` значений float32, за которой идёт
//! таблица меток каналов.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use ibw_types::{
    DataType, Endian, IbwError, IbwResult, Image, MAX_DIMS, MAX_UNIT_CHARS, MAX_WAVE_NAME5,
};
use log::{debug, info};

use crate::{
    binary::ByteSink,
    config::ExportConfig,
    format::{checksum, HEADERS_SIZE5, WAVE_SIZE5},
    trailing::{LABEL_MAX_CHARS, LABEL_SLOT_SIZE},
    wave::WAVE5_USED_SIZE,
};

/// Канал для записи: метка и изображение.
#[derive(Debug, Clone, Copy)]
pub struct ExportChannel<'a> {
    pub title: &'a str,
    pub image: &'a Image,
}

/// Собирает файл целиком в память.
pub fn encode(
    channels: &[ExportChannel<'_>],
    config: &ExportConfig,
) -> IbwResult<Vec<u8>> {
    let first = check_compatible(channels)?;
    let xres = first.xres();
    let yres = first.yres();
    let n = xres * yres;
    let npts = n * channels.len();

    let mut s = ByteSink::with_capacity(
        config.endian,
        HEADERS_SIZE5 + npts * 4 + channels.len() * LABEL_SLOT_SIZE,
    );

    let checksum_pos = encode_header(&mut s, first, channels.len(), config)?;
    debug_assert_eq!(s.len(), HEADERS_SIZE5);

    let sum = checksum(s.as_slice(), config.endian);
    s.patch_u16(checksum_pos, 0u16.wrapping_sub(sum));
    debug!("checksum {:#06x}", 0u16.wrapping_sub(sum));

    // В файле строки идут в обратном порядке.
    for channel in channels {
        for row in channel.image.data.chunks_exact(xres).rev() {
            for &v in row {
                s.put_f32(v as f32);
            }
        }
    }

    for channel in channels {
        let title = to_latin1(channel.title);
        let len = title.len().min(MAX_WAVE_NAME5);
        s.put_cstr(&title[..len], LABEL_MAX_CHARS);
    }

    Ok(s.into_inner())
}

/// Записывает файл в `writer`.
pub fn export<W: Write>(
    writer: &mut W,
    channels: &[ExportChannel<'_>],
    config: &ExportConfig,
) -> IbwResult<()> {
    let bytes = encode(channels, config)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Записывает файл по пути `path`.
///
/// При ошибке ввода/вывода файл может остаться недописанным, удалить его
/// должен вызывающий.
pub fn export_to_path<P: AsRef<Path>>(
    path: P,
    channels: &[ExportChannel<'_>],
    config: &ExportConfig,
) -> IbwResult<()> {
    let path = path.as_ref();
    // Проверяем каналы до создания файла.
    let bytes = encode(channels, config)?;

    let written = File::create(path).and_then(|file| {
        let mut w = BufWriter::new(file);
        w.write_all(&bytes)?;
        w.flush()
    });

    if let Err(e) = written {
        return Err(IbwError::Io(io::Error::new(
            e.kind(),
            format!(
                "{e}; remove the partially written file {}",
                path.display()
            ),
        )));
    }

    info!(
        "Exported {} channel(s) to {} ({} bytes)",
        channels.len(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Все каналы должны совпадать с первым по размеру, размаху, смещению и
/// единицам осей.
fn check_compatible<'a>(channels: &[ExportChannel<'a>]) -> IbwResult<&'a Image> {
    let Some(first) = channels.first() else {
        return Err(IbwError::invalid_input("no channels to export"));
    };
    let first = first.image;

    if first.xres() == 0 || first.yres() == 0 {
        return Err(IbwError::invalid_input(format!(
            "empty image {}×{}",
            first.xres(),
            first.yres()
        )));
    }

    for (i, c) in channels.iter().enumerate() {
        let im = c.image;
        if im.x != first.x || im.y != first.y {
            return Err(IbwError::invalid_input(format!(
                "channel {i} ('{}') differs from channel 0 in geometry or lateral units",
                c.title
            )));
        }
        if im.data.len() != first.xres() * first.yres() {
            return Err(IbwError::invalid_input(format!(
                "channel {i} ('{}') has {} samples, expected {}",
                c.title,
                im.data.len(),
                first.xres() * first.yres()
            )));
        }
    }

    Ok(first)
}

/// Пишет оба заголовка, возвращает смещение поля контрольной суммы.
fn encode_header(
    s: &mut ByteSink,
    first: &Image,
    nch: usize,
    config: &ExportConfig,
) -> IbwResult<usize> {
    let xres = first.xres();
    let yres = first.yres();
    let npts = xres * yres * nch;

    let wfm_size = u32::try_from(WAVE_SIZE5 + npts * 4)
        .map_err(|_| IbwError::invalid_input(format!("{npts} points do not fit the format")))?;
    let labels_size = u32::try_from(nch * LABEL_SLOT_SIZE)
        .map_err(|_| IbwError::invalid_input(format!("{nch} channels do not fit the format")))?;

    // BinHeader
    s.put_u16(5);
    let checksum_pos = s.put_u16(0);
    s.put_u32(wfm_size);
    s.put_u32(0); // formula
    s.put_u32(0); // note
    s.put_u32(0); // data_e_units
    for _ in 0..MAX_DIMS {
        s.put_u32(0);
    }
    for size in [0, 0, labels_size, 0] {
        s.put_u32(size);
    }
    s.put_u32(0); // indices
    s.put_u32(0); // options1
    s.put_u32(0); // options2

    // WaveHeader5
    let start = s.len();
    s.put_u32(0); // next
    s.put_u32(0); // creation_date
    s.put_u32(0); // mod_date
    s.put_u32(npts as u32);
    s.put_u16(DataType::FLOAT32.as_flags());
    s.put_u16(0); // lock
    s.put_zeros(6);
    s.put_u16(1); // wh_version
    let name = format!("{}{}", config.name_prefix, rand::random::<u32>());
    debug!("wave name: {name}");
    s.put_cstr(name.as_bytes(), MAX_WAVE_NAME5);
    s.put_zeros(8); // whpad2, dfolder

    for n in [xres as u32, yres as u32, nch as u32, 0] {
        s.put_u32(n);
    }
    for a in [first.x.step(), first.y.step(), 1.0, 1.0] {
        s.put_f64(a);
    }
    for b in [first.x.offset, first.y.offset, 0.0, 0.0] {
        s.put_f64(b);
    }

    s.put_cstr(short_unit(&first.z_unit), MAX_UNIT_CHARS);
    s.put_cstr(short_unit(&first.x.unit), MAX_UNIT_CHARS);
    s.put_cstr(short_unit(&first.y.unit), MAX_UNIT_CHARS);
    s.put_cstr(b"", MAX_UNIT_CHARS);
    s.put_cstr(b"", MAX_UNIT_CHARS);

    s.put_u16(0); // fs_valid
    s.put_u16(0); // whpad3
    s.put_f64(0.0);
    s.put_f64(0.0);
    debug_assert_eq!(s.len() - start, WAVE5_USED_SIZE);

    s.put_zeros(WAVE_SIZE5 - (s.len() - start));

    Ok(checksum_pos)
}

/// Единицы длиннее трёх байт записываются пустыми.
fn short_unit(unit: &str) -> &[u8] {
    if unit.len() <= MAX_UNIT_CHARS {
        unit.as_bytes()
    } else {
        b""
    }
}

/// Перевод в Latin-1, символы вне него заменяются на '?'.
fn to_latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use ibw_types::{Axis, IbwErrorKind};

    use super::*;

    fn image(
        xres: usize,
        yres: usize,
    ) -> Image {
        Image {
            x: Axis::new(xres, 1e-6, "m"),
            y: Axis::new(yres, 2e-6, "m"),
            z_unit: "m".to_string(),
            data: (0..xres * yres).map(|v| v as f64).collect(),
            imaginary: None,
        }
    }

    #[test]
    fn test_header_checksum_is_zero() {
        let im = image(4, 3);
        for endian in [Endian::Little, Endian::Big] {
            let bytes = encode(
                &[ExportChannel {
                    title: "Height",
                    image: &im,
                }],
                &ExportConfig::new(endian),
            )
            .unwrap();

            assert_eq!(bytes.len(), HEADERS_SIZE5 + 12 * 4 + LABEL_SLOT_SIZE);
            assert_eq!(checksum(&bytes[..HEADERS_SIZE5], endian), 0);
        }
    }

    #[test]
    fn test_rows_written_in_file_order() {
        let im = image(2, 2);
        let bytes = encode(
            &[ExportChannel {
                title: "Z",
                image: &im,
            }],
            &ExportConfig::default(),
        )
        .unwrap();

        let first = f32::from_le_bytes(bytes[HEADERS_SIZE5..HEADERS_SIZE5 + 4].try_into().unwrap());
        assert_eq!(first, 2.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let err = encode(&[], &ExportConfig::default()).unwrap_err();
        assert_eq!(err.kind(), IbwErrorKind::InvalidInput);

        let a = image(4, 4);
        let b = image(4, 2);
        let err = encode(
            &[
                ExportChannel {
                    title: "a",
                    image: &a,
                },
                ExportChannel {
                    title: "b",
                    image: &b,
                },
            ],
            &ExportConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), IbwErrorKind::InvalidInput);
    }

    #[test]
    fn test_latin1_and_units() {
        assert_eq!(to_latin1("µm Ω"), vec![0xB5, b'm', b' ', b'?']);
        assert_eq!(short_unit("deg"), b"deg");
        assert_eq!(short_unit("counts"), b"");
    }
}
