//! Внешний заголовок IGOR binary wave (.ibw)
//!
//! Файл начинается с заголовка BinHeader, за ним следует заголовок волны и
//! данные. Порядок байт нигде не записан: младший байт поля версии ненулевой
//! в little-endian файлах, а контрольная сумма обоих заголовков, посчитанная
//! 16-битными словами в правильном порядке, равна нулю.
//!
//! | версия | BinHeader | WaveHeader |
//! |--------|-----------|------------|
//! | 1      | 8         | 110        |
//! | 2      | 16        | 110        |
//! | 3      | 20        | 110        |
//! | 5      | 64        | 320        |

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ibw_types::{BinHeader, Endian, Headers, IbwError, IbwResult, MAX_DIMS};
use log::debug;

use crate::{binary::ByteCursor, wave::read_wave5};

/// Расширение файлов, используется только как слабый признак
pub const IBW_EXTENSION: &str = ".ibw";

pub const HEADER_SIZE1: usize = 8;
pub const HEADER_SIZE2: usize = 16;
pub const HEADER_SIZE3: usize = 20;
pub const HEADER_SIZE5: usize = 64;

/// Заголовок волны версий 1–3
pub const WAVE_SIZE2: usize = 110;

/// Заголовок волны версии 5
pub const WAVE_SIZE5: usize = 320;

/// Суммарный размер заголовков версии 5
pub const HEADERS_SIZE5: usize = HEADER_SIZE5 + WAVE_SIZE5;

/// Оценки уверенности [`detect`]
pub const DETECT_SCORE_HEADER: u8 = 100;
pub const DETECT_SCORE_NAME: u8 = 10;

/// Размеры заголовков для версии: (BinHeader, WaveHeader).
pub fn layout(version: u16) -> Option<(usize, usize)> {
    match version {
        1 => Some((HEADER_SIZE1, WAVE_SIZE2)),
        2 => Some((HEADER_SIZE2, WAVE_SIZE2)),
        3 => Some((HEADER_SIZE3, WAVE_SIZE2)),
        5 => Some((HEADER_SIZE5, WAVE_SIZE5)),
        _ => None,
    }
}

/// Аддитивная сумма 16-битных слов в заданном порядке байт.
///
/// Последний байт нечётного буфера игнорируется, как и в IGOR.
pub fn checksum(
    buf: &[u8],
    endian: Endian,
) -> u16 {
    buf.chunks_exact(2).fold(0u16, |sum, w| {
        let word = match endian {
            Endian::Little => LittleEndian::read_u16(w),
            Endian::Big => BigEndian::read_u16(w),
        };
        sum.wrapping_add(word)
    })
}

/// Результат самопроверки заголовка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub version: u16,
    pub endian: Endian,
    pub bin_header_size: usize,
    pub wave_header_size: usize,
}

impl Probe {
    pub fn headers_size(&self) -> usize {
        self.bin_header_size + self.wave_header_size
    }
}

/// Быстрая самопроверка: версия, порядок байт, размер и контрольная сумма.
///
/// Ничего, кроме первых `headers_size` байт, не читается.
pub fn probe(buf: &[u8]) -> IbwResult<Probe> {
    if buf.len() < HEADER_SIZE1 {
        return Err(IbwError::too_short(format!(
            "{} bytes, smallest header is {HEADER_SIZE1}",
            buf.len()
        )));
    }

    // Младший байт версии ненулевой, по нему определяем порядок байт.
    let raw = LittleEndian::read_u16(&buf[0..2]);
    debug!("raw version: {raw:#06x}");
    let (version, endian) = if raw & 0xff != 0 {
        (raw, Endian::Little)
    } else {
        (raw / 0x100, Endian::Big)
    };

    let Some((bin_header_size, wave_header_size)) = layout(version) else {
        return Err(IbwError::UnsupportedVersion {
            found: version,
            detail: "known versions are 1, 2, 3 and 5".to_string(),
        });
    };

    let headers_size = bin_header_size + wave_header_size;
    if buf.len() < headers_size {
        return Err(IbwError::too_short(format!(
            "{} bytes, version {version} headers need {headers_size}",
            buf.len()
        )));
    }

    let sum = checksum(&buf[..headers_size], endian);
    debug!("{endian}, version {version}, checksum {sum:#06x}");
    if sum != 0 {
        return Err(IbwError::ChecksumMismatch { sum });
    }

    Ok(Probe {
        version,
        endian,
        bin_header_size,
        wave_header_size,
    })
}

/// Читает оба заголовка.
///
/// Заголовок волны разбирается только для версии 5, у старших версий нет
/// многомерных данных.
pub fn read_headers(buf: &[u8]) -> IbwResult<Headers> {
    let p = probe(buf)?;
    let mut cur = ByteCursor::at(buf, 2, p.endian);

    let bin = read_bin_header(&mut cur, p.version)?;
    debug_assert_eq!(cur.position(), p.bin_header_size);
    debug!("wfm_size: {}", bin.wfm_size);

    let wave = match p.version {
        5 => Some(read_wave5(&mut cur)?),
        _ => None,
    };

    Ok(Headers {
        endian: p.endian,
        bin,
        wave,
        bin_header_size: p.bin_header_size,
        wave_header_size: p.wave_header_size,
    })
}

/// Поля BinHeader после версии, в порядке конкретной версии формата.
fn read_bin_header(
    cur: &mut ByteCursor<'_>,
    version: u16,
) -> IbwResult<BinHeader> {
    let mut h = BinHeader {
        version,
        ..BinHeader::default()
    };

    match version {
        1 => {
            h.wfm_size = cur.read_u32()?;
            h.checksum = cur.read_u16()?;
        }
        2 => {
            h.wfm_size = cur.read_u32()?;
            h.note_size = cur.read_u32()?;
            h.pict_size = cur.read_u32()?;
            h.checksum = cur.read_u16()?;
        }
        3 => {
            h.wfm_size = cur.read_u32()?;
            h.note_size = cur.read_u32()?;
            h.formula_size = cur.read_u32()?;
            h.pict_size = cur.read_u32()?;
            h.checksum = cur.read_u16()?;
        }
        5 => {
            h.checksum = cur.read_u16()?;
            h.wfm_size = cur.read_u32()?;
            h.formula_size = cur.read_u32()?;
            h.note_size = cur.read_u32()?;
            h.data_e_units_size = cur.read_u32()?;
            for i in 0..MAX_DIMS {
                h.dim_e_units_size[i] = cur.read_u32()?;
            }
            for i in 0..MAX_DIMS {
                h.dim_labels_size[i] = cur.read_u32()?;
            }
            h.indices_size = cur.read_u32()?;
            h.options_size1 = cur.read_u32()?;
            h.options_size2 = cur.read_u32()?;
            debug!(
                "formula {}, note {}, data_e_units {}, dim_e_units {:?}, dim_labels {:?}",
                h.formula_size, h.note_size, h.data_e_units_size, h.dim_e_units_size, h.dim_labels_size
            );
        }
        _ => {
            return Err(IbwError::UnsupportedVersion {
                found: version,
                detail: "known versions are 1, 2, 3 and 5".to_string(),
            })
        }
    }

    Ok(h)
}

/// Оценка того, что файл является IGOR binary wave.
///
/// 100 — заголовок прошёл самопроверку, 10 — совпало только расширение,
/// 0 — не похоже.
pub fn detect(
    name: &str,
    head: Option<&[u8]>,
) -> u8 {
    if let Some(head) = head {
        if probe(head).is_ok() {
            return DETECT_SCORE_HEADER;
        }
    }

    if name.to_lowercase().ends_with(IBW_EXTENSION) {
        DETECT_SCORE_NAME
    } else {
        0
    }
}
