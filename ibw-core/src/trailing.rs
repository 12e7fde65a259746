//! Необязательные секции после данных волны.
//!
//! Секции идут строго в порядке файла и не имеют разделителей, известна
//! только их объявленная длина:
//!
//! ```text
//! формула зависимости | заметка | расш. единицы данных | 4 × расш. единицы осей
//! | метки осей 0..4 | (палитра + подвал, только у Asylum Research)
//! ```

use std::collections::BTreeMap;

use ibw_types::{BinHeader, DataShape, Endian, IbwError, IbwResult, WaveHeader5, MAX_DIMS};
use log::{debug, warn};

use crate::{
    binary::{decode_cstr, decode_text, ByteCursor},
    shape::Classification,
};

/// Ширина слота в таблице меток каналов: 32 символа и завершающий ноль.
/// Значение эмпирическое.
pub const LABEL_SLOT_SIZE: usize = 33;

/// Длина метки без завершающего нуля
pub const LABEL_MAX_CHARS: usize = LABEL_SLOT_SIZE - 1;

/// Размер палитры между метками и подвалом Asylum Research
pub const ASYLUM_PALETTE_SIZE: usize = 3 * 256;

/// Пары ключ:значение из заметки
pub type NoteMap = BTreeMap<String, String>;

/// Результат обхода необязательных секций.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailingMetadata {
    /// Разобранная заметка, если её разбирали и в ней есть пары
    pub note: Option<NoteMap>,
    /// Метки каналов: слот 0 — заглушка, слоты 1..=N — каналы
    pub labels: Vec<Option<String>>,
    /// Смещение первого байта после всех блоков меток
    pub tail_offset: Option<usize>,
    /// Первая секция, которая не поместилась в файл
    pub truncated: Option<&'static str>,
}

impl TrailingMetadata {
    /// Метка канала `i` (нумерация каналов с нуля).
    pub fn channel_label(
        &self,
        i: usize,
    ) -> Option<&str> {
        self.labels.get(i + 1).and_then(|l| l.as_deref())
    }
}

/// Проверяет согласованность размера данных до чтения любой секции.
///
/// Возвращает размер блока данных в байтах.
pub fn validate_payload(
    bin: &BinHeader,
    wave: &WaveHeader5,
    class: &Classification,
    wave_header_size: usize,
) -> IbwResult<usize> {
    let points = class.total_points()?;
    if u64::from(wave.npts) != points {
        let dims = class.n_dim[..=class.shape.rank()]
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("×");
        return Err(IbwError::data_size_mismatch(format!(
            "number of data points {} does not match resolutions {dims}",
            wave.npts
        )));
    }

    let wfm_size = bin.wfm_size as usize;
    if wfm_size <= wave_header_size {
        return Err(IbwError::data_size_mismatch(format!(
            "wfmSize {wfm_size} does not exceed the wave header size {wave_header_size}"
        )));
    }

    let type_size = wave.data_type.size();
    let payload = wfm_size - wave_header_size;
    let samples = class.samples_per_channel()?;
    let expected = (samples as u64)
        .checked_mul(class.channels as u64)
        .and_then(|n| n.checked_mul(type_size as u64));
    if expected != Some(payload as u64) {
        return Err(IbwError::data_size_mismatch(format!(
            "data size {payload} does not match {samples} samples × {} channels × {type_size} bytes",
            class.channels
        )));
    }

    Ok(payload)
}

/// Обходит необязательные секции, начиная со смещения `start`.
///
/// Усечённая секция и все следующие за ней считаются отсутствующими.
pub fn scan(
    buf: &[u8],
    start: usize,
    endian: Endian,
    bin: &BinHeader,
    class: &Classification,
    parse_note_text: bool,
) -> TrailingMetadata {
    let mut meta = TrailingMetadata {
        labels: vec![None; class.channels + 1],
        ..TrailingMetadata::default()
    };
    let mut cur = ByteCursor::at(buf, start, endian);

    if let Err(e) = walk(&mut cur, bin, class.shape, parse_note_text, &mut meta) {
        warn!("Optional metadata ignored: {e}");
        if let IbwError::TruncatedSection { section, .. } = e {
            meta.truncated = Some(section);
        }
    }

    meta
}

fn walk(
    cur: &mut ByteCursor<'_>,
    bin: &BinHeader,
    shape: DataShape,
    parse_note_text: bool,
    meta: &mut TrailingMetadata,
) -> IbwResult<()> {
    debug!("remaining data size: {}", cur.remaining());

    cur.skip(bin.formula_size as usize, "formula")?;

    let note = cur.take(bin.note_size as usize, "note")?;
    if parse_note_text && !note.is_empty() {
        meta.note = parse_note(note);
    }

    cur.skip(bin.data_e_units_size as usize, "extended data units")?;
    for i in 0..MAX_DIMS {
        cur.skip(bin.dim_e_units_size[i] as usize, "extended dimension units")?;
    }

    // Метки младших осей нам не нужны.
    let rank = shape.rank();
    for i in 0..rank {
        cur.skip(bin.dim_labels_size[i] as usize, "dimension labels")?;
    }

    let labels = cur.take(bin.dim_labels_size[rank] as usize, "channel labels")?;
    read_channel_labels(labels, &mut meta.labels);

    for i in rank + 1..MAX_DIMS {
        cur.skip(bin.dim_labels_size[i] as usize, "dimension labels")?;
    }

    meta.tail_offset = Some(cur.position());
    debug!("remaining {} bytes after labels", cur.remaining());

    Ok(())
}

/// Заполняет слоты меток; слоты за пределами таблицы остаются пустыми.
fn read_channel_labels(
    table: &[u8],
    labels: &mut Vec<Option<String>>,
) {
    let count = table.len() / LABEL_SLOT_SIZE;
    if labels.len() < count {
        labels.resize(count, None);
    }

    for (i, slot) in table.chunks_exact(LABEL_SLOT_SIZE).enumerate() {
        let label = decode_cstr(&slot[..LABEL_MAX_CHARS]);
        debug!("label{i}={label}");
        labels[i] = if label.is_empty() { None } else { Some(label) };
    }
}

/// Разбирает заметку в пары `ключ:значение`, по одной на строку.
///
/// Строки без двоеточия пропускаются. Если пар нет, возвращается `None`.
pub fn parse_note(bytes: &[u8]) -> Option<NoteMap> {
    let text = decode_text(bytes);
    let mut map = NoteMap::new();

    for line in text.split(['\r', '\n']) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.trim().to_string());
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::classify;

    fn label_table(names: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        for name in names {
            let mut slot = [0u8; LABEL_SLOT_SIZE];
            slot[..name.len()].copy_from_slice(name.as_bytes());
            out.extend_from_slice(&slot);
        }
        out
    }

    #[test]
    fn test_parse_note() {
        let note = b"ScanSize: 5e-06\rHeightUnit:nm\r\nbroken line\r:nokey\rEmpty:\r";
        let map = parse_note(note).unwrap();
        assert_eq!(map["ScanSize"], "5e-06");
        assert_eq!(map["HeightUnit"], "nm");
        assert_eq!(map["Empty"], "");
        assert_eq!(map.len(), 3);

        assert!(parse_note(b"no pairs here").is_none());
    }

    #[test]
    fn test_note_with_latin1() {
        let map = parse_note(b"Temp:25 \xB0C").unwrap();
        assert_eq!(map["Temp"], "25 °C");
    }

    #[test]
    fn test_scan_sections_in_order() {
        let class = classify([4, 4, 2, 0]).unwrap();
        let mut bin = BinHeader {
            version: 5,
            formula_size: 3,
            note_size: 10,
            data_e_units_size: 2,
            ..BinHeader::default()
        };
        bin.dim_e_units_size = [1, 1, 0, 0];
        bin.dim_labels_size = [5, 0, (3 * LABEL_SLOT_SIZE) as u32, 0];

        let mut buf = vec![0xEE; 7]; // payload placeholder
        buf.extend_from_slice(b"f=x");
        buf.extend_from_slice(b"Scan:1\rA:b");
        buf.extend_from_slice(b"mV");
        buf.extend_from_slice(b"mm");
        buf.extend_from_slice(b"xlabl");
        buf.extend_from_slice(&label_table(&["", "Height", "Phase"]));
        buf.extend_from_slice(b"tail");

        let meta = scan(&buf, 7, Endian::Little, &bin, &class, true);
        assert!(meta.truncated.is_none());
        assert_eq!(meta.note.as_ref().unwrap()["A"], "b");
        assert_eq!(meta.labels[0], None);
        assert_eq!(meta.channel_label(0), Some("Height"));
        assert_eq!(meta.channel_label(1), Some("Phase"));
        assert_eq!(meta.tail_offset, Some(buf.len() - 4));

        // без разбора заметки
        let meta = scan(&buf, 7, Endian::Little, &bin, &class, false);
        assert!(meta.note.is_none());
        assert_eq!(meta.channel_label(1), Some("Phase"));
    }

    #[test]
    fn test_missing_label_slots() {
        let class = classify([4, 4, 3, 0]).unwrap();
        let mut bin = BinHeader::default();
        bin.dim_labels_size[2] = (2 * LABEL_SLOT_SIZE) as u32;

        let buf = label_table(&["", "Height"]);
        let meta = scan(&buf, 0, Endian::Big, &bin, &class, false);
        assert_eq!(meta.labels.len(), 4);
        assert_eq!(meta.channel_label(0), Some("Height"));
        assert_eq!(meta.channel_label(1), None);
        assert_eq!(meta.channel_label(2), None);
    }

    #[test]
    fn test_truncated_note_degrades() {
        let class = classify([4, 4, 1, 0]).unwrap();
        let bin = BinHeader {
            note_size: 1000,
            ..BinHeader::default()
        };

        let buf = b"Key:value".to_vec();
        let meta = scan(&buf, 0, Endian::Little, &bin, &class, true);
        assert!(meta.note.is_none());
        assert_eq!(meta.truncated, Some("note"));
        assert!(meta.tail_offset.is_none());
        assert_eq!(meta.channel_label(0), None);
    }
}
