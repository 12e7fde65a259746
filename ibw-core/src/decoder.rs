//! Чтение файла целиком: заголовки, форма, необязательные секции, каналы.

use std::{fs, path::Path};

use ibw_types::{DataShape, DataType, Endian, IbwError, IbwResult, MAX_DIMS};
use log::{debug, info, warn};

use crate::{
    config::DecodeConfig,
    extract::Extractor,
    format::read_headers,
    shape::classify,
    sink::{DatasetSink, ImportedWave},
    trailing::{scan, validate_payload},
    variant::{channel_info, channel_metadata, detect_variant, read_footer, ProducerVariant},
};

/// Сводка по прочитанному файлу.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    pub version: u16,
    pub endian: Endian,
    pub variant: ProducerVariant,
    pub shape: DataShape,
    /// Размерности после возможной коррекции формы
    pub n_dim: [u32; MAX_DIMS],
    pub channels: usize,
    pub data_type: DataType,
    /// Имя волны из заголовка
    pub wave_name: String,
    /// Кривые были переклассифицированы в изображение
    pub corrected: bool,
    /// Форма из подвала Asylum Research, только для сведения
    pub shape_hint: Option<DataShape>,
    /// Первая необязательная секция, не поместившаяся в файл
    pub truncated_section: Option<&'static str>,
    /// Число пар в разобранной заметке
    pub note_entries: usize,
}

/// Читает файл с настройками по умолчанию.
pub fn decode(buf: &[u8]) -> IbwResult<ImportedWave> {
    decode_with(buf, &DecodeConfig::default())
}

/// Читает файл в [`ImportedWave`].
pub fn decode_with(
    buf: &[u8],
    config: &DecodeConfig,
) -> IbwResult<ImportedWave> {
    let mut wave = ImportedWave::new();
    let report = decode_into(buf, config, &mut wave)?;
    wave.report = Some(report);
    Ok(wave)
}

/// Читает файл с диска одним вызовом.
pub fn decode_file<P: AsRef<Path>>(
    path: P,
    config: &DecodeConfig,
) -> IbwResult<ImportedWave> {
    let path = path.as_ref();
    let buf = fs::read(path)?;
    debug!("read {} bytes from {}", buf.len(), path.display());
    decode_with(&buf, config)
}

/// Разбирает буфер и передаёт каналы в `sink`.
///
/// При любой структурной ошибке `sink` остаётся нетронутым.
pub fn decode_into<S: DatasetSink + ?Sized>(
    buf: &[u8],
    config: &DecodeConfig,
    sink: &mut S,
) -> IbwResult<DecodeReport> {
    let headers = read_headers(buf)?;
    let Some(wave) = headers.wave.as_ref() else {
        return Err(IbwError::UnsupportedVersion {
            found: headers.bin.version,
            detail: "only version 5 data can be decoded".to_string(),
        });
    };

    let class = classify(wave.n_dim)?;
    let origin = headers.headers_size();
    let payload = validate_payload(&headers.bin, wave, &class, headers.wave_header_size)?;

    let remaining = buf.len() - origin;
    if remaining < payload {
        return Err(IbwError::truncated("wave data", payload, remaining));
    }

    let variant = detect_variant(buf);
    let parse_note = config.parse_note_for(variant.is_asylum());
    if parse_note && !variant.is_asylum() {
        warn!("Trying to parse the note of a base producer file as an Asylum Research note.");
    }

    let meta = scan(
        buf,
        origin + payload,
        headers.endian,
        &headers.bin,
        &class,
        parse_note,
    );

    // Подвал читается только у файлов Asylum Research.
    let shape_hint = meta
        .tail_offset
        .filter(|_| variant.is_asylum())
        .and_then(|off| read_footer(&buf[off..]));
    if let Some(hint) = shape_hint {
        if hint != class.shape {
            debug!(
                "footer suggests {hint}, using {} from dimensions",
                class.shape
            );
        }
    }

    let infos: Vec<_> = (0..class.channels)
        .map(|i| match (&meta.note, meta.channel_label(i)) {
            (Some(note), Some(title)) => Some(channel_info(title, note)),
            _ => None,
        })
        .collect();

    // Все каналы извлекаются до первой передачи в sink.
    let extractor = Extractor {
        buf,
        origin,
        endian: headers.endian,
        wave,
        class: &class,
    };
    let mut datasets = Vec::with_capacity(class.channels);
    for (i, info) in infos.iter().enumerate() {
        // Единицы кривых всегда берутся из заголовка.
        let unit = match class.shape {
            DataShape::Curve => None,
            DataShape::Image | DataShape::Volume => {
                info.as_ref().and_then(|c| c.unit.as_deref())
            }
        };
        datasets.push(extractor.dataset(i, unit)?);
    }

    let names: Vec<&str> = infos.iter().flatten().map(|c| c.name.as_str()).collect();
    let records = match &meta.note {
        Some(note) if config.channel_metadata => {
            channel_metadata(note, &names, &config.ignore_prefixes)
        }
        _ => Vec::new(),
    };

    for (i, dataset) in datasets.into_iter().enumerate() {
        let id = sink.add_channel(meta.channel_label(i), dataset);
        for &(key, value) in &records {
            sink.add_metadata_record(id, key, value);
        }
    }

    let report = DecodeReport {
        version: headers.bin.version,
        endian: headers.endian,
        variant,
        shape: class.shape,
        n_dim: class.n_dim,
        channels: class.channels,
        data_type: wave.data_type,
        wave_name: wave.name.clone(),
        corrected: class.corrected,
        shape_hint,
        truncated_section: meta.truncated,
        note_entries: meta.note.as_ref().map_or(0, |n| n.len()),
    };

    info!(
        "Decoded {} {} × {} ({}, {}, {})",
        report.shape,
        report.channels,
        report.data_type,
        report.endian,
        report.variant.name(),
        report.wave_name
    );

    Ok(report)
}
