//! Файлы Asylum Research (MFP-3D, Cypher).
//!
//! Эти программы используют обычный контейнер IGOR, но дописывают в конец
//! файла палитру, подвал из пар `Ключ:Значение;` и сигнатуру программы, а в
//! заметку — параметры съёмки, включая единицы каналов.

use ibw_types::DataShape;
use log::debug;

use crate::{
    binary::decode_text,
    trailing::{NoteMap, ASYLUM_PALETTE_SIZE},
};

/// Длина сигнатуры в конце файла
pub const SIGNATURE_LEN: usize = 5;

/// Программа, записавшая файл.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProducerVariant {
    /// Обычный IGOR или неизвестная программа
    #[default]
    Base,
    /// Asylum Research MFP-3D, изображения
    AsylumMfp3d,
    /// Asylum Research, силовые кривые
    AsylumForce,
}

/// Имя канала и единица, выведенные из метки и заметки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Метка без суффиксов Trace/Retrace и Mod<n>
    pub name: String,
    /// Физическая единица, `None` для безразмерных величин
    pub unit: Option<String>,
}

impl ProducerVariant {
    pub fn is_asylum(&self) -> bool {
        *self != ProducerVariant::Base
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProducerVariant::Base => "base",
            ProducerVariant::AsylumMfp3d => "Asylum Research MFP3D",
            ProducerVariant::AsylumForce => "Asylum Research Force",
        }
    }
}

/// Определяет программу по последним пяти байтам файла.
///
/// Некоторые файлы Asylum Research сигнатуры не имеют и остаются `Base`.
pub fn detect_variant(buf: &[u8]) -> ProducerVariant {
    if buf.len() < SIGNATURE_LEN {
        return ProducerVariant::Base;
    }

    let tail = &buf[buf.len() - SIGNATURE_LEN..];
    debug!("variant signature: <{}>", String::from_utf8_lossy(tail));
    match tail {
        b"MFP3D" => ProducerVariant::AsylumMfp3d,
        b"Force" => ProducerVariant::AsylumForce,
        _ => ProducerVariant::Base,
    }
}

/// Подсказка формы из подвала: `IsImage:1` или `IsForce:1`.
///
/// Подсказка только информационная, форма всегда берётся из размерностей.
pub fn read_footer(tail: &[u8]) -> Option<DataShape> {
    if tail.len() <= ASYLUM_PALETTE_SIZE {
        return None;
    }

    let footer = &tail[ASYLUM_PALETTE_SIZE..];
    let mut hint = None;

    // Учитываются только токены, завершённые ';'.
    let mut tokens = footer.split(|&b| b == b';');
    tokens.next_back();
    for token in tokens {
        let token = decode_text(token);
        let Some((key, value)) = token.split_once(':') else {
            continue;
        };
        match (key, value) {
            ("IsImage", "1") => {
                debug!("found IsImage:1");
                hint = Some(DataShape::Image);
            }
            ("IsForce", "1") => {
                debug!("found IsForce:1");
                hint = Some(DataShape::Curve);
            }
            _ => {}
        }
    }

    hint
}

/// Убирает числовой суффикс `Mod<n>`, затем `Trace` или `Retrace`.
pub fn canonicalize_title(title: &str) -> String {
    let mut name = title;

    if let Some(pos) = name.rfind("Mod") {
        if name[pos + 3..].bytes().all(|b| b.is_ascii_digit()) {
            name = &name[..pos];
        }
    }

    if let Some(stripped) = name.strip_suffix("Trace") {
        name = stripped;
    } else if let Some(stripped) = name.strip_suffix("Retrace") {
        name = stripped;
    }

    name.to_string()
}

/// Единица канала по префиксу имени; всё неизвестное — вольты.
pub fn channel_title_to_units(title: &str) -> Option<&'static str> {
    const UNIT_TABLE: &[(&str, Option<&str>)] = &[
        ("Height", Some("m")),
        ("ZSensor", Some("m")),
        ("Deflection", Some("m")),
        ("Amplitude", Some("m")),
        ("Phase", Some("deg")),
        ("Current", Some("A")),
        ("Frequency", Some("Hz")),
        ("Capacitance", Some("F")),
        ("Potential", Some("V")),
        ("Count", None),
        ("QFactor", None),
    ];

    // Пустое после DAC имя тоже даст вольты, что для DAC и нужно.
    let title = title
        .strip_prefix("DAC")
        .or_else(|| title.strip_prefix("Nap"))
        .unwrap_or(title);

    UNIT_TABLE
        .iter()
        .find(|(prefix, _)| title.starts_with(prefix))
        .map(|&(_, unit)| unit)
        .unwrap_or(Some("V"))
}

/// Имя и единица канала; единица из записи `<Имя>Unit` заметки важнее таблицы.
pub fn channel_info(
    title: &str,
    note: &NoteMap,
) -> ChannelInfo {
    let name = canonicalize_title(title);
    let unit = match note.get(&format!("{name}Unit")) {
        Some(unit) => Some(unit.clone()),
        None => channel_title_to_units(&name).map(str::to_string),
    };

    ChannelInfo { name, unit }
}

/// Записи заметки, которые относятся ко всем каналам.
///
/// Пропускаются пустые значения, ключи с префиксом имени какого-либо канала и
/// ключи с префиксами из `ignore_prefixes`.
pub fn channel_metadata<'a>(
    note: &'a NoteMap,
    channel_names: &[&str],
    ignore_prefixes: &[String],
) -> Vec<(&'a str, &'a str)> {
    note.iter()
        .filter(|(_, value)| !value.is_empty())
        .filter(|(key, _)| !channel_names.iter().any(|name| key.starts_with(name)))
        .filter(|(key, _)| {
            !ignore_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
        })
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_variant() {
        assert_eq!(detect_variant(b"....MFP3D"), ProducerVariant::AsylumMfp3d);
        assert_eq!(detect_variant(b"xxForce"), ProducerVariant::AsylumForce);
        assert_eq!(detect_variant(b"xxforce"), ProducerVariant::Base);
        assert_eq!(detect_variant(b"MFP"), ProducerVariant::Base);
    }

    #[test]
    fn test_canonicalize_title() {
        assert_eq!(canonicalize_title("HeightTrace"), "Height");
        assert_eq!(canonicalize_title("AmplitudeRetrace"), "Amplitude");
        assert_eq!(canonicalize_title("PhaseMod2"), "Phase");
        assert_eq!(canonicalize_title("AmplitudeMod1Retrace"), "AmplitudeMod1");
        assert_eq!(canonicalize_title("ZSensorTraceMod12"), "ZSensor");
        assert_eq!(canonicalize_title("ModeSwitch"), "ModeSwitch");
        assert_eq!(canonicalize_title("Deflection"), "Deflection");
    }

    #[test]
    fn test_units_table() {
        assert_eq!(channel_title_to_units("Height"), Some("m"));
        assert_eq!(channel_title_to_units("ZSensor"), Some("m"));
        assert_eq!(channel_title_to_units("Phase2"), Some("deg"));
        assert_eq!(channel_title_to_units("Current"), Some("A"));
        assert_eq!(channel_title_to_units("Frequency"), Some("Hz"));
        assert_eq!(channel_title_to_units("NapPhase"), Some("deg"));
        assert_eq!(channel_title_to_units("DAC"), Some("V"));
        assert_eq!(channel_title_to_units("UserIn0"), Some("V"));
        assert_eq!(channel_title_to_units("Count"), None);
        assert_eq!(channel_title_to_units("QFactor"), None);
    }

    #[test]
    fn test_channel_info_prefers_note() {
        let mut note = NoteMap::new();
        note.insert("HeightUnit".to_string(), "nm".to_string());

        let info = channel_info("HeightRetrace", &note);
        assert_eq!(info.name, "Height");
        assert_eq!(info.unit.as_deref(), Some("nm"));

        let info = channel_info("PhaseTrace", &note);
        assert_eq!(info.unit.as_deref(), Some("deg"));
    }

    #[test]
    fn test_footer_hints() {
        let mut tail = vec![0u8; ASYLUM_PALETTE_SIZE];
        tail.extend_from_slice(b"Foo:bar;IsImage:1;MFP3D");
        assert_eq!(read_footer(&tail), Some(DataShape::Image));

        let mut tail = vec![0u8; ASYLUM_PALETTE_SIZE];
        tail.extend_from_slice(b"IsForce:1;Force");
        assert_eq!(read_footer(&tail), Some(DataShape::Curve));

        // незавершённый токен не считается
        let mut tail = vec![0u8; ASYLUM_PALETTE_SIZE];
        tail.extend_from_slice(b"IsImage:1");
        assert_eq!(read_footer(&tail), None);

        assert_eq!(read_footer(&[0u8; 10]), None);
    }

    #[test]
    fn test_channel_metadata_filter() {
        let mut note = NoteMap::new();
        for (k, v) in [
            ("ScanSize", "5e-06"),
            ("HeightGain", "2"),
            ("DisplayRange", "1"),
            ("Empty", ""),
            ("ScanRate", "1.0"),
        ] {
            note.insert(k.to_string(), v.to_string());
        }

        let ignore = vec!["Display".to_string()];
        let meta = channel_metadata(&note, &["Height"], &ignore);
        assert_eq!(meta, vec![("ScanRate", "1.0"), ("ScanSize", "5e-06")]);
    }
}
