//! Сводка по прочитанному файлу для вывода в консоль или JSON.

use std::{collections::BTreeMap, fmt};

use ibw_core::{DecodeReport, ImportedWave};
use serde::Serialize;

/// Описание одной оси.
#[derive(Debug, Clone, Serialize)]
pub struct AxisSummary {
    pub res: usize,
    pub real: f64,
    pub offset: f64,
    pub unit: String,
}

/// Описание одного канала.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub title: Option<String>,
    pub shape: String,
    pub value_unit: String,
    pub axes: Vec<AxisSummary>,
    pub complex: bool,
    pub min: f64,
    pub max: f64,
    pub metadata: BTreeMap<String, String>,
}

/// Описание файла целиком.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub version: u16,
    pub endian: String,
    pub producer: String,
    pub shape: String,
    pub n_dim: Vec<u32>,
    pub data_type: String,
    pub wave_name: String,
    pub corrected: bool,
    pub shape_hint: Option<String>,
    pub truncated_section: Option<String>,
    pub note_entries: usize,
    pub channels: Vec<ChannelSummary>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl FileSummary {
    pub fn new(
        report: &DecodeReport,
        wave: &ImportedWave,
    ) -> Self {
        let channels = wave
            .channels
            .iter()
            .map(|c| {
                let data = c.dataset.data();
                ChannelSummary {
                    title: c.title.clone(),
                    shape: c.dataset.shape().to_string(),
                    value_unit: c.dataset.value_unit().to_string(),
                    axes: c
                        .dataset
                        .axes()
                        .into_iter()
                        .map(|a| AxisSummary {
                            res: a.res,
                            real: a.real,
                            offset: a.offset,
                            unit: a.unit.clone(),
                        })
                        .collect(),
                    complex: c.dataset.imaginary().is_some(),
                    min: data.iter().copied().fold(f64::INFINITY, f64::min),
                    max: data.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    metadata: c.metadata.clone(),
                }
            })
            .collect();

        Self {
            version: report.version,
            endian: report.endian.to_string(),
            producer: report.variant.name().to_string(),
            shape: report.shape.to_string(),
            n_dim: report.n_dim.to_vec(),
            data_type: report.data_type.to_string(),
            wave_name: report.wave_name.clone(),
            corrected: report.corrected,
            shape_hint: report.shape_hint.map(|s| s.to_string()),
            truncated_section: report.truncated_section.map(str::to_string),
            note_entries: report.note_entries,
            channels,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для FileSummary
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for FileSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "  Version       : {}", self.version)?;
        writeln!(f, "  Byte order    : {}", self.endian)?;
        writeln!(f, "  Producer      : {}", self.producer)?;
        writeln!(f, "  Wave name     : {}", self.wave_name)?;
        writeln!(f, "  Data type     : {}", self.data_type)?;
        writeln!(f, "  Dimensions    : {:?}", self.n_dim)?;
        write!(f, "  Shape         : {}", self.shape)?;
        if self.corrected {
            write!(f, " (corrected from curves)")?;
        }
        writeln!(f)?;
        if let Some(hint) = &self.shape_hint {
            writeln!(f, "  Footer hint   : {hint}")?;
        }
        if let Some(section) = &self.truncated_section {
            writeln!(f, "  Truncated     : {section}")?;
        }
        writeln!(f, "  Note entries  : {}", self.note_entries)?;

        for (i, c) in self.channels.iter().enumerate() {
            let axes: Vec<String> = c
                .axes
                .iter()
                .map(|a| format!("{}×{:.4e} {}", a.res, a.real, a.unit))
                .collect();
            writeln!(
                f,
                "  [{i}] {:<20} {} [{}] {} {:.4e} .. {:.4e}{}",
                c.title.as_deref().unwrap_or("-"),
                c.shape,
                c.value_unit,
                axes.join(", "),
                c.min,
                c.max,
                if c.complex { " complex" } else { "" }
            )?;
        }

        Ok(())
    }
}
