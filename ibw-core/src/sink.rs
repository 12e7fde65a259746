//! Получатель прочитанных наборов данных.
//!
//! Декодер ничего не знает о том, куда попадают каналы: он передаёт их
//! реализации [`DatasetSink`] только после того, как весь файл проверен и
//! все каналы извлечены.

use std::collections::BTreeMap;

use ibw_types::Dataset;

use crate::decoder::DecodeReport;

/// Приёмник каналов.
pub trait DatasetSink {
    /// Добавляет канал и возвращает его номер.
    fn add_channel(
        &mut self,
        title: Option<&str>,
        dataset: Dataset,
    ) -> usize;

    /// Прикрепляет к каналу запись метаданных.
    fn add_metadata_record(
        &mut self,
        channel: usize,
        key: &str,
        value: &str,
    );
}

/// Один прочитанный канал.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedChannel {
    /// Метка канала из таблицы меток
    pub title: Option<String>,
    pub dataset: Dataset,
    /// Записи заметки, относящиеся к каналу
    pub metadata: BTreeMap<String, String>,
}

/// Простой приёмник, собирающий каналы в память.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedWave {
    /// Сводка разбора, заполняется [`crate::decode_with`]
    pub report: Option<DecodeReport>,
    pub channels: Vec<ImportedChannel>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl ImportedWave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Первый канал с данной меткой.
    pub fn channel_by_title(
        &self,
        title: &str,
    ) -> Option<&ImportedChannel> {
        self.channels
            .iter()
            .find(|c| c.title.as_deref() == Some(title))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Реализация DatasetSink
////////////////////////////////////////////////////////////////////////////////

impl DatasetSink for ImportedWave {
    fn add_channel(
        &mut self,
        title: Option<&str>,
        dataset: Dataset,
    ) -> usize {
        self.channels.push(ImportedChannel {
            title: title.map(str::to_string),
            dataset,
            metadata: BTreeMap::new(),
        });
        self.channels.len() - 1
    }

    fn add_metadata_record(
        &mut self,
        channel: usize,
        key: &str,
        value: &str,
    ) {
        if let Some(c) = self.channels.get_mut(channel) {
            c.metadata.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use ibw_types::{Axis, Curve};

    use super::*;

    fn curve() -> Dataset {
        Dataset::Curve(Curve {
            x: Axis::new(3, 3.0, "s"),
            y_unit: "V".to_string(),
            data: vec![1.0, 2.0, 3.0],
            imaginary: None,
        })
    }

    #[test]
    fn test_collects_channels_and_metadata() {
        let mut wave = ImportedWave::new();
        assert!(wave.is_empty());

        let a = wave.add_channel(Some("Height"), curve());
        let b = wave.add_channel(None, curve());
        assert_eq!((a, b), (0, 1));

        wave.add_metadata_record(a, "ScanRate", "1.0");
        wave.add_metadata_record(7, "Lost", "x");

        assert_eq!(wave.len(), 2);
        assert_eq!(wave.channels[0].metadata["ScanRate"], "1.0");
        assert!(wave.channels[1].metadata.is_empty());
        assert!(wave.channel_by_title("Height").is_some());
        assert!(wave.channel_by_title("Phase").is_none());
    }
}
