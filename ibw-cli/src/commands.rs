use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

use ibw_core::{
    decode_into, decode_with, detect, export_to_path, DecodeConfig, Endian, ExportChannel,
    ExportConfig, ImportedWave, HEADERS_SIZE5,
};
use log::{debug, info, warn};

use crate::{CliError, CliResult, FileSummary};

/// Читает файл и возвращает его сводку.
pub fn run_info(
    path: &Path,
    config: &DecodeConfig,
) -> CliResult<FileSummary> {
    let buf = fs::read(path)?;
    let mut wave = ImportedWave::new();
    let report = decode_into(&buf, config, &mut wave)?;
    Ok(FileSummary::new(&report, &wave))
}

/// Оценка того, что файл является IGOR binary wave.
pub fn run_detect(path: &Path) -> CliResult<u8> {
    let mut head = Vec::with_capacity(HEADERS_SIZE5);
    File::open(path)?
        .take(HEADERS_SIZE5 as u64)
        .read_to_end(&mut head)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("read {} head bytes of {name}", head.len());

    Ok(detect(&name, Some(&head)))
}

/// Перезаписывает изображения входного файла в новый файл версии 5.
///
/// Недописанный выходной файл удаляется. Возвращает число записанных каналов.
pub fn run_export(
    input: &Path,
    output: &Path,
    endian: Endian,
) -> CliResult<usize> {
    let buf = fs::read(input)?;
    let wave = decode_with(&buf, &DecodeConfig::default())?;

    let channels: Vec<ExportChannel<'_>> = wave
        .channels
        .iter()
        .filter_map(|c| {
            c.dataset.as_image().map(|image| ExportChannel {
                title: c.title.as_deref().unwrap_or(""),
                image,
            })
        })
        .collect();

    if channels.is_empty() {
        return Err(CliError::NoImages(input.to_path_buf()));
    }
    if channels.len() < wave.len() {
        warn!(
            "Skipping {} channel(s) that are not images",
            wave.len() - channels.len()
        );
    }

    let config = ExportConfig::new(endian);
    if let Err(e) = export_to_path(output, &channels, &config) {
        if output.exists() {
            match fs::remove_file(output) {
                Ok(()) => info!("Removed partial output {output:?}"),
                Err(rm) => warn!("Failed to remove partial output {output:?}: {rm}"),
            }
        }
        return Err(e.into());
    }

    Ok(channels.len())
}
