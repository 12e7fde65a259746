//! Пример: чтение IBW-файла
//!
//! Демонстрирует:
//! - самопроверку заголовка (версия, порядок байт, контрольная сумма)
//! - чтение всех каналов через decode_file
//! - метаданные Asylum Research, если они есть

use std::fs;

use ibw_core::{decode_file, probe, DecodeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = "ibw-core/test_output.ibw";

    // --- Самопроверка заголовка ---
    let head = fs::read(input_path)?;
    let p = match probe(&head) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("✗ Header validation failed: {e}");
            return Err(Box::new(e));
        }
    };
    println!("✓ Header validated");
    println!("  Version : {}", p.version);
    println!("  Endian  : {}", p.endian);

    // --- Все каналы ---
    let wave = decode_file(input_path, &DecodeConfig::default())?;
    if let Some(report) = &wave.report {
        println!("\n✓ Read complete");
        println!("  Shape    : {}", report.shape);
        println!("  Type     : {}", report.data_type);
        println!("  Producer : {}", report.variant.name());
        if let Some(section) = report.truncated_section {
            println!("  Truncated: {section}");
        }
    }

    for (i, channel) in wave.channels.iter().enumerate() {
        let data = channel.dataset.data();
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  [{i}] {:<16} {} [{}] {min:.3e} .. {max:.3e}",
            channel.title.as_deref().unwrap_or("-"),
            channel.dataset.shape(),
            channel.dataset.value_unit()
        );
        for (key, value) in &channel.metadata {
            println!("      {key} = {value}");
        }
    }

    Ok(())
}
