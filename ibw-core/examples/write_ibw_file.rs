//! Пример: запись синтетического рельефа в IBW-файл
//!
//! Демонстрирует:
//! - построение изображения с осями в базовых единицах СИ
//! - запись двух каналов одной геометрии через export_to_path

use ibw_core::{export_to_path, Axis, Endian, ExportChannel, ExportConfig, Image};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = "ibw-core/test_output.ibw";
    let (xres, yres) = (256, 128);

    // --- Рельеф: наклонная плоскость с синусоидальной рябью ---
    let height: Vec<f64> = (0..xres * yres)
        .map(|k| {
            let (col, row) = ((k % xres) as f64, (k / xres) as f64);
            1e-9 * (0.05 * col + 3.0 * (col / 8.0).sin() * (row / 16.0).cos())
        })
        .collect();
    let phase: Vec<f64> = height.iter().map(|h| 45.0 + h * 1e9).collect();

    let x = Axis::new(xres, 10e-6, "m");
    let y = Axis::new(yres, 5e-6, "m");
    let height = Image {
        x: x.clone(),
        y: y.clone(),
        z_unit: "m".to_string(),
        data: height,
        imaginary: None,
    };
    let phase = Image {
        x,
        y,
        z_unit: "deg".to_string(),
        data: phase,
        imaginary: None,
    };

    let config = ExportConfig::new(Endian::Little);
    export_to_path(
        output_path,
        &[
            ExportChannel {
                title: "HeightTrace",
                image: &height,
            },
            ExportChannel {
                title: "PhaseTrace",
                image: &phase,
            },
        ],
        &config,
    )?;

    println!("✓ Записано: {output_path}");
    println!("  Size     : {xres}×{yres}");
    println!("  Channels : 2");

    Ok(())
}
