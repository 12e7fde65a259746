//! Библиотека чтения и записи IGOR binary wave (.ibw)
//!
//! Разбирает заголовки всех версий формата (1, 2, 3, 5), определяет порядок
//! байт по контрольной сумме и извлекает данные версии 5 в виде кривых,
//! изображений и объёмов. Поддерживаются дополнения Asylum Research: метки,
//! единицы каналов и параметры из заметки. Обратный путь записывает
//! изображения одинаковой геометрии в файл версии 5.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use ibw_core::{decode_file, export_to_path, DecodeConfig, ExportChannel, ExportConfig};
//!
//! let wave = decode_file("scan.ibw", &DecodeConfig::default())?;
//! for channel in &wave.channels {
//!     println!("{:?}: {}", channel.title, channel.dataset.shape());
//! }
//!
//! let images: Vec<_> = wave
//!     .channels
//!     .iter()
//!     .filter_map(|c| {
//!         c.dataset.as_image().map(|image| ExportChannel {
//!             title: c.title.as_deref().unwrap_or(""),
//!             image,
//!         })
//!     })
//!     .collect();
//! export_to_path("copy.ibw", &images, &ExportConfig::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod config;
pub mod decoder;
pub mod extract;
pub mod format;
pub mod shape;
pub mod sink;
pub mod trailing;
pub mod units;
pub mod variant;
pub mod wave;
pub mod writer;

pub use binary::*;
pub use config::*;
pub use decoder::*;
pub use extract::*;
pub use format::*;
pub use ibw_types::{
    Axis, BinHeader, Components, Curve, DataShape, DataType, Dataset, Endian, Headers, IbwError,
    IbwErrorKind, IbwResult, Image, NumberKind, Volume, WaveHeader5, MAX_DIMS, MAX_UNIT_CHARS,
    MAX_WAVE_NAME5,
};
pub use shape::*;
pub use sink::*;
pub use trailing::*;
pub use units::*;
pub use variant::*;
pub use wave::*;
pub use writer::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
