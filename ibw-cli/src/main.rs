use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ibw_cli::{run_detect, run_export, run_info};
use ibw_core::{DecodeConfig, Endian};
use log::{error, info, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "ibw",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect and re-export IGOR binary wave (.ibw) files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Подробный вывод разбора заголовков и секций
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Сводка по файлу и его каналам
    Info {
        file: PathBuf,
        /// Вывести сводку в JSON
        #[arg(long)]
        json: bool,
        /// Разбирать заметку и без сигнатуры Asylum Research
        #[arg(long)]
        parse_base_notes: bool,
    },
    /// Оценка того, что файл является IGOR binary wave (0, 10 или 100)
    Detect { file: PathBuf },
    /// Перезаписать изображения в новый файл версии 5 (float32)
    Export {
        input: PathBuf,
        /// Путь к выходному файлу
        #[arg(short, long)]
        output: PathBuf,
        /// Записать в big-endian
        #[arg(long)]
        big_endian: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    match cli.command {
        Command::Info {
            file,
            json,
            parse_base_notes,
        } => {
            let config = DecodeConfig {
                parse_base_notes,
                ..DecodeConfig::default()
            };
            let summary = match run_info(&file, &config) {
                Ok(s) => s,
                Err(e) => {
                    error!("Failed to read {file:?}: {e}");
                    std::process::exit(1);
                }
            };

            if json {
                match summary.to_json() {
                    Ok(doc) => println!("{doc}"),
                    Err(e) => {
                        error!("{e}");
                        std::process::exit(1);
                    }
                }
            } else {
                info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
                info!("  File          : {file:?}");
                print!("{summary}");
                info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            }
        }
        Command::Detect { file } => match run_detect(&file) {
            Ok(score) => println!("{score}"),
            Err(e) => {
                error!("Failed to read {file:?}: {e}");
                std::process::exit(1);
            }
        },
        Command::Export {
            input,
            output,
            big_endian,
        } => {
            let endian = if big_endian { Endian::Big } else { Endian::Little };
            info!("  Input         : {input:?}");
            info!("  Output        : {output:?}");
            info!("  Byte order    : {endian}");

            match run_export(&input, &output, endian) {
                Ok(n) => info!("✓ Export complete: {n} channel(s) written to {output:?}"),
                Err(e) => {
                    error!("Export failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
