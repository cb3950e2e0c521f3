use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use clap::Parser;
use log::{error, info, warn, LevelFilter};
use rhx_inspect::{inspect_file, render, InspectConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "rhx-inspect",
    version = env!("CARGO_PKG_VERSION"),
    about = "Decode and print RHD/RHS recording headers",
    long_about = None,
)]
struct Cli {
    /// Файлы заголовков (.rhd, .rhs)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Формат вывода: text, json
    #[arg(long, default_value = "text")]
    format: String,
    /// Выводить список каналов каждой группы
    #[arg(short, long)]
    channels: bool,
    /// Ограничение времени на декодирование одного файла (мс)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let format: OutputFormat = match cli.format.parse() {
        Ok(f) => f,
        Err(e) => {
            error!("--format: {e}");
            std::process::exit(1);
        }
    };

    let config = InspectConfig {
        files: cli.files.clone(),
        format,
        list_channels: cli.channels,
        timeout: cli.timeout_ms.map(Duration::from_millis),
    };

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_ctrlc = cancel_flag.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        if cancel_ctrlc.swap(true, Ordering::SeqCst) {
            warn!("Force exit");
            std::process::exit(130);
        }
        warn!("Ctrl+C received, cancelling...");
    }) {
        warn!("Failed to set Ctrl+C handler: {e}");
    }

    let mut failed = 0usize;

    for path in &config.files {
        if cancel_flag.load(Ordering::Relaxed) {
            break;
        }

        info!("Decoding {}", path.display());

        let report = inspect_file(path, config.decode_options(cancel_flag.clone()))
            .and_then(|header| render(&header, &config));

        match report {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{failed} of {} files failed to decode", config.files.len());
        std::process::exit(1);
    }

    if cancel_flag.load(Ordering::Relaxed) {
        std::process::exit(130);
    }

    info!("✓ {} headers decoded", config.files.len());
}
