//! Декодирование файлов и построение отчёта.

use std::{fmt::Write as _, path::Path};

use log::debug;
use rhx_core::{format_summary, DecodeOptions, HeaderDecoder, HeaderInfo};

use crate::{InspectConfig, InspectError, InspectResult, OutputFormat};

/// Декодирует заголовок файла с заданными параметрами.
pub fn inspect_file(
    path: &Path,
    options: DecodeOptions,
) -> InspectResult<HeaderInfo> {
    let info = HeaderDecoder::with_options(options)
        .decode_file(path)
        .map_err(|e| InspectError::from(e).in_file(path))?;

    debug!(
        "{}: {} groups, {} channels",
        path.display(),
        info.num_groups(),
        info.num_channels()
    );

    Ok(info)
}

/// Строит отчёт в формате из конфигурации.
pub fn render(
    info: &HeaderInfo,
    config: &InspectConfig,
) -> InspectResult<String> {
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Text => {
            let mut out = format_summary(info);
            if config.list_channels {
                out.push('\n');
                out.push_str(&channel_table(info));
            }
            Ok(out)
        }
    }
}

/// Таблица каналов по группам.
pub fn channel_table(info: &HeaderInfo) -> String {
    let mut out = String::new();

    for group in &info.groups {
        let _ = writeln!(out, "  [{}] {}", group.prefix, group.name);
        for ch in &group.channels {
            let _ = writeln!(
                out,
                "    {:<14} {:<14} {:<16} {:<3} stream {:>2}  chip {:>3}  |Z| {:.2e} Ohm  {:.1}°",
                ch.native_name,
                ch.custom_name,
                ch.signal_type.description(),
                if ch.enabled { "on" } else { "off" },
                ch.board_stream,
                ch.chip_channel,
                ch.impedance_magnitude,
                ch.impedance_phase
            );
        }
    }

    out
}
