//! Текстовая сводка заголовка для диагностики и логов.

use std::fmt::{self, Display, Formatter};

use rhx_types::{FileType, HeaderInfo, SignalType};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Обёртка для вывода всех полей [`HeaderInfo`] через `Display`.
pub struct HeaderSummary<'a>(pub &'a HeaderInfo);

/// Человекочитаемый дамп всех полей заголовка.
pub fn format_summary(info: &HeaderInfo) -> String {
    HeaderSummary(info).to_string()
}

impl Display for HeaderSummary<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let h = self.0;
        let filters = &h.filters;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  File type         : {}", h.file_type)?;
        writeln!(f, "  Controller        : {}", h.controller_type)?;
        writeln!(f, "  Version           : {}", h.version)?;
        writeln!(f, "  Samples per block : {}", h.samples_per_data_block)?;
        writeln!(f, "  Sample rate       : {}", h.sample_rate)?;
        writeln!(f, "  DSP enabled       : {}", filters.dsp_enabled)?;
        writeln!(
            f,
            "  DSP cutoff        : {:.2} Hz (desired {:.2} Hz)",
            filters.actual_dsp_cutoff_freq, filters.desired_dsp_cutoff_freq
        )?;
        writeln!(
            f,
            "  Lower bandwidth   : {:.2} Hz (desired {:.2} Hz)",
            filters.actual_lower_bandwidth, filters.desired_lower_bandwidth
        )?;
        if h.file_type == FileType::Rhs {
            writeln!(
                f,
                "  Lower settle bw   : {:.2} Hz (desired {:.2} Hz)",
                filters.actual_lower_settle_bandwidth, filters.desired_lower_settle_bandwidth
            )?;
        }
        writeln!(
            f,
            "  Upper bandwidth   : {:.2} Hz (desired {:.2} Hz)",
            filters.actual_upper_bandwidth, filters.desired_upper_bandwidth
        )?;
        if filters.notch_filter.enabled() {
            writeln!(
                f,
                "  Notch filter      : {} Hz",
                filters.notch_filter.frequency()
            )?;
        } else {
            writeln!(f, "  Notch filter      : disabled")?;
        }
        writeln!(
            f,
            "  Impedance test    : {:.2} Hz (desired {:.2} Hz)",
            filters.actual_impedance_test_freq, filters.desired_impedance_test_freq
        )?;

        writeln!(f, "  Stim data present : {}", h.stim_data_present)?;
        if h.stim_data_present {
            let step = h.stim.step_size.map_or("unknown", |s| s.label());
            writeln!(f, "  Stim step size    : {step}")?;
            writeln!(f, "  Amp settle mode   : {}", h.stim.amp_settle_mode)?;
            writeln!(f, "  Charge recovery   : {}", h.stim.charge_recovery_mode)?;
            writeln!(
                f,
                "  Recovery limit    : {} A",
                h.stim.charge_recovery_current_limit
            )?;
            writeln!(
                f,
                "  Recovery target   : {} V",
                h.stim.charge_recovery_target_voltage
            )?;
        }

        for (i, note) in h.notes.iter().enumerate() {
            writeln!(f, "  Note {}            : {note}", i + 1)?;
        }
        writeln!(f, "  DC amp data saved : {}", h.dc_amplifier_data_saved)?;
        writeln!(f, "  Temp sensors      : {}", h.num_temp_sensors)?;
        writeln!(f, "  Board mode        : {}", h.board_mode)?;
        writeln!(f, "  Reference channel : {}", h.ref_channel_name)?;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  Data streams      : {}", h.num_data_streams)?;
        for signal_type in SignalType::ALL {
            writeln!(
                f,
                "  {:<17} : {}",
                signal_type.description(),
                h.counts.get(signal_type)
            )?;
        }
        writeln!(f, "  SPI ports         : {}", h.num_spi_ports)?;
        writeln!(f, "  Expander          : {}", h.expander_connected)?;
        writeln!(f, "  Header only       : {}", h.header_only)?;
        writeln!(f, "  Header size       : {} bytes", h.header_size_in_bytes)?;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  Signal groups     : {}", h.num_groups())?;
        for group in &h.groups {
            writeln!(
                f,
                "  [{}] {} ({}) : {} channels, {} enabled{}",
                group.prefix,
                group.name,
                if group.enabled { "on" } else { "off" },
                group.num_channels(),
                group.enabled_channels().count(),
                if group.num_amplifier_channels > 0 {
                    format!(", {} amplifier", group.num_amplifier_channels)
                } else {
                    String::new()
                }
            )?;
        }
        write!(f, "{RULE}")
    }
}
