use serde::Serialize;

use crate::{
    Channel, ControllerType, FileType, SampleRate, SignalGroup, SignalType, StimStepSize, Version,
};

/// Режим режекторного фильтра
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum NotchFilter {
    #[default]
    Disabled,
    Hz50,
    Hz60,
}

/// Настройки фильтров и частоты измерения импеданса
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSettings {
    pub dsp_enabled: bool,
    pub actual_dsp_cutoff_freq: f32,
    pub actual_lower_bandwidth: f32,
    /// Только RHS, иначе 0.0
    pub actual_lower_settle_bandwidth: f32,
    pub actual_upper_bandwidth: f32,
    pub desired_dsp_cutoff_freq: f32,
    pub desired_lower_bandwidth: f32,
    /// Только RHS, иначе 0.0
    pub desired_lower_settle_bandwidth: f32,
    pub desired_upper_bandwidth: f32,
    pub notch_filter: NotchFilter,
    pub actual_impedance_test_freq: f32,
    pub desired_impedance_test_freq: f32,
}

/// Параметры стимуляции (присутствуют только в RHS).
///
/// Для RHD все поля имеют значения по умолчанию: `false`, `None`, `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StimSettings {
    /// false = переключение нижней полосы; true = классический fast settle
    pub amp_settle_mode: bool,
    /// false = ограниченный по току контур; true = ключ восстановления заряда
    pub charge_recovery_mode: bool,
    pub step_size: Option<StimStepSize>,
    /// Ограничение тока восстановления заряда (А)
    pub charge_recovery_current_limit: f32,
    /// Целевое напряжение восстановления заряда (В)
    pub charge_recovery_target_voltage: f32,
}

/// Количество включённых каналов по типам сигнала
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelCounts {
    pub amplifier: usize,
    pub aux_input: usize,
    pub supply_voltage: usize,
    pub board_adc: usize,
    pub board_dac: usize,
    pub digital_in: usize,
    pub digital_out: usize,
}

/// Полностью декодированный заголовок RHD/RHS файла.
///
/// Создаётся за один проход декодера и после этого не изменяется.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub file_type: FileType,
    pub controller_type: ControllerType,
    pub version: Version,
    /// 60 для RHD версии 1.x, иначе 128
    pub samples_per_data_block: usize,
    pub sample_rate: SampleRate,
    pub filters: FilterSettings,
    pub stim_data_present: bool,
    pub stim: StimSettings,
    pub notes: [String; 3],
    /// Только RHS, иначе false
    pub dc_amplifier_data_saved: bool,
    /// Только RHD версии > 1.09, иначе 0
    pub num_temp_sensors: i16,
    pub board_mode: i16,
    /// Пусто для RHD версии <= 1.99
    pub ref_channel_name: String,
    pub groups: Vec<SignalGroup>,
    pub counts: ChannelCounts,
    pub num_data_streams: usize,
    pub num_spi_ports: u32,
    pub expander_connected: bool,
    pub header_only: bool,
    pub header_size_in_bytes: u64,
    /// Данные после заголовка не поддерживаются, всегда 0
    pub data_size_in_bytes: u64,
}

impl NotchFilter {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(NotchFilter::Disabled),
            1 => Some(NotchFilter::Hz50),
            2 => Some(NotchFilter::Hz60),
            _ => None,
        }
    }

    pub fn enabled(&self) -> bool {
        *self != NotchFilter::Disabled
    }

    /// Частота фильтра в герцах (0 если выключен).
    pub fn frequency(&self) -> f32 {
        match self {
            NotchFilter::Disabled => 0.0,
            NotchFilter::Hz50 => 50.0,
            NotchFilter::Hz60 => 60.0,
        }
    }
}

impl ChannelCounts {
    pub fn increment(
        &mut self,
        signal_type: SignalType,
    ) {
        *self.slot(signal_type) += 1;
    }

    pub fn get(
        &self,
        signal_type: SignalType,
    ) -> usize {
        match signal_type {
            SignalType::Amplifier => self.amplifier,
            SignalType::AuxInput => self.aux_input,
            SignalType::SupplyVoltage => self.supply_voltage,
            SignalType::BoardAdc => self.board_adc,
            SignalType::BoardDac => self.board_dac,
            SignalType::DigitalIn => self.digital_in,
            SignalType::DigitalOut => self.digital_out,
        }
    }

    pub fn total(&self) -> usize {
        SignalType::ALL.iter().map(|t| self.get(*t)).sum()
    }

    fn slot(
        &mut self,
        signal_type: SignalType,
    ) -> &mut usize {
        match signal_type {
            SignalType::Amplifier => &mut self.amplifier,
            SignalType::AuxInput => &mut self.aux_input,
            SignalType::SupplyVoltage => &mut self.supply_voltage,
            SignalType::BoardAdc => &mut self.board_adc,
            SignalType::BoardDac => &mut self.board_dac,
            SignalType::DigitalIn => &mut self.digital_in,
            SignalType::DigitalOut => &mut self.digital_out,
        }
    }
}

impl HeaderInfo {
    pub fn version_number(&self) -> f64 {
        self.version.number()
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Общее количество каналов во всех группах (включённых и нет).
    pub fn num_channels(&self) -> usize {
        self.groups.iter().map(SignalGroup::num_channels).sum()
    }

    /// Сумма заявленных в группах количеств каналов усилителя.
    pub fn num_amplifier_channels(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.num_amplifier_channels.max(0) as usize)
            .sum()
    }

    /// Индекс группы по префиксу.
    pub fn group_index(
        &self,
        prefix: &str,
    ) -> Option<usize> {
        self.groups.iter().position(|g| g.prefix == prefix)
    }

    pub fn group(
        &self,
        prefix: &str,
    ) -> Option<&SignalGroup> {
        self.groups.iter().find(|g| g.prefix == prefix)
    }

    /// Все каналы в порядке файла.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.groups.iter().flat_map(|g| g.channels.iter())
    }

    pub fn channels_of_type(
        &self,
        signal_type: SignalType,
    ) -> impl Iterator<Item = &Channel> {
        self.channels()
            .filter(move |c| c.signal_type == signal_type)
    }

    pub fn find_channel(
        &self,
        native_name: &str,
    ) -> Option<&Channel> {
        self.channels().find(|c| c.native_name == native_name)
    }
}
