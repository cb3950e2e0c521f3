//! Декодер заголовка RHD/RHS.
//!
//! Один последовательный проход по потоку без возвратов: поля читаются в
//! порядке, заданном форматом, необязательные поля пропускаются по
//! [`FieldPresence`]. Сводные счётчики накапливаются по ходу чтения каналов.

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use log::{debug, trace};
use rhx_types::{
    Channel, ChannelCounts, DecodeError, DecodeResult, FileType, FilterSettings, HeaderInfo,
    NotchFilter, SampleRate, SignalGroup, SignalType, SpikeScope, StimSettings, StimStepSize,
    Version, BOARD_MODE_USB_INTERFACE,
};

use crate::{
    binary::BinaryReader,
    format::{
        self, FieldPresence, MAX_AMPLIFIER_CHANNELS_PER_GROUP, MAX_CHANNELS_PER_GROUP,
        MAX_SIGNAL_GROUPS,
    },
};

/// Параметры декодирования: внешний флаг отмены и/или крайний срок.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

/// Декодер заголовков.
#[derive(Debug, Clone, Default)]
pub struct HeaderDecoder {
    options: DecodeOptions,
}

/// Сводные счётчики, обновляемые по мере чтения каналов.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Aggregate {
    counts: ChannelCounts,
    num_data_streams: usize,
    more_than_four_ports: bool,
    expander_connected: bool,
}

/// Неизменяемый контекст, общий для всех групп одного заголовка.
struct GroupContext<'a> {
    file_type: FileType,
    presence: FieldPresence,
    options: &'a DecodeOptions,
}

////////////////////////////////////////////////////////////////////////////////
// DecodeOptions
////////////////////////////////////////////////////////////////////////////////

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Декодирование прерывается с [`DecodeError::Cancelled`], как только
    /// флаг будет установлен.
    pub fn with_cancel_flag(
        mut self,
        flag: Arc<AtomicBool>,
    ) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_deadline(
        mut self,
        deadline: Instant,
    ) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Крайний срок относительно текущего момента.
    pub fn with_timeout(
        self,
        timeout: Duration,
    ) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    fn check(&self) -> DecodeResult<()> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(DecodeError::Cancelled);
            }
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(DecodeError::DeadlineExceeded);
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// HeaderDecoder
////////////////////////////////////////////////////////////////////////////////

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Открывает файл и декодирует его заголовок. Файл закрывается при
    /// любом исходе.
    pub fn decode_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> DecodeResult<HeaderInfo> {
        let path = path.as_ref();
        debug!("Reading header from {}", path.display());

        let file = File::open(path)?;
        self.decode(BufReader::new(file))
    }

    /// Декодирует заголовок из потока.
    ///
    /// Поток принадлежит декодеру на время вызова и освобождается при
    /// возврате. Файл должен содержать только заголовок: если после него
    /// есть данные, возвращается [`DecodeError::UnsupportedDataSection`].
    pub fn decode<R: Read + Seek>(
        &self,
        mut stream: R,
    ) -> DecodeResult<HeaderInfo> {
        let start = stream.stream_position()?;
        let mut reader = BinaryReader::new(stream);

        // 1. Магическое число
        let magic = reader.read_u32("magic number")?;
        let file_type = FileType::from_magic(magic).ok_or(DecodeError::InvalidMagicNumber(magic))?;

        // 2. Версия
        let major = reader.read_i16("main version number")?;
        let minor = reader.read_i16("secondary version number")?;
        let version = Version::new(major, minor);
        let presence = FieldPresence::new(file_type, version);
        let samples_per_data_block = format::samples_per_data_block(file_type, version);

        debug!("{file_type} header, version {version}");

        // 3. Частота дискретизации
        let raw_rate = reader.read_f32("sample rate")?;
        let sample_rate = SampleRate::nearest(f64::from(raw_rate))
            .ok_or(DecodeError::InvalidSampleRate(raw_rate))?;

        // 4-6. Фильтры, режекторный фильтр, частоты измерения импеданса
        let filters = read_filter_settings(&mut reader, presence)?;

        // 7. Параметры стимуляции
        let stim = if presence.stim_block {
            read_stim_settings(&mut reader)?
        } else {
            StimSettings::default()
        };

        // 8. Заметки
        let notes = [
            reader.read_qstring("note1")?,
            reader.read_qstring("note2")?,
            reader.read_qstring("note3")?,
        ];

        // 9-11. Поля, зависящие от типа и версии
        let dc_amplifier_data_saved = if presence.dc_amplifier_flag {
            reader.read_bool("dc amplifier data saved")?
        } else {
            false
        };

        let num_temp_sensors = if presence.temp_sensors {
            reader.read_i16("number of temperature sensors")?
        } else {
            0
        };

        let board_mode = if presence.board_mode {
            reader.read_i16("board mode")?
        } else {
            BOARD_MODE_USB_INTERFACE
        };

        // 12. Тип контроллера
        let controller_type = format::controller_type(file_type, version, board_mode)?;

        // 13. Референсный канал
        let ref_channel_name = if presence.ref_channel_name {
            reader.read_qstring("ref channel name")?
        } else {
            String::new()
        };

        // 14. Группы сигналов и каналы
        let group_count = reader.read_i16("number of signal groups")?;
        if !(0..=MAX_SIGNAL_GROUPS).contains(&group_count) {
            return Err(DecodeError::InvalidGroupCount(group_count));
        }
        debug!("Found {group_count} signal groups");

        let ctx = GroupContext {
            file_type,
            presence,
            options: &self.options,
        };
        let mut aggregate = Aggregate::default();
        let mut groups = Vec::with_capacity(group_count as usize);

        for index in 0..group_count as usize {
            self.options.check()?;
            groups.push(decode_group(&mut reader, &ctx, index, &mut aggregate)?);
        }

        // 15. Количество SPI портов
        let num_spi_ports = format::spi_port_count(controller_type, aggregate.more_than_four_ports);

        // 16. Размер заголовка и проверка конца потока
        let header_size_in_bytes = reader.offset();
        let mut stream = reader.into_inner();
        let end = stream.seek(SeekFrom::End(0))?;
        let stream_len = end.saturating_sub(start);

        debug!("Header size {header_size_in_bytes} bytes, stream length {stream_len} bytes");

        if stream_len != header_size_in_bytes {
            return Err(DecodeError::UnsupportedDataSection {
                header_size: header_size_in_bytes,
                stream_len,
            });
        }

        Ok(HeaderInfo {
            file_type,
            controller_type,
            version,
            samples_per_data_block,
            sample_rate,
            filters,
            stim_data_present: presence.stim_block,
            stim,
            notes,
            dc_amplifier_data_saved,
            num_temp_sensors,
            board_mode,
            ref_channel_name,
            groups,
            counts: aggregate.counts,
            num_data_streams: aggregate.num_data_streams,
            num_spi_ports,
            expander_connected: aggregate.expander_connected,
            header_only: true,
            header_size_in_bytes,
            data_size_in_bytes: 0,
        })
    }
}

/// Декодирует заголовок из потока с параметрами по умолчанию.
pub fn decode_header<R: Read + Seek>(stream: R) -> DecodeResult<HeaderInfo> {
    HeaderDecoder::new().decode(stream)
}

/// Открывает файл и декодирует его заголовок.
pub fn read_header_file<P: AsRef<Path>>(path: P) -> DecodeResult<HeaderInfo> {
    HeaderDecoder::new().decode_file(path)
}

////////////////////////////////////////////////////////////////////////////////
// Шаги декодирования
////////////////////////////////////////////////////////////////////////////////

fn read_filter_settings<R: Read>(
    reader: &mut BinaryReader<R>,
    presence: FieldPresence,
) -> DecodeResult<FilterSettings> {
    let dsp_enabled = reader.read_bool("dsp enabled")?;

    let actual_dsp_cutoff_freq = reader.read_f32("actual dsp cutoff frequency")?;
    let actual_lower_bandwidth = reader.read_f32("actual lower bandwidth")?;
    let actual_lower_settle_bandwidth = if presence.lower_settle_bandwidth {
        reader.read_f32("actual lower settle bandwidth")?
    } else {
        0.0
    };
    let actual_upper_bandwidth = reader.read_f32("actual upper bandwidth")?;

    let desired_dsp_cutoff_freq = reader.read_f32("desired dsp cutoff frequency")?;
    let desired_lower_bandwidth = reader.read_f32("desired lower bandwidth")?;
    let desired_lower_settle_bandwidth = if presence.lower_settle_bandwidth {
        reader.read_f32("desired lower settle bandwidth")?
    } else {
        0.0
    };
    let desired_upper_bandwidth = reader.read_f32("desired upper bandwidth")?;

    let notch_mode = reader.read_i16("notch filter mode")?;
    let notch_filter =
        NotchFilter::from_code(notch_mode).ok_or(DecodeError::InvalidNotchMode(notch_mode))?;

    let actual_impedance_test_freq = reader.read_f32("actual impedance test frequency")?;
    let desired_impedance_test_freq = reader.read_f32("desired impedance test frequency")?;

    Ok(FilterSettings {
        dsp_enabled,
        actual_dsp_cutoff_freq,
        actual_lower_bandwidth,
        actual_lower_settle_bandwidth,
        actual_upper_bandwidth,
        desired_dsp_cutoff_freq,
        desired_lower_bandwidth,
        desired_lower_settle_bandwidth,
        desired_upper_bandwidth,
        notch_filter,
        actual_impedance_test_freq,
        desired_impedance_test_freq,
    })
}

fn read_stim_settings<R: Read>(reader: &mut BinaryReader<R>) -> DecodeResult<StimSettings> {
    let amp_settle_mode = reader.read_bool("amp settle mode")?;
    let charge_recovery_mode = reader.read_bool("charge recovery mode")?;

    // Шаг хранится в амперах как f32
    let raw_step = reader.read_f32("stim step size")?;
    let step_size = StimStepSize::nearest(f64::from(raw_step))
        .ok_or(DecodeError::InvalidStimStepSize(raw_step))?;

    let charge_recovery_current_limit = reader.read_f32("charge recovery current limit")?;
    let charge_recovery_target_voltage = reader.read_f32("charge recovery target voltage")?;

    Ok(StimSettings {
        amp_settle_mode,
        charge_recovery_mode,
        step_size: Some(step_size),
        charge_recovery_current_limit,
        charge_recovery_target_voltage,
    })
}

fn decode_group<R: Read>(
    reader: &mut BinaryReader<R>,
    ctx: &GroupContext<'_>,
    index: usize,
    aggregate: &mut Aggregate,
) -> DecodeResult<SignalGroup> {
    let name = reader.read_qstring("group name")?;
    let prefix = reader.read_qstring("group prefix")?;
    let enabled = reader.read_bool("signal group enabled")?;

    let channel_count = reader.read_i16("number of channels in signal group")?;
    if !(0..=MAX_CHANNELS_PER_GROUP).contains(&channel_count) {
        return Err(DecodeError::InvalidChannelCount {
            value: channel_count,
            group: index,
        });
    }

    let num_amplifier_channels = reader.read_i16("number of amplifier channels in signal group")?;
    if !(0..=MAX_AMPLIFIER_CHANNELS_PER_GROUP).contains(&num_amplifier_channels) {
        return Err(DecodeError::InvalidAmplifierChannelCount {
            value: num_amplifier_channels,
            group: index,
        });
    }

    debug!(
        "Signal group {index} '{name}' prefix '{prefix}' enabled={enabled} channels={channel_count}"
    );

    let mut group = SignalGroup {
        name,
        prefix,
        enabled,
        num_amplifier_channels,
        channels: Vec::with_capacity(channel_count as usize),
    };

    if group.is_expansion_port() {
        aggregate.more_than_four_ports = true;
    }

    for channel_index in 0..channel_count as usize {
        ctx.options.check()?;
        let channel = decode_channel(reader, ctx, index, channel_index)?;
        aggregate.record(&channel);
        group.channels.push(channel);
    }

    Ok(group)
}

fn decode_channel<R: Read>(
    reader: &mut BinaryReader<R>,
    ctx: &GroupContext<'_>,
    group: usize,
    channel: usize,
) -> DecodeResult<Channel> {
    let native_name = reader.read_qstring("native channel name")?;
    let custom_name = reader.read_qstring("custom channel name")?;
    let native_order = reader.read_i16("native order")?;
    let custom_order = reader.read_i16("custom order")?;

    let code = reader.read_i16("signal type")?;
    let signal_type = SignalType::from_code(ctx.file_type, code).ok_or(
        DecodeError::InvalidSignalType {
            value: code,
            group,
            channel,
        },
    )?;

    let enabled = reader.read_bool("channel enabled")?;
    let chip_channel = reader.read_i16("chip channel")?;
    let command_stream = if ctx.presence.command_stream {
        Some(reader.read_i16("command stream")?)
    } else {
        None
    };
    let board_stream = reader.read_i16("board stream")?;

    let spike_scope = SpikeScope {
        trigger_mode: reader.read_i16("spike scope trigger mode")?,
        voltage_threshold: reader.read_i16("spike scope voltage threshold")?,
        trigger_channel: reader.read_i16("spike scope trigger channel")?,
        trigger_polarity: reader.read_i16("spike scope trigger polarity")?,
    };

    let impedance_magnitude = reader.read_f32("impedance magnitude")?;
    let impedance_phase = reader.read_f32("impedance phase")?;

    trace!("Channel '{native_name}' ({signal_type}) enabled={enabled} stream={board_stream}");

    Ok(Channel {
        native_name,
        custom_name,
        native_order,
        custom_order,
        signal_type,
        enabled,
        chip_channel,
        command_stream: command_stream.unwrap_or(board_stream),
        board_stream,
        spike_scope,
        impedance_magnitude,
        impedance_phase,
    })
}

impl Aggregate {
    /// Учитывает очередной канал.
    ///
    /// Количество потоков считается по всем каналам, счётчики типов — только
    /// по включённым.
    fn record(
        &mut self,
        channel: &Channel,
    ) {
        if channel.enabled {
            self.counts.increment(channel.signal_type);
        }

        if channel.signal_type.is_board_io() && channel.native_order > 1 {
            self.expander_connected = true;
        }

        if channel.board_stream >= 0 {
            let streams = channel.board_stream as usize + 1;
            self.num_data_streams = self.num_data_streams.max(streams);
        }
    }
}
