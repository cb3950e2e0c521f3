//! Построитель синтетических заголовков для тестов.
//!
//! Раскладка полей повторена здесь независимо от декодера, чтобы тесты
//! проверяли формат, а не сами себя.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use rhx_core::{RHD_MAGIC, RHS_MAGIC};

/// Описание канала для построителя.
#[derive(Debug, Clone)]
pub struct ChannelFixture {
    pub native_name: String,
    pub custom_name: String,
    pub native_order: i16,
    pub custom_order: i16,
    pub signal_type: i16,
    pub enabled: bool,
    pub chip_channel: i16,
    pub command_stream: i16,
    pub board_stream: i16,
    pub spike_scope: [i16; 4],
    pub impedance_magnitude: f32,
    pub impedance_phase: f32,
}

/// Описание группы сигналов для построителя.
#[derive(Debug, Clone)]
pub struct GroupFixture {
    pub name: String,
    pub prefix: String,
    pub enabled: bool,
    pub amplifier_channels: i16,
    /// Записать это значение вместо `channels.len()`
    pub channel_count: Option<i16>,
    pub channels: Vec<ChannelFixture>,
}

/// Синтетический заголовок. `None` в строках пишется как длина
/// `0xFFFFFFFF`.
#[derive(Debug, Clone)]
pub struct HeaderFixture {
    pub magic: u32,
    pub major: i16,
    pub minor: i16,
    pub sample_rate: f32,
    pub dsp_enabled: bool,
    /// actual cutoff, lower, settle, upper, desired cutoff, lower, settle, upper
    pub filters: [f32; 8],
    pub notch_mode: i16,
    pub impedance_freqs: [f32; 2],
    pub amp_settle_mode: i16,
    pub charge_recovery_mode: i16,
    pub stim_step_size: f32,
    pub charge_recovery_current_limit: f32,
    pub charge_recovery_target_voltage: f32,
    pub notes: [Option<String>; 3],
    pub dc_amplifier_data_saved: bool,
    pub num_temp_sensors: i16,
    pub board_mode: i16,
    pub ref_channel_name: Option<String>,
    /// Записать это значение вместо `groups.len()`
    pub group_count: Option<i16>,
    pub groups: Vec<GroupFixture>,
    /// Байты после заголовка (имитация блоков данных)
    pub trailing: Vec<u8>,
}

impl ChannelFixture {
    pub fn new(
        native_name: &str,
        signal_type: i16,
    ) -> Self {
        Self {
            native_name: native_name.to_string(),
            custom_name: native_name.to_string(),
            native_order: 0,
            custom_order: 0,
            signal_type,
            enabled: true,
            chip_channel: 0,
            command_stream: 0,
            board_stream: 0,
            spike_scope: [0, 70, 0, 0],
            impedance_magnitude: 0.0,
            impedance_phase: 0.0,
        }
    }

    pub fn order(
        mut self,
        native_order: i16,
    ) -> Self {
        self.native_order = native_order;
        self.custom_order = native_order;
        self
    }

    pub fn stream(
        mut self,
        board_stream: i16,
    ) -> Self {
        self.board_stream = board_stream;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl GroupFixture {
    pub fn new(
        name: &str,
        prefix: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            enabled: true,
            amplifier_channels: 0,
            channel_count: None,
            channels: Vec::new(),
        }
    }

    pub fn with_channel(
        mut self,
        channel: ChannelFixture,
    ) -> Self {
        if channel.signal_type == 0 {
            self.amplifier_channels += 1;
        }
        self.channels.push(channel);
        self
    }
}

impl HeaderFixture {
    /// Заголовок RHD заданной версии без групп.
    pub fn rhd(
        major: i16,
        minor: i16,
    ) -> Self {
        Self::base(RHD_MAGIC, major, minor)
    }

    /// Заголовок RHS заданной версии без групп.
    pub fn rhs(
        major: i16,
        minor: i16,
    ) -> Self {
        Self::base(RHS_MAGIC, major, minor)
    }

    fn base(
        magic: u32,
        major: i16,
        minor: i16,
    ) -> Self {
        Self {
            magic,
            major,
            minor,
            sample_rate: 20_000.0,
            dsp_enabled: true,
            filters: [1.0, 0.1, 1000.0, 7500.0, 1.0, 0.1, 1000.0, 7500.0],
            notch_mode: 0,
            impedance_freqs: [1000.0, 1000.0],
            amp_settle_mode: 0,
            charge_recovery_mode: 0,
            stim_step_size: 1e-6,
            charge_recovery_current_limit: 1e-6,
            charge_recovery_target_voltage: 0.0,
            notes: [None, None, None],
            dc_amplifier_data_saved: false,
            num_temp_sensors: 0,
            board_mode: 0,
            ref_channel_name: None,
            group_count: None,
            groups: Vec::new(),
            trailing: Vec::new(),
        }
    }

    pub fn with_group(
        mut self,
        group: GroupFixture,
    ) -> Self {
        self.groups.push(group);
        self
    }

    fn is_rhs(&self) -> bool {
        self.magic == RHS_MAGIC
    }

    fn version(&self) -> f64 {
        f64::from(self.major) + f64::from(self.minor) / 10.0
    }

    /// Собирает байты заголовка (и `trailing` после него).
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let rhs = self.is_rhs();
        let rhd = !rhs;
        let version = self.version();

        buf.write_u32::<LittleEndian>(self.magic).unwrap();
        if self.magic != RHD_MAGIC && self.magic != RHS_MAGIC {
            return buf;
        }

        put_i16(&mut buf, self.major);
        put_i16(&mut buf, self.minor);
        put_f32(&mut buf, self.sample_rate);
        put_i16(&mut buf, self.dsp_enabled as i16);

        let [ac, al, als, au, dc, dl, dls, du] = self.filters;
        put_f32(&mut buf, ac);
        put_f32(&mut buf, al);
        if rhs {
            put_f32(&mut buf, als);
        }
        put_f32(&mut buf, au);
        put_f32(&mut buf, dc);
        put_f32(&mut buf, dl);
        if rhs {
            put_f32(&mut buf, dls);
        }
        put_f32(&mut buf, du);

        put_i16(&mut buf, self.notch_mode);
        put_f32(&mut buf, self.impedance_freqs[0]);
        put_f32(&mut buf, self.impedance_freqs[1]);

        if rhs {
            put_i16(&mut buf, self.amp_settle_mode);
            put_i16(&mut buf, self.charge_recovery_mode);
            put_f32(&mut buf, self.stim_step_size);
            put_f32(&mut buf, self.charge_recovery_current_limit);
            put_f32(&mut buf, self.charge_recovery_target_voltage);
        }

        for note in &self.notes {
            put_string(&mut buf, note.as_deref());
        }

        if rhs {
            put_i16(&mut buf, self.dc_amplifier_data_saved as i16);
        }
        if rhd && version > 1.09 {
            put_i16(&mut buf, self.num_temp_sensors);
        }
        if rhs || (rhd && version > 1.29) {
            put_i16(&mut buf, self.board_mode);
        }
        if rhs || (rhd && version > 1.99) {
            put_string(&mut buf, self.ref_channel_name.as_deref());
        }

        let group_count = self.group_count.unwrap_or(self.groups.len() as i16);
        put_i16(&mut buf, group_count);

        for group in &self.groups {
            put_string(&mut buf, Some(group.name.as_str()));
            put_string(&mut buf, Some(group.prefix.as_str()));
            put_i16(&mut buf, group.enabled as i16);
            put_i16(
                &mut buf,
                group.channel_count.unwrap_or(group.channels.len() as i16),
            );
            put_i16(&mut buf, group.amplifier_channels);

            for ch in &group.channels {
                put_string(&mut buf, Some(ch.native_name.as_str()));
                put_string(&mut buf, Some(ch.custom_name.as_str()));
                put_i16(&mut buf, ch.native_order);
                put_i16(&mut buf, ch.custom_order);
                put_i16(&mut buf, ch.signal_type);
                put_i16(&mut buf, ch.enabled as i16);
                put_i16(&mut buf, ch.chip_channel);
                if rhs {
                    put_i16(&mut buf, ch.command_stream);
                }
                put_i16(&mut buf, ch.board_stream);
                for v in ch.spike_scope {
                    put_i16(&mut buf, v);
                }
                put_f32(&mut buf, ch.impedance_magnitude);
                put_f32(&mut buf, ch.impedance_phase);
            }
        }

        buf.extend_from_slice(&self.trailing);
        buf
    }
}

fn put_i16(
    buf: &mut Vec<u8>,
    v: i16,
) {
    buf.write_i16::<LittleEndian>(v).unwrap();
}

fn put_f32(
    buf: &mut Vec<u8>,
    v: f32,
) {
    buf.write_f32::<LittleEndian>(v).unwrap();
}

fn put_string(
    buf: &mut Vec<u8>,
    s: Option<&str>,
) {
    match s {
        None => buf.write_u32::<LittleEndian>(0xFFFF_FFFF).unwrap(),
        Some(s) => {
            let units: Vec<u16> = s.encode_utf16().collect();
            buf.write_u32::<LittleEndian>(units.len() as u32 * 2)
                .unwrap();
            for unit in units {
                buf.write_u16::<LittleEndian>(unit).unwrap();
            }
        }
    }
}
