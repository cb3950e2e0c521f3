use serde::Serialize;

use crate::FileType;

/// Тип сигнала канала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignalType {
    /// Канал усилителя
    Amplifier,
    /// Вспомогательный вход чипа
    AuxInput,
    /// Напряжение питания чипа
    SupplyVoltage,
    /// Аналоговый вход платы (ADC)
    BoardAdc,
    /// Аналоговый выход платы (DAC), только RHS
    BoardDac,
    /// Цифровой вход платы
    DigitalIn,
    /// Цифровой выход платы
    DigitalOut,
}

/// Параметры триггера spike scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpikeScope {
    /// 0 = по цифровому входу, 1 = по порогу напряжения
    pub trigger_mode: i16,
    /// Порог напряжения (мкВ)
    pub voltage_threshold: i16,
    /// Цифровой канал-триггер
    pub trigger_channel: i16,
    /// 0 = по спаду, 1 = по фронту
    pub trigger_polarity: i16,
}

/// Описание одного канала из заголовка
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub native_name: String,
    pub custom_name: String,
    pub native_order: i16,
    pub custom_order: i16,
    pub signal_type: SignalType,
    pub enabled: bool,
    pub chip_channel: i16,
    /// Для RHD не хранится в файле и совпадает с `board_stream`
    pub command_stream: i16,
    pub board_stream: i16,
    pub spike_scope: SpikeScope,
    /// Модуль импеданса (Ом)
    pub impedance_magnitude: f32,
    /// Фаза импеданса (градусы)
    pub impedance_phase: f32,
}

impl SignalType {
    pub const ALL: [SignalType; 7] = [
        SignalType::Amplifier,
        SignalType::AuxInput,
        SignalType::SupplyVoltage,
        SignalType::BoardAdc,
        SignalType::BoardDac,
        SignalType::DigitalIn,
        SignalType::DigitalOut,
    ];

    /// Преобразует код из файла с учётом типа файла.
    ///
    /// В RHD нет аналоговых выходов, поэтому коды цифровых каналов там
    /// сдвинуты на единицу относительно RHS.
    pub fn from_code(
        file_type: FileType,
        code: i16,
    ) -> Option<Self> {
        match (file_type, code) {
            (_, 0) => Some(SignalType::Amplifier),
            (_, 1) => Some(SignalType::AuxInput),
            (_, 2) => Some(SignalType::SupplyVoltage),
            (_, 3) => Some(SignalType::BoardAdc),
            (FileType::Rhd, 4) => Some(SignalType::DigitalIn),
            (FileType::Rhd, 5) => Some(SignalType::DigitalOut),
            (FileType::Rhs, 4) => Some(SignalType::BoardDac),
            (FileType::Rhs, 5) => Some(SignalType::DigitalIn),
            (FileType::Rhs, 6) => Some(SignalType::DigitalOut),
            _ => None,
        }
    }

    /// Каналы ввода/вывода платы (по ним определяется наличие expander).
    pub fn is_board_io(&self) -> bool {
        matches!(
            self,
            SignalType::BoardAdc
                | SignalType::BoardDac
                | SignalType::DigitalIn
                | SignalType::DigitalOut
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            SignalType::Amplifier => "amplifier",
            SignalType::AuxInput => "auxiliary input",
            SignalType::SupplyVoltage => "supply voltage",
            SignalType::BoardAdc => "analog input",
            SignalType::BoardDac => "analog output",
            SignalType::DigitalIn => "digital input",
            SignalType::DigitalOut => "digital output",
        }
    }
}

impl Channel {
    /// Номер канала из хвоста нативного имени (`"A-012"` → 12).
    pub fn channel_number(&self) -> Option<u32> {
        let digits = self
            .native_name
            .rsplit(|c: char| !c.is_ascii_digit())
            .next()?;

        digits.parse().ok()
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(native_name: &str) -> Channel {
        Channel {
            native_name: native_name.to_string(),
            custom_name: String::new(),
            native_order: 0,
            custom_order: 0,
            signal_type: SignalType::Amplifier,
            enabled: true,
            chip_channel: 0,
            command_stream: 0,
            board_stream: 0,
            spike_scope: SpikeScope::default(),
            impedance_magnitude: 0.0,
            impedance_phase: 0.0,
        }
    }

    #[test]
    fn test_rhd_codes() {
        assert_eq!(
            SignalType::from_code(FileType::Rhd, 3),
            Some(SignalType::BoardAdc)
        );
        assert_eq!(
            SignalType::from_code(FileType::Rhd, 4),
            Some(SignalType::DigitalIn)
        );
        assert_eq!(
            SignalType::from_code(FileType::Rhd, 5),
            Some(SignalType::DigitalOut)
        );
        assert_eq!(SignalType::from_code(FileType::Rhd, 6), None);
        assert_eq!(SignalType::from_code(FileType::Rhd, -1), None);
    }

    #[test]
    fn test_rhs_codes() {
        assert_eq!(
            SignalType::from_code(FileType::Rhs, 4),
            Some(SignalType::BoardDac)
        );
        assert_eq!(
            SignalType::from_code(FileType::Rhs, 6),
            Some(SignalType::DigitalOut)
        );
        assert_eq!(SignalType::from_code(FileType::Rhs, 7), None);
    }

    #[test]
    fn test_codes_match_max_code() {
        for file_type in [FileType::Rhd, FileType::Rhs] {
            for code in 0..=file_type.max_signal_type_code() {
                assert!(SignalType::from_code(file_type, code).is_some());
            }
            assert!(
                SignalType::from_code(file_type, file_type.max_signal_type_code() + 1).is_none()
            );
        }
    }

    #[test]
    fn test_board_io() {
        assert!(SignalType::BoardAdc.is_board_io());
        assert!(SignalType::DigitalOut.is_board_io());
        assert!(!SignalType::Amplifier.is_board_io());
        assert!(!SignalType::SupplyVoltage.is_board_io());
    }

    #[test]
    fn test_channel_number() {
        assert_eq!(channel("A-012").channel_number(), Some(12));
        assert_eq!(channel("DIGITAL-IN-07").channel_number(), Some(7));
        assert_eq!(channel("VDD").channel_number(), None);
        assert_eq!(channel("").channel_number(), None);
    }
}
