use serde::Serialize;

use crate::Channel;

/// Префиксы портов 5..8: их наличие означает, что к контроллеру подключено
/// больше четырёх SPI портов.
pub const EXPANSION_PORT_PREFIXES: [&str; 4] = ["E", "F", "G", "H"];

/// Группа сигналов (порт/разъём), порядок групп совпадает с порядком в файле
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalGroup {
    pub name: String,
    pub prefix: String,
    pub enabled: bool,
    /// Заявленное количество каналов усилителя
    pub num_amplifier_channels: i16,
    pub channels: Vec<Channel>,
}

impl SignalGroup {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Префикс группы указывает на порт E..H (регистр не важен).
    pub fn is_expansion_port(&self) -> bool {
        EXPANSION_PORT_PREFIXES
            .iter()
            .any(|p| self.prefix.eq_ignore_ascii_case(p))
    }

    pub fn enabled_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| c.enabled)
    }
}
