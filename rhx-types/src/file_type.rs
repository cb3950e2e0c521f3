use serde::Serialize;

/// Магическое число файлов RHD (контроллеры записи)
pub const RHD_MAGIC: u32 = 0xC691_2702;

/// Магическое число файлов RHS (контроллер стимуляции/записи)
pub const RHS_MAGIC: u32 = 0xD691_27AC;

/// Режим платы: USB interface board (значение по умолчанию для старых RHD)
pub const BOARD_MODE_USB_INTERFACE: i16 = 0;

/// Режим платы: RHD recording controller
pub const BOARD_MODE_RHD_CONTROLLER: i16 = 13;

/// Режим платы: RHS stim/recording controller
pub const BOARD_MODE_RHS_CONTROLLER: i16 = 14;

/// Тип файла заголовка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileType {
    /// Файл записи (.rhd)
    Rhd,
    /// Файл стимуляции/записи (.rhs), содержит блок параметров стимуляции
    Rhs,
}

/// Тип контроллера, на котором сделана запись
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControllerType {
    /// RHD USB interface board
    RecordUsb2,
    /// RHD recording controller
    RecordUsb3,
    /// RHS stim/recording controller
    StimRecord,
}

/// Версия формата файла (major.minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Version {
    pub major: i16,
    pub minor: i16,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl FileType {
    /// Точное сопоставление магического числа с типом файла.
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            RHD_MAGIC => Some(FileType::Rhd),
            RHS_MAGIC => Some(FileType::Rhs),
            _ => None,
        }
    }

    pub fn magic(&self) -> u32 {
        match self {
            FileType::Rhd => RHD_MAGIC,
            FileType::Rhs => RHS_MAGIC,
        }
    }

    /// Максимальный допустимый код типа сигнала для канала.
    pub fn max_signal_type_code(&self) -> i16 {
        match self {
            FileType::Rhd => 5,
            FileType::Rhs => 6,
        }
    }
}

impl ControllerType {
    /// Человекочитаемое название контроллера.
    pub fn description(&self) -> &'static str {
        match self {
            ControllerType::RecordUsb2 => "RHD USB interface board",
            ControllerType::RecordUsb3 => "RHD recording controller",
            ControllerType::StimRecord => "RHS stim/recording controller",
        }
    }
}

impl Version {
    pub fn new(
        major: i16,
        minor: i16,
    ) -> Self {
        Self { major, minor }
    }

    /// Дробный номер версии `major + minor / 10`.
    ///
    /// Используется только для сравнения с порогами (1.09, 1.29, 1.99).
    pub fn number(&self) -> f64 {
        f64::from(self.major) + f64::from(self.minor) / 10.0
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for FileType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FileType::Rhd => write!(f, "RHD"),
            FileType::Rhs => write!(f, "RHS"),
        }
    }
}

impl std::fmt::Display for ControllerType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl std::fmt::Display for Version {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
