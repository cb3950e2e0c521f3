use thiserror::Error;

/// Результат декодирования заголовка RHD/RHS.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Ошибки декодирования заголовка.
///
/// Любая ошибка фатальна для текущего декодирования: частичный результат
/// никогда не возвращается.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Поток закончился раньше, чем было прочитано поле
    #[error("Cannot read {0}: unexpected end of input")]
    TruncatedInput(&'static str),

    /// Некорректная UTF-16 строка (непарный суррогат, нечётная длина)
    #[error("Malformed UTF-16 string in {0}")]
    EncodingError(&'static str),

    /// Неизвестное магическое число
    #[error("Invalid header magic number: {0:#010x}")]
    InvalidMagicNumber(u32),

    /// Частота дискретизации не соответствует ни одной аппаратной
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Код режима режекторного фильтра вне {0, 1, 2}
    #[error("Invalid notch filter mode: {0}")]
    InvalidNotchMode(i16),

    /// Шаг тока стимуляции не соответствует ни одному допустимому
    #[error("Invalid stim step size: {0}")]
    InvalidStimStepSize(f32),

    /// Неизвестный режим платы
    #[error("Invalid board mode: {0}")]
    InvalidBoardMode(i16),

    /// Количество групп сигналов вне [0, 12]
    #[error("Invalid number of signal groups: {0}")]
    InvalidGroupCount(i16),

    /// Количество каналов в группе вне допустимого диапазона
    #[error("Invalid number of channels in signal group {group}: {value}")]
    InvalidChannelCount { value: i16, group: usize },

    /// Количество каналов усилителя в группе вне [0, 128]
    #[error("Invalid number of amplifier channels in signal group {group}: {value}")]
    InvalidAmplifierChannelCount { value: i16, group: usize },

    /// Код типа сигнала вне допустимого для данного типа файла диапазона
    #[error("Invalid signal type in group {group}, channel {channel}: {value}")]
    InvalidSignalType {
        value: i16,
        group: usize,
        channel: usize,
    },

    /// Заголовок прочитан, но за ним следуют данные (файл "всё в одном")
    #[error(
        "Header ends at byte {header_size} but stream is {stream_len} bytes: \
         combined header+data files are not supported"
    )]
    UnsupportedDataSection { header_size: u64, stream_len: u64 },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Декодирование прервано внешним флагом
    #[error("Header decoding cancelled")]
    Cancelled,

    /// Истёк срок, отведённый на декодирование
    #[error("Header decoding deadline exceeded")]
    DeadlineExceeded,
}

impl DecodeError {
    /// Имя поля, на котором остановилось чтение (если ошибка связана с
    /// чтением конкретного поля).
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::TruncatedInput(label) | Self::EncodingError(label) => Some(label),
            _ => None,
        }
    }
}
