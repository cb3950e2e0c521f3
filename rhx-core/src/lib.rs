//! Декодер заголовков файлов RHD/RHS
//!
//! Разбирает бинарный заголовок файлов электрофизиологической записи в
//! проверенную структуру [`HeaderInfo`]: частота дискретизации, фильтры,
//! параметры стимуляции, группы сигналов и каналы, сводные счётчики.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use rhx_core::{format_summary, read_header_file};
//!
//! let header = read_header_file("info.rhd")?;
//! println!("{}", format_summary(&header));
//! println!("enabled amplifier channels: {}", header.counts.amplifier);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod format;
pub mod header;
pub mod summary;

pub use binary::*;
pub use format::*;
pub use header::*;
pub use rhx_types::*;
pub use summary::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
