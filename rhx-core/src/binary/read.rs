//! Последовательное чтение примитивов заголовка.
//!
//! Все многобайтовые значения хранятся в little-endian. Любое короткое
//! чтение терминально: повторов нет.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use rhx_types::{DecodeError, DecodeResult};

/// Длина строки, означающая "строки нет" (отличается от пустой строки).
pub const QSTRING_NULL_LEN: u32 = 0xFFFF_FFFF;

/// Читатель полей заголовка с подсчётом прочитанных байт.
pub struct BinaryReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Количество байт, прочитанных с момента создания.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_u32(
        &mut self,
        label: &'static str,
    ) -> DecodeResult<u32> {
        let value = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| read_error(e, label))?;
        self.offset += 4;
        Ok(value)
    }

    pub fn read_i16(
        &mut self,
        label: &'static str,
    ) -> DecodeResult<i16> {
        let value = self
            .inner
            .read_i16::<LittleEndian>()
            .map_err(|e| read_error(e, label))?;
        self.offset += 2;
        Ok(value)
    }

    pub fn read_f32(
        &mut self,
        label: &'static str,
    ) -> DecodeResult<f32> {
        let value = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| read_error(e, label))?;
        self.offset += 4;
        Ok(value)
    }

    /// Флаг хранится как int16: любое ненулевое значение — `true`.
    pub fn read_bool(
        &mut self,
        label: &'static str,
    ) -> DecodeResult<bool> {
        Ok(self.read_i16(label)? != 0)
    }

    /// Читает строку с префиксом длины (u32, в байтах) в UTF-16LE и
    /// перекодирует её в UTF-8.
    ///
    /// Длина [`QSTRING_NULL_LEN`] и нулевая длина дают пустую строку, при
    /// этом читаются только 4 байта длины.
    pub fn read_qstring(
        &mut self,
        label: &'static str,
    ) -> DecodeResult<String> {
        let len = self.read_u32(label)?;

        if len == QSTRING_NULL_LEN || len == 0 {
            return Ok(String::new());
        }

        // take() не даёт заранее выделить гигабайты по битой длине
        let mut bytes = Vec::new();
        let n = (&mut self.inner)
            .take(u64::from(len))
            .read_to_end(&mut bytes)
            .map_err(|e| read_error(e, label))?;
        self.offset += n as u64;

        if n < len as usize {
            return Err(DecodeError::TruncatedInput(label));
        }

        if len % 2 != 0 {
            return Err(DecodeError::EncodingError(label));
        }

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        String::from_utf16(&units).map_err(|_| DecodeError::EncodingError(label))
    }
}

fn read_error(
    err: io::Error,
    label: &'static str,
) -> DecodeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        DecodeError::TruncatedInput(label)
    } else {
        DecodeError::Io(err)
    }
}
