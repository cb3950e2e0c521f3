//! Синтетические заголовки для бенчмарков декодера.

use rhx_core::RHS_MAGIC;

fn put_i16(
    buf: &mut Vec<u8>,
    v: i16,
) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_f32(
    buf: &mut Vec<u8>,
    v: f32,
) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_string(
    buf: &mut Vec<u8>,
    s: &str,
) {
    let units: Vec<u8> = s.encode_utf16().flat_map(u16::to_le_bytes).collect();
    buf.extend_from_slice(&(units.len() as u32).to_le_bytes());
    buf.extend_from_slice(&units);
}

/// Заголовок RHS 3.0 с `groups` группами по `channels` каналов усилителя.
pub fn rhs_header(
    groups: i16,
    channels: i16,
) -> Vec<u8> {
    let mut buf = RHS_MAGIC.to_le_bytes().to_vec();
    put_i16(&mut buf, 3);
    put_i16(&mut buf, 0);
    put_f32(&mut buf, 30_000.0);
    put_i16(&mut buf, 1);
    for v in [1.0, 0.1, 1000.0, 7500.0, 1.0, 0.1, 1000.0, 7500.0] {
        put_f32(&mut buf, v);
    }
    put_i16(&mut buf, 0);
    put_f32(&mut buf, 1000.0);
    put_f32(&mut buf, 1000.0);

    put_i16(&mut buf, 0);
    put_i16(&mut buf, 0);
    put_f32(&mut buf, 1e-6);
    put_f32(&mut buf, 1e-6);
    put_f32(&mut buf, 0.0);

    for note in ["bench", "", "Заметка"] {
        put_string(&mut buf, note);
    }
    put_i16(&mut buf, 0); // dc amplifier
    put_i16(&mut buf, 14); // board mode
    put_string(&mut buf, "A-000");

    put_i16(&mut buf, groups);
    for g in 0..groups {
        let prefix = char::from(b'A' + g as u8).to_string();
        put_string(&mut buf, &format!("Port {prefix}"));
        put_string(&mut buf, &prefix);
        put_i16(&mut buf, 1);
        put_i16(&mut buf, channels);
        put_i16(&mut buf, channels);

        for c in 0..channels {
            let name = format!("{prefix}-{c:03}");
            put_string(&mut buf, &name);
            put_string(&mut buf, &name);
            put_i16(&mut buf, c);
            put_i16(&mut buf, c);
            put_i16(&mut buf, 0);
            put_i16(&mut buf, 1);
            put_i16(&mut buf, c % 16);
            put_i16(&mut buf, g);
            put_i16(&mut buf, g);
            for v in [0, 70, 0, 0] {
                put_i16(&mut buf, v);
            }
            put_f32(&mut buf, 1.5e5);
            put_f32(&mut buf, -45.0);
        }
    }

    buf
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_synthetic_header_decodes() {
        let raw = rhs_header(8, 128);

        let info = rhx_core::decode_header(Cursor::new(raw.as_slice())).unwrap();

        assert_eq!(info.num_channels(), 8 * 128);
        assert_eq!(info.num_data_streams, 8);
        assert_eq!(info.num_spi_ports, 8);
        assert_eq!(info.header_size_in_bytes, raw.len() as u64);
    }
}
