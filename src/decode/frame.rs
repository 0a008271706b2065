/// TL-500 frame field extraction
use crate::error::{LoggerError, Result};

/// Device epoch (2000-01-01T00:00:00Z) offset from the unix epoch in seconds.
const DEVICE_EPOCH_OFFSET: i64 = 946_684_800;

/// Bits of the 16-bit id candidate that are all clear when the station
/// uses the extended three-byte id form.
const EXTENDED_ID_MASK: u16 = 0x6000;

/// Fields extracted from one frame, before unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub sensor_id: u32,
    /// Unix epoch seconds.
    pub timestamp: i64,
    /// Signed raw measurement.
    pub raw: i16,
}

/// Decode the bit-packed fields of a TL-500 data frame.
///
/// Layout after the two status bytes:
/// - Bytes 2-3: sensor id, little-endian 16-bit
/// - Byte 4: id bits 16-23, present only in the extended form
///   (candidate & 0x6000 == 0); shifts every later field by 2
/// - Bytes 4+i .. 5+i: raw measurement, big-endian signed 16-bit
/// - Bytes 6+i .. 9+i: timestamp, little-endian 32-bit seconds since
///   the device epoch
///
/// The extended-form test runs before any other field is read, since it
/// decides the offset delta `i` for everything that follows. The epoch
/// sum is done in i64, so the full 32-bit device range decodes without
/// wraparound.
pub fn decode_frame(frame: &[u8]) -> Result<DecodedFrame> {
    let byte = |idx: usize| -> Result<u8> {
        frame
            .get(idx)
            .copied()
            .ok_or(LoggerError::TruncatedFrame(frame.len()))
    };

    let candidate = u16::from_le_bytes([byte(2)?, byte(3)?]);
    let mut sensor_id = candidate as u32;

    // Newer sensors carry a third id byte and shift the field layout
    let mut i = 0usize;
    if candidate & EXTENDED_ID_MASK == 0 {
        sensor_id += (byte(4)? as u32) << 16;
        i = 2;
    }

    let raw = i16::from_be_bytes([byte(4 + i)?, byte(5 + i)?]);

    let device_secs = u32::from_le_bytes([byte(6 + i)?, byte(7 + i)?, byte(8 + i)?, byte(9 + i)?]);
    let timestamp = device_secs as i64 + DEVICE_EPOCH_OFFSET;

    Ok(DecodedFrame {
        sensor_id,
        timestamp,
        raw,
    })
}

/// Build a synthetic 64-byte frame for decode tests.
#[cfg(test)]
pub(crate) fn test_frame(id_lo: u16, id_hi: Option<u8>, raw: u16, device_secs: u32) -> Vec<u8> {
    let mut frame = vec![0u8; 64];
    frame[1] = 1;
    frame[2..4].copy_from_slice(&id_lo.to_le_bytes());
    let i = match id_hi {
        Some(hi) => {
            frame[4] = hi;
            2
        }
        None => 0,
    };
    frame[4 + i..6 + i].copy_from_slice(&raw.to_be_bytes());
    frame[6 + i..10 + i].copy_from_slice(&device_secs.to_le_bytes());
    frame
}
