//! Shared wire-format helpers.
//!
//! All multi-byte integers in the supported programs are little-endian with
//! no padding. The helpers here are used by every encoder and decoder in the
//! crate so the byte assembly lives in one place.

/// Instruction discriminators: the leading payload byte that identifies
/// which operation an instruction encodes.
pub mod disc {
    /// System program: CreateAccount.
    pub const SYSTEM_CREATE_ACCOUNT: u8 = 0;
    /// System program: Transfer.
    pub const SYSTEM_TRANSFER: u8 = 2;
    /// Token program: Transfer.
    pub const TOKEN_TRANSFER: u8 = 3;
    /// Token program: MintTo.
    pub const TOKEN_MINT_TO: u8 = 7;
    /// Token program: TransferChecked.
    pub const TOKEN_TRANSFER_CHECKED: u8 = 12;
    /// Token program: InitializeMint2.
    pub const TOKEN_INITIALIZE_MINT2: u8 = 20;
    /// Metadata program: UpdateMetadataAccountV2.
    pub const METADATA_UPDATE_V2: u8 = 15;
}

/// Encode a `u16` in the message format's compact-u16 form.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Read a little-endian u32 at `offset`, or `None` if the slice ends first.
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes: [u8; 4] = data.get(offset..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Read a little-endian u64 at `offset`, or `None` if the slice ends first.
pub fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let end = offset.checked_add(8)?;
    let bytes: [u8; 8] = data.get(offset..end)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- compact-u16 ---------------------------------------------------------

    #[test]
    fn compact_u16_zero() {
        assert_eq!(encode_compact_u16(0), vec![0x00]);
    }

    #[test]
    fn compact_u16_one_byte_max() {
        assert_eq!(encode_compact_u16(0x7f), vec![0x7f]);
    }

    #[test]
    fn compact_u16_boundary_128() {
        // 128 = 0x80 -> two bytes: (0x00 | 0x80), 0x01
        assert_eq!(encode_compact_u16(128), vec![0x80, 0x01]);
    }

    #[test]
    fn compact_u16_two_byte_max() {
        // 16383 = 0x3fff -> two bytes: (0x7f | 0x80), 0x7f
        assert_eq!(encode_compact_u16(16383), vec![0xff, 0x7f]);
    }

    #[test]
    fn compact_u16_boundary_16384() {
        assert_eq!(encode_compact_u16(16384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn compact_u16_max_value() {
        assert_eq!(encode_compact_u16(u16::MAX), vec![0xff, 0xff, 0x03]);
    }

    // -- little-endian readers ----------------------------------------------

    #[test]
    fn read_u64_le_at_offset() {
        let mut data = vec![0xEE; 3];
        data.extend_from_slice(&1_000_000u64.to_le_bytes());
        assert_eq!(read_u64_le(&data, 3), Some(1_000_000));
    }

    #[test]
    fn read_u64_le_max() {
        let data = u64::MAX.to_le_bytes();
        assert_eq!(read_u64_le(&data, 0), Some(u64::MAX));
    }

    #[test]
    fn read_u64_le_short_slice() {
        let data = [0u8; 7];
        assert_eq!(read_u64_le(&data, 0), None);
    }

    #[test]
    fn read_u64_le_offset_overflow() {
        assert_eq!(read_u64_le(&[0u8; 8], usize::MAX), None);
    }

    #[test]
    fn read_u32_le_at_offset() {
        let data = [0x00, 0x04, 0x00, 0x00, 0x00];
        assert_eq!(read_u32_le(&data, 1), Some(4));
    }

    #[test]
    fn read_u32_le_short_slice() {
        assert_eq!(read_u32_le(&[1, 2, 3], 0), None);
    }
}
