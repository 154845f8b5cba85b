//! Well-known program ids, pre-decoded from their Base58 forms.
//!
//! Base58 cannot be decoded in a `const` context, so the byte arrays are
//! spelled out; the tests round-trip each one against its text form.

/// System program: `11111111111111111111111111111111` (32 zero bytes).
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// SPL token program: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`.
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Associated token account program: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
];

/// Token metadata program: `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`.
pub const TOKEN_METADATA_PROGRAM_ID: [u8; 32] = [
    0x0b, 0x70, 0x65, 0xb1, 0xe3, 0xd1, 0x7c, 0x45, 0x38, 0x9d, 0x52, 0x7f, 0x6b, 0x04, 0xc3,
    0xcd, 0x58, 0xb8, 0x6c, 0x73, 0x1a, 0xa0, 0xfd, 0xb5, 0x49, 0xb6, 0xd1, 0xbc, 0x03, 0xf8,
    0x29, 0x46,
];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`.
pub const RENT_SYSVAR_ID: [u8; 32] = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1,
    0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00,
    0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::format_address;

    #[test]
    fn system_program_id_text() {
        assert_eq!(
            format_address(&SYSTEM_PROGRAM_ID),
            "11111111111111111111111111111111"
        );
    }

    #[test]
    fn token_program_id_text() {
        assert_eq!(
            format_address(&TOKEN_PROGRAM_ID),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn associated_token_program_id_text() {
        assert_eq!(
            format_address(&ASSOCIATED_TOKEN_PROGRAM_ID),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
    }

    #[test]
    fn token_metadata_program_id_text() {
        assert_eq!(
            format_address(&TOKEN_METADATA_PROGRAM_ID),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
    }

    #[test]
    fn rent_sysvar_id_text() {
        assert_eq!(
            format_address(&RENT_SYSVAR_ID),
            "SysvarRent111111111111111111111111111111111"
        );
    }
}
