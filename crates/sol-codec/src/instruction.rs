//! Instruction value types and byte-exact encoders.
//!
//! One constructor per supported operation. Each emits the discriminator
//! byte followed by little-endian fields with no padding, plus the exact
//! account list the target program expects. Account order within an
//! instruction is part of the wire contract: a reordered list still
//! assembles into a well-formed message but the program will reject it, so
//! the lists here are never rearranged.

use crate::error::CodecError;
use crate::programs::{
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
use crate::wire::disc;

/// How one instruction references one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    pub fn writable(pubkey: [u8; 32], is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    pub fn readonly(pubkey: [u8; 32], is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction before it is compiled into a message. Immutable value
/// once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

// ---------------------------------------------------------------------------
// System program
// ---------------------------------------------------------------------------

/// System program `Transfer`: move `lamports` from `funder` to `recipient`.
///
/// Data: `[2]` + u64 lamports LE (9 bytes).
pub fn system_transfer(funder: &[u8; 32], recipient: &[u8; 32], lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(disc::SYSTEM_TRANSFER);
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*funder, true),
            AccountMeta::writable(*recipient, false),
        ],
        data,
    }
}

/// System program `CreateAccount`: fund `new_account` with `lamports`,
/// allocate `space` bytes, and assign it to `owner`.
///
/// Data: `[0]` + u64 lamports + u64 space + 32-byte owner (49 bytes).
/// The new account must co-sign the message.
pub fn system_create_account(
    funder: &[u8; 32],
    new_account: &[u8; 32],
    lamports: u64,
    space: u64,
    owner: &[u8; 32],
) -> Instruction {
    let mut data = Vec::with_capacity(49);
    data.push(disc::SYSTEM_CREATE_ACCOUNT);
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*funder, true),
            AccountMeta::writable(*new_account, true),
        ],
        data,
    }
}

// ---------------------------------------------------------------------------
// Token program
// ---------------------------------------------------------------------------

/// Token program `InitializeMint2`: set decimals and mint authority on a
/// freshly created mint account. No freeze authority is installed.
///
/// Data: `[20]` + u8 decimals + 32-byte mint authority + `[0]` (the
/// freeze-authority-present flag; no authority field follows when 0).
pub fn initialize_mint2(mint: &[u8; 32], decimals: u8, mint_authority: &[u8; 32]) -> Instruction {
    let mut data = Vec::with_capacity(35);
    data.push(disc::TOKEN_INITIALIZE_MINT2);
    data.push(decimals);
    data.extend_from_slice(mint_authority);
    data.push(0);

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![AccountMeta::writable(*mint, false)],
        data,
    }
}

/// Token program `MintTo`: mint `amount` base units of `mint` into
/// `destination`.
///
/// Data: `[7]` + u64 amount LE (9 bytes).
pub fn mint_to(
    mint: &[u8; 32],
    destination: &[u8; 32],
    authority: &[u8; 32],
    amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(disc::TOKEN_MINT_TO);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*mint, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*authority, true),
        ],
        data,
    }
}

/// Token program `Transfer`: move `amount` base units between token
/// accounts.
///
/// Data: `[3]` + u64 amount LE (9 bytes).
pub fn token_transfer(
    source: &[u8; 32],
    destination: &[u8; 32],
    authority: &[u8; 32],
    amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(disc::TOKEN_TRANSFER);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*source, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*authority, true),
        ],
        data,
    }
}

/// Token program `TransferChecked`: like `Transfer`, but the mint and its
/// decimals ride along so the program can reject mismatched expectations.
///
/// Data: `[12]` + u64 amount LE + u8 decimals (10 bytes).
pub fn token_transfer_checked(
    source: &[u8; 32],
    mint: &[u8; 32],
    destination: &[u8; 32],
    authority: &[u8; 32],
    amount: u64,
    decimals: u8,
) -> Instruction {
    let mut data = Vec::with_capacity(10);
    data.push(disc::TOKEN_TRANSFER_CHECKED);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*source, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*authority, true),
        ],
        data,
    }
}

// ---------------------------------------------------------------------------
// Associated token account program
// ---------------------------------------------------------------------------

/// Create the associated token account `associated_account` for
/// `(owner, mint)`, funded by `payer`. The instruction carries no data; the
/// account list is the whole payload.
pub fn create_associated_token_account(
    payer: &[u8; 32],
    associated_account: &[u8; 32],
    owner: &[u8; 32],
    mint: &[u8; 32],
) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*payer, true),
            AccountMeta::writable(*associated_account, false),
            AccountMeta::readonly(*owner, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::readonly(RENT_SYSVAR_ID, false),
        ],
        data: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Metadata program
// ---------------------------------------------------------------------------

/// Metadata program `UpdateMetadataAccountV2`: replace name, symbol and uri
/// on an existing metadata account.
///
/// Data: `[15]` + `[1]` (data present) + three length-prefixed UTF-8
/// strings (u32 LE length + bytes) + u16 seller-fee-basis-points (0) + six
/// zero bytes for the absent creators, collection, uses, new update
/// authority, primary-sale-happened and is-mutable fields.
///
/// Fails with [`CodecError::InvalidParameter`] if a string field cannot fit
/// its u32 length prefix.
pub fn update_metadata_v2(
    metadata_account: &[u8; 32],
    update_authority: &[u8; 32],
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<Instruction, CodecError> {
    let mut data = Vec::with_capacity(2 + 12 + name.len() + symbol.len() + uri.len() + 8);
    data.push(disc::METADATA_UPDATE_V2);
    data.push(1);
    put_string(&mut data, name)?;
    put_string(&mut data, symbol)?;
    put_string(&mut data, uri)?;
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&[0u8; 6]);

    Ok(Instruction {
        program_id: TOKEN_METADATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*metadata_account, false),
            AccountMeta::readonly(*update_authority, true),
        ],
        data,
    })
}

/// Append a u32-length-prefixed UTF-8 string.
fn put_string(buf: &mut Vec<u8>, value: &str) -> Result<(), CodecError> {
    let len = u32::try_from(value.len()).map_err(|_| {
        CodecError::InvalidParameter(format!(
            "string field of {} bytes exceeds the u32 length prefix",
            value.len()
        ))
    })?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- system transfer ----------------------------------------------------

    #[test]
    fn system_transfer_layout() {
        let ix = system_transfer(&[1u8; 32], &[2u8; 32], 1_000_000);

        assert_eq!(ix.program_id, SYSTEM_PROGRAM_ID);
        assert_eq!(ix.data.len(), 9);
        assert_eq!(ix.data[0], 2);
        assert_eq!(&ix.data[1..9], &1_000_000u64.to_le_bytes());
    }

    #[test]
    fn system_transfer_accounts() {
        let from = [0xAAu8; 32];
        let to = [0xBBu8; 32];
        let ix = system_transfer(&from, &to, 500);

        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, from);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, to);
        assert!(!ix.accounts[1].is_signer);
        assert!(ix.accounts[1].is_writable);
    }

    // -- system create account ---------------------------------------------

    #[test]
    fn create_account_layout() {
        let owner = TOKEN_PROGRAM_ID;
        let ix = system_create_account(&[1u8; 32], &[2u8; 32], 2_039_280, 82, &owner);

        assert_eq!(ix.data.len(), 49);
        assert_eq!(ix.data[0], 0);
        assert_eq!(&ix.data[1..9], &2_039_280u64.to_le_bytes());
        assert_eq!(&ix.data[9..17], &82u64.to_le_bytes());
        assert_eq!(&ix.data[17..49], &owner);
    }

    #[test]
    fn create_account_both_accounts_sign() {
        let ix = system_create_account(&[1u8; 32], &[2u8; 32], 1, 82, &TOKEN_PROGRAM_ID);
        assert!(ix.accounts.iter().all(|a| a.is_signer && a.is_writable));
    }

    // -- initialize mint ----------------------------------------------------

    #[test]
    fn initialize_mint2_layout() {
        let authority = [0x07u8; 32];
        let ix = initialize_mint2(&[3u8; 32], 6, &authority);

        // disc + decimals + authority + freeze flag
        assert_eq!(ix.data.len(), 35);
        assert_eq!(ix.data[0], 20);
        assert_eq!(ix.data[1], 6);
        assert_eq!(&ix.data[2..34], &authority);
        assert_eq!(ix.data[34], 0);
    }

    #[test]
    fn initialize_mint2_single_writable_account() {
        let mint = [3u8; 32];
        let ix = initialize_mint2(&mint, 9, &[0u8; 32]);
        assert_eq!(ix.accounts.len(), 1);
        assert_eq!(ix.accounts[0].pubkey, mint);
        assert!(ix.accounts[0].is_writable);
        assert!(!ix.accounts[0].is_signer);
    }

    // -- mint to -------------------------------------------------------------

    #[test]
    fn mint_to_layout() {
        let ix = mint_to(&[1u8; 32], &[2u8; 32], &[3u8; 32], 42);
        assert_eq!(ix.program_id, TOKEN_PROGRAM_ID);
        assert_eq!(ix.data.len(), 9);
        assert_eq!(ix.data[0], 7);
        assert_eq!(&ix.data[1..9], &42u64.to_le_bytes());
    }

    #[test]
    fn mint_to_authority_signs() {
        let ix = mint_to(&[1u8; 32], &[2u8; 32], &[3u8; 32], 1);
        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[0].is_writable); // mint
        assert!(ix.accounts[1].is_writable); // destination
        assert!(ix.accounts[2].is_signer && !ix.accounts[2].is_writable);
    }

    // -- token transfer ------------------------------------------------------

    #[test]
    fn token_transfer_layout() {
        let amount: u64 = 500_000;
        let ix = token_transfer(&[1u8; 32], &[2u8; 32], &[3u8; 32], amount);

        assert_eq!(ix.data.len(), 9);
        assert_eq!(ix.data[0], 3);
        assert_eq!(
            u64::from_le_bytes(ix.data[1..9].try_into().unwrap()),
            amount
        );
    }

    #[test]
    fn token_transfer_zero_amount_encodes() {
        // Zero is a legal wire amount; rejecting it is the program's call.
        let ix = token_transfer(&[1u8; 32], &[2u8; 32], &[3u8; 32], 0);
        assert_eq!(&ix.data[1..9], &[0u8; 8]);
    }

    #[test]
    fn token_transfer_account_roles() {
        let ix = token_transfer(&[1u8; 32], &[2u8; 32], &[3u8; 32], 100);

        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[0].is_writable && !ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_writable && !ix.accounts[1].is_signer);
        assert!(ix.accounts[2].is_signer && !ix.accounts[2].is_writable);
    }

    // -- token transfer checked ---------------------------------------------

    #[test]
    fn transfer_checked_layout() {
        let ix = token_transfer_checked(
            &[1u8; 32],
            &[2u8; 32],
            &[3u8; 32],
            &[4u8; 32],
            u64::MAX,
            6,
        );

        assert_eq!(ix.data.len(), 10);
        assert_eq!(ix.data[0], 12);
        assert_eq!(&ix.data[1..9], &u64::MAX.to_le_bytes());
        assert_eq!(ix.data[9], 6);
    }

    #[test]
    fn transfer_checked_account_order() {
        let source = [1u8; 32];
        let mint = [2u8; 32];
        let destination = [3u8; 32];
        let authority = [4u8; 32];
        let ix = token_transfer_checked(&source, &mint, &destination, &authority, 1, 0);

        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[0].pubkey, source);
        assert_eq!(ix.accounts[1].pubkey, mint);
        assert_eq!(ix.accounts[2].pubkey, destination);
        assert_eq!(ix.accounts[3].pubkey, authority);
        assert!(!ix.accounts[1].is_writable);
        assert!(ix.accounts[3].is_signer);
    }

    // -- create associated token account ------------------------------------

    #[test]
    fn create_ata_has_empty_data_and_seven_accounts() {
        let ix = create_associated_token_account(&[1u8; 32], &[2u8; 32], &[3u8; 32], &[4u8; 32]);

        assert_eq!(ix.program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert!(ix.data.is_empty());
        assert_eq!(ix.accounts.len(), 7);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable); // payer
        assert!(ix.accounts[1].is_writable); // the new account
        assert_eq!(ix.accounts[4].pubkey, SYSTEM_PROGRAM_ID);
        assert_eq!(ix.accounts[5].pubkey, TOKEN_PROGRAM_ID);
        assert_eq!(ix.accounts[6].pubkey, RENT_SYSVAR_ID);
    }

    // -- update metadata -----------------------------------------------------

    #[test]
    fn update_metadata_layout() {
        let ix = update_metadata_v2(&[1u8; 32], &[2u8; 32], "Coin", "CN", "https://x").unwrap();

        let mut expected = vec![15u8, 1];
        expected.extend_from_slice(&4u32.to_le_bytes());
        expected.extend_from_slice(b"Coin");
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(b"CN");
        expected.extend_from_slice(&9u32.to_le_bytes());
        expected.extend_from_slice(b"https://x");
        expected.extend_from_slice(&0u16.to_le_bytes()); // seller fee
        expected.extend_from_slice(&[0u8; 6]); // absent option fields

        assert_eq!(ix.data, expected);
        assert_eq!(ix.program_id, TOKEN_METADATA_PROGRAM_ID);
    }

    #[test]
    fn update_metadata_accounts() {
        let metadata = [9u8; 32];
        let authority = [8u8; 32];
        let ix = update_metadata_v2(&metadata, &authority, "n", "s", "u").unwrap();

        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, metadata);
        assert!(ix.accounts[0].is_writable && !ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, authority);
        assert!(ix.accounts[1].is_signer && !ix.accounts[1].is_writable);
    }

    #[test]
    fn update_metadata_empty_strings() {
        let ix = update_metadata_v2(&[1u8; 32], &[2u8; 32], "", "", "").unwrap();
        // disc + flag + three empty prefixes + u16 + six flags
        assert_eq!(ix.data.len(), 2 + 12 + 2 + 6);
    }

    #[test]
    fn update_metadata_multibyte_utf8_length_is_in_bytes() {
        let ix = update_metadata_v2(&[1u8; 32], &[2u8; 32], "é", "", "").unwrap();
        // "é" is two bytes in UTF-8; the prefix counts bytes, not chars.
        assert_eq!(&ix.data[2..6], &2u32.to_le_bytes());
    }
}
