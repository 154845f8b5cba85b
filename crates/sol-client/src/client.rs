//! High-level ledger operations composed from the codec layer.
//!
//! Every write path follows the same shape: encode instructions, assemble a
//! message around a fresh blockhash, collect one signature per required
//! signer, submit. Every read path fetches raw account data and hands it to
//! the parsers. The client holds no state beyond its transport and never
//! retries — a failed submission surfaces to the caller as-is.

use serde::{Deserialize, Serialize};
use sol_codec::{
    account_data, decode, format_address, instruction, message, pda, Instruction, TokenAccountView,
    TransferScan, TOKEN_PROGRAM_ID,
};

use crate::error::ClientError;
use crate::signer::Signer;
use crate::transport::Transport;

/// Space allocated for a new mint account.
const MINT_ACCOUNT_SIZE: u64 = 82;

/// A token's metadata strings combined with its mint's decimals. The
/// decimals live on the mint account, not the metadata account, so this is
/// assembled from two reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
}

/// Ledger operations over a [`Transport`].
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -- write paths --------------------------------------------------------

    /// Assemble, sign and submit `instructions` with `fee_payer` paying.
    ///
    /// Signatures are collected in required-signer order; a required signer
    /// with no matching entry in `signers` fails with
    /// [`ClientError::MissingSignature`] before anything is submitted.
    pub fn send_instructions(
        &self,
        fee_payer: &[u8; 32],
        instructions: &[Instruction],
        signers: &[&dyn Signer],
    ) -> Result<String, ClientError> {
        let blockhash = self.transport.fetch_recent_blockhash()?;
        let msg = message::assemble(fee_payer, &blockhash, instructions)?;
        let bytes = message::serialize_message(&msg);

        let required = msg.required_signers();
        let mut signatures = Vec::with_capacity(required.len());
        for account in required {
            let signer = signers
                .iter()
                .find(|s| s.address() == *account)
                .ok_or_else(|| ClientError::MissingSignature(format_address(account)))?;
            signatures.push(signer.sign(&bytes)?);
        }

        log::debug!(
            "submitting message: {} instruction(s), {} signature(s)",
            instructions.len(),
            signatures.len()
        );
        Ok(self.transport.submit(&bytes, &signatures)?)
    }

    /// Move `lamports` of the native balance from the signer to `recipient`.
    pub fn transfer_lamports(
        &self,
        funder: &dyn Signer,
        recipient: &[u8; 32],
        lamports: u64,
    ) -> Result<String, ClientError> {
        let from = funder.address();
        let ix = instruction::system_transfer(&from, recipient, lamports);
        self.send_instructions(&from, &[ix], &[funder])
    }

    /// Create and initialize a new mint in one message.
    ///
    /// The caller supplies the rent-exempt balance for the mint account
    /// (rent schedules are ledger policy, queried out-of-band). Both the
    /// payer and the new mint account sign.
    pub fn create_mint(
        &self,
        payer: &dyn Signer,
        mint: &dyn Signer,
        mint_authority: &[u8; 32],
        decimals: u8,
        rent_lamports: u64,
    ) -> Result<String, ClientError> {
        let payer_address = payer.address();
        let mint_address = mint.address();

        let create = instruction::system_create_account(
            &payer_address,
            &mint_address,
            rent_lamports,
            MINT_ACCOUNT_SIZE,
            &TOKEN_PROGRAM_ID,
        );
        let init = instruction::initialize_mint2(&mint_address, decimals, mint_authority);

        self.send_instructions(&payer_address, &[create, init], &[payer, mint])
    }

    /// Mint `amount` base units into `destination`.
    pub fn mint_to(
        &self,
        authority: &dyn Signer,
        mint: &[u8; 32],
        destination: &[u8; 32],
        amount: u64,
    ) -> Result<String, ClientError> {
        let authority_address = authority.address();
        let ix = instruction::mint_to(mint, destination, &authority_address, amount);
        self.send_instructions(&authority_address, &[ix], &[authority])
    }

    /// Transfer `amount` base units of `mint` from the owner's associated
    /// token account to the recipient wallet's. Both token account
    /// addresses are derived here; they must already exist on the ledger.
    pub fn transfer_token(
        &self,
        owner: &dyn Signer,
        recipient_wallet: &[u8; 32],
        mint: &[u8; 32],
        amount: u64,
    ) -> Result<String, ClientError> {
        let owner_address = owner.address();
        let source = pda::derive_associated_token_address(&owner_address, mint)?;
        let destination = pda::derive_associated_token_address(recipient_wallet, mint)?;

        let ix = instruction::token_transfer(&source, &destination, &owner_address, amount);
        self.send_instructions(&owner_address, &[ix], &[owner])
    }

    /// Transfer between explicit token accounts with the mint and decimals
    /// riding along for on-chain verification.
    pub fn transfer_token_checked(
        &self,
        authority: &dyn Signer,
        source: &[u8; 32],
        mint: &[u8; 32],
        destination: &[u8; 32],
        amount: u64,
        decimals: u8,
    ) -> Result<String, ClientError> {
        let authority_address = authority.address();
        let ix = instruction::token_transfer_checked(
            source,
            mint,
            destination,
            &authority_address,
            amount,
            decimals,
        );
        self.send_instructions(&authority_address, &[ix], &[authority])
    }

    /// Ensure the associated token account for `(owner, mint)` exists.
    ///
    /// Returns the account address and, if it had to be created, the
    /// creation signature.
    pub fn create_token_account_if_missing(
        &self,
        payer: &dyn Signer,
        owner: &[u8; 32],
        mint: &[u8; 32],
    ) -> Result<([u8; 32], Option<String>), ClientError> {
        let associated = pda::derive_associated_token_address(owner, mint)?;

        if self.transport.fetch_account_blob(&associated)?.is_some() {
            log::debug!(
                "token account {} already exists",
                format_address(&associated)
            );
            return Ok((associated, None));
        }

        let payer_address = payer.address();
        let ix = instruction::create_associated_token_account(
            &payer_address,
            &associated,
            owner,
            mint,
        );
        let signature = self.send_instructions(&payer_address, &[ix], &[payer])?;
        Ok((associated, Some(signature)))
    }

    /// Replace the name, symbol and uri on a mint's metadata account.
    pub fn update_token_metadata(
        &self,
        update_authority: &dyn Signer,
        mint: &[u8; 32],
        name: &str,
        symbol: &str,
        uri: &str,
    ) -> Result<String, ClientError> {
        let metadata = pda::derive_metadata_address(mint)?;
        let authority_address = update_authority.address();

        let ix =
            instruction::update_metadata_v2(&metadata, &authority_address, name, symbol, uri)?;
        self.send_instructions(&authority_address, &[ix], &[update_authority])
    }

    // -- read paths ---------------------------------------------------------

    /// The number of decimals configured on a mint.
    pub fn get_mint_decimals(&self, mint: &[u8; 32]) -> Result<u8, ClientError> {
        let blob = self.fetch_required(mint, "mint account")?;
        Ok(account_data::parse_mint(&blob)?.decimals)
    }

    /// Parsed holdings of a token account.
    pub fn get_token_account(&self, address: &[u8; 32]) -> Result<TokenAccountView, ClientError> {
        let blob = self.fetch_required(address, "token account")?;
        Ok(account_data::parse_token_account(&blob)?)
    }

    /// The mint a token account holds.
    pub fn get_token_mint(&self, token_account: &[u8; 32]) -> Result<[u8; 32], ClientError> {
        Ok(self.get_token_account(token_account)?.mint)
    }

    /// Metadata strings for a mint, combined with the mint's decimals.
    pub fn get_token_metadata(&self, mint: &[u8; 32]) -> Result<TokenMetadata, ClientError> {
        let metadata_address = pda::derive_metadata_address(mint)?;
        let blob = self.fetch_required(&metadata_address, "metadata account")?;
        let view = account_data::parse_metadata(&blob)?;
        let decimals = self.get_mint_decimals(mint)?;

        Ok(TokenMetadata {
            name: view.name,
            symbol: view.symbol,
            uri: view.uri,
            decimals,
        })
    }

    /// All token transfers in a confirmed transaction, outer and inner, in
    /// encounter order.
    pub fn get_transaction_transfers(&self, signature: &str) -> Result<TransferScan, ClientError> {
        let tx = self
            .transport
            .fetch_confirmed_transaction(signature)?
            .ok_or_else(|| ClientError::NotFound(format!("transaction {signature}")))?;

        Ok(decode::extract_transfers(
            &tx.instructions,
            &tx.inner_instruction_groups,
            &tx.account_table,
            &TOKEN_PROGRAM_ID,
        ))
    }

    fn fetch_required(&self, address: &[u8; 32], what: &str) -> Result<Vec<u8>, ClientError> {
        self.transport
            .fetch_account_blob(address)?
            .ok_or_else(|| ClientError::NotFound(format!("{what} {}", format_address(address))))
    }
}
