use crate::errors::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::sysvar::instructions::load_instruction_at_checked;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

// PDA seeds. Every account below exists exactly once per mint.
pub const TOKEN_CONFIG_SEED: &[u8] = b"token-config";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint-authority";
pub const BLACK_LIST_SEED: &[u8] = b"blacklist";
pub const INTERNAL_WHITELIST_SEED: &[u8] = b"internal-whitelist";
pub const EXTERNAL_WHITELIST_SEED: &[u8] = b"external-whitelist";
pub const CAN_MINT_SEED: &[u8] = b"can-mint";
pub const CAN_FORWARD_SEED: &[u8] = b"can-forward";
pub const TRUSTED_CONTRACTS_SEED: &[u8] = b"trusted-contracts";
pub const USER_NONCE_SEED: &[u8] = b"user-nonce";
pub const TRANSFER_AUTH_SEED: &[u8] = b"transfer-auth";
pub const MULTISIG_SEED: &[u8] = b"multisig";

/**
 * Global configuration of the token.
 *
 * The admin key stored here (or an allow-listed trusted contract) is the
 * authority for every access list mutation and for the pause switches. The
 * bump field stores the PDA bump seed to avoid recalculation.
 */
#[account]
#[derive(InitSpace)]
pub struct TokenConfig {
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    pub decimals: u8,
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub mint_paused: bool,
    pub transfer_paused: bool,
    pub bump: u8,
}

impl TokenConfig {
    pub const MAX_NAME_LENGTH: usize = 32;
    pub const MAX_SYMBOL_LENGTH: usize = 10;
}

/**
 * PDA that holds the SPL mint and freeze authority. Carries no data beyond
 * its derivation inputs; the program signs mint CPIs with it.
 */
#[account]
#[derive(InitSpace)]
pub struct MintAuthority {
    pub mint: Pubkey,
    pub bump: u8,
}

/// Accounts barred from sending, receiving and minting.
#[account]
#[derive(InitSpace)]
pub struct BlackList {
    pub mint: Pubkey,
    #[max_len(100)]
    pub blacklist: Vec<Pubkey>,
    pub bump: u8,
}

impl BlackList {
    pub const MAX_BLACKLISTED: usize = 100;

    pub fn is_blacklisted(&self, address: &Pubkey) -> bool {
        self.blacklist.contains(address)
    }

    pub fn add(&mut self, address: &Pubkey) -> Result<()> {
        if self.blacklist.len() >= Self::MAX_BLACKLISTED {
            return Err(ErrorCode::TooManyBlacklisted.into());
        }

        if !self.is_blacklisted(address) {
            self.blacklist.push(*address);
        }

        Ok(())
    }

    pub fn remove(&mut self, address: &Pubkey) -> Result<()> {
        if let Some(index) = self.blacklist.iter().position(|x| x == address) {
            self.blacklist.remove(index);
        }

        Ok(())
    }
}

/**
 * Custodial accounts on this ledger. A transfer whose recipient is on this
 * list and whose sender is on the external whitelist is executed as a burn
 * (the value leaves this chain).
 */
#[account]
#[derive(InitSpace)]
pub struct InternalWhiteList {
    pub mint: Pubkey,
    #[max_len(100)]
    pub whitelist: Vec<Pubkey>,
    pub bump: u8,
}

impl InternalWhiteList {
    pub const MAX_WHITELISTED: usize = 100;

    pub fn is_whitelisted(&self, address: &Pubkey) -> bool {
        self.whitelist.contains(address)
    }

    pub fn add(&mut self, address: &Pubkey) -> Result<()> {
        if self.whitelist.len() >= Self::MAX_WHITELISTED {
            return Err(ErrorCode::TooManyWhitelisted.into());
        }

        if !self.is_whitelisted(address) {
            self.whitelist.push(*address);
        }

        Ok(())
    }

    pub fn remove(&mut self, address: &Pubkey) -> Result<()> {
        if let Some(index) = self.whitelist.iter().position(|x| x == address) {
            self.whitelist.remove(index);
        }

        Ok(())
    }
}

/// Accounts recognized as external (off-ramp) senders for the burn rule.
#[account]
#[derive(InitSpace)]
pub struct ExternalWhiteList {
    pub mint: Pubkey,
    #[max_len(100)]
    pub whitelist: Vec<Pubkey>,
    pub bump: u8,
}

impl ExternalWhiteList {
    pub const MAX_WHITELISTED: usize = 100;

    pub fn is_whitelisted(&self, address: &Pubkey) -> bool {
        self.whitelist.contains(address)
    }

    pub fn add(&mut self, address: &Pubkey) -> Result<()> {
        if self.whitelist.len() >= Self::MAX_WHITELISTED {
            return Err(ErrorCode::TooManyWhitelisted.into());
        }

        if !self.is_whitelisted(address) {
            self.whitelist.push(*address);
        }

        Ok(())
    }

    pub fn remove(&mut self, address: &Pubkey) -> Result<()> {
        if let Some(index) = self.whitelist.iter().position(|x| x == address) {
            self.whitelist.remove(index);
        }

        Ok(())
    }
}

/**
 * One-shot mint allowances.
 *
 * `authorities` and `mint_amounts` are parallel vectors: entry i grants
 * authority i the right to mint exactly `mint_amounts[i]` once. A successful
 * mint removes the entry, so every further mint requires a fresh
 * administrative grant. This bounds what a compromised minter key can issue
 * to the amount already approved for it.
 */
#[account]
#[derive(InitSpace)]
pub struct CanMint {
    pub mint: Pubkey,
    #[max_len(100)]
    pub authorities: Vec<Pubkey>,
    #[max_len(100)]
    pub mint_amounts: Vec<u64>,
    pub bump: u8,
}

impl CanMint {
    pub const MAX_AUTHORITIES: usize = 100;

    pub fn can_mint(&self, authority: &Pubkey) -> bool {
        self.authorities.contains(authority)
    }

    pub fn add_authority(&mut self, authority: &Pubkey) -> Result<()> {
        if self.authorities.len() >= Self::MAX_AUTHORITIES {
            return Err(ErrorCode::TooManyAuthorities.into());
        }

        if !self.can_mint(authority) {
            self.authorities.push(*authority);
            self.mint_amounts.push(0);
        }

        Ok(())
    }

    pub fn remove_authority(&mut self, authority: &Pubkey) -> Result<()> {
        if let Some(index) = self.authorities.iter().position(|x| x == authority) {
            self.authorities.remove(index);
            self.mint_amounts.remove(index);
            Ok(())
        } else {
            Err(ErrorCode::NotMinter.into())
        }
    }

    pub fn set_mint_amount(&mut self, authority: &Pubkey, amount: u64) -> Result<()> {
        if let Some(index) = self.authorities.iter().position(|x| x == authority) {
            self.mint_amounts[index] = amount;
            Ok(())
        } else {
            Err(ErrorCode::NotMinter.into())
        }
    }

    pub fn get_mint_amount(&self, authority: &Pubkey) -> Result<u64> {
        if let Some(index) = self.authorities.iter().position(|x| x == authority) {
            Ok(self.mint_amounts[index])
        } else {
            Err(ErrorCode::NotMinter.into())
        }
    }
}

/**
 * Relayers allowed to submit pre-signed transfers on behalf of users.
 * `is_executed` is a reentrancy latch held for the duration of a forwarded
 * execution.
 */
#[account]
#[derive(InitSpace)]
pub struct CanForward {
    pub mint: Pubkey,
    #[max_len(100)]
    pub forwarders: Vec<Pubkey>,
    pub bump: u8,
    pub is_executed: bool,
}

impl CanForward {
    pub const MAX_FORWARDERS: usize = 100;

    pub fn is_trusted_forwarder(&self, forwarder: &Pubkey) -> bool {
        self.forwarders.contains(forwarder)
    }

    pub fn lock(&mut self) {
        self.is_executed = true;
    }

    pub fn unlock(&mut self) {
        self.is_executed = false;
    }

    pub fn add(&mut self, forwarder: &Pubkey) -> Result<()> {
        if self.forwarders.len() >= Self::MAX_FORWARDERS {
            return Err(ErrorCode::TooManyForwarders.into());
        }

        if !self.is_trusted_forwarder(forwarder) {
            self.forwarders.push(*forwarder);
        }

        Ok(())
    }

    pub fn remove(&mut self, forwarder: &Pubkey) -> Result<()> {
        if let Some(index) = self.forwarders.iter().position(|x| x == forwarder) {
            self.forwarders.remove(index);
        }

        Ok(())
    }
}

/// Contracts allowed to drive access list mutations alongside the admin key.
#[account]
#[derive(InitSpace)]
pub struct TrustedContracts {
    pub mint: Pubkey,
    #[max_len(50)]
    pub contracts: Vec<Pubkey>,
    pub bump: u8,
}

impl TrustedContracts {
    pub const MAX_CONTRACTS: usize = 50;

    pub fn is_trusted_contract(&self, contract: &Pubkey) -> bool {
        self.contracts.contains(contract)
    }

    pub fn add(&mut self, contract: &Pubkey) -> Result<()> {
        if self.contracts.len() >= Self::MAX_CONTRACTS {
            return Err(ErrorCode::TooManyContracts.into());
        }

        if !self.is_trusted_contract(contract) {
            self.contracts.push(*contract);
        }

        Ok(())
    }

    pub fn remove(&mut self, contract: &Pubkey) -> Result<()> {
        if let Some(index) = self.contracts.iter().position(|x| x == contract) {
            self.contracts.remove(index);
        }

        Ok(())
    }
}

/**
 * Per-user replay guard for forwarded transfers.
 *
 * Created lazily on a user's first forwarded execution (implicit value 0).
 * The nonce only ever moves forward, by exactly 1, when a forwarded transfer
 * for this sender succeeds; a rejected transaction rolls the increment back
 * with everything else.
 */
#[account]
#[derive(InitSpace)]
pub struct UserNonce {
    pub sender: Pubkey,
    pub nonce: u64,
    pub bump: u8,
}

impl UserNonce {
    /// Succeeds iff `claimed` equals the current value, then advances it.
    pub fn consume(&mut self, claimed: u64) -> Result<()> {
        require!(claimed == self.nonce, ErrorCode::InvalidNonce);
        self.nonce += 1;
        Ok(())
    }
}

/**
 * k-of-n owner set for administrative approval.
 *
 * Approvals are Ed25519 signatures over a deterministic operation digest,
 * carried as verification instructions in the approving transaction. The
 * nonce is part of every digest and is consumed on success, so a collected
 * signature set authorizes exactly one execution.
 */
#[account]
#[derive(InitSpace)]
pub struct Multisig {
    #[max_len(10)]
    pub owners: Vec<Pubkey>,
    pub threshold: u8,
    pub nonce: u64,
    pub bump: u8,
}

impl Multisig {
    pub const MAX_OWNERS: usize = 10;

    pub fn is_owner(&self, key: &Pubkey) -> bool {
        self.owners.contains(key)
    }

    pub fn assert_valid_threshold(owners_len: usize, threshold: u8) -> Result<()> {
        require!(threshold > 0, ErrorCode::InvalidThreshold);
        require!(threshold as usize <= owners_len, ErrorCode::InvalidThreshold);
        Ok(())
    }

    pub fn rotate_owners(&mut self, new_owners: Vec<Pubkey>, new_threshold: u8) -> Result<()> {
        require!(new_owners.len() <= Self::MAX_OWNERS, ErrorCode::TooManyOwners);

        Self::assert_valid_threshold(new_owners.len(), new_threshold)?;

        self.owners = new_owners;
        self.threshold = new_threshold;

        Ok(())
    }

    /**
     * Count distinct owners among `attestations` that signed exactly
     * `expected_message`. Signatures from non-owners, over other messages,
     * or duplicated by the same owner do not count.
     */
    pub fn count_approvals(
        &self,
        attestations: &[(Pubkey, Vec<u8>)],
        expected_message: &[u8],
    ) -> u8 {
        let mut seen = BTreeSet::<Pubkey>::new();
        let mut approvals = 0u8;

        for (signer, message) in attestations {
            if message.as_slice() != expected_message {
                continue;
            }
            if !self.is_owner(signer) {
                continue;
            }
            if seen.insert(*signer) {
                approvals += 1;
                if approvals >= self.threshold {
                    break;
                }
            }
        }

        approvals
    }
}

/**
 * Collect the Ed25519 verification instructions of the current transaction
 * and require at least `threshold` distinct owner approvals over
 * `expected_message`. Consumes the multisig nonce on success so the
 * signature set cannot be replayed.
 */
pub fn validate_multisig_authorization(
    multisig: &mut Multisig,
    instructions: &AccountInfo,
    expected_message: &[u8],
) -> Result<()> {
    const MAX_INSTRUCTIONS_TO_CHECK: usize = 20;

    let mut attestations = Vec::new();
    for idx in 0..MAX_INSTRUCTIONS_TO_CHECK {
        let ix = match load_instruction_at_checked(idx, instructions) {
            Ok(ix) => ix,
            Err(_) => break,
        };

        if ix.program_id != ed25519_program::ID {
            continue;
        }

        attestations.push(crate::ed25519::parse_single_signature(&ix.data)?);
    }

    require!(
        multisig.count_approvals(&attestations, expected_message) >= multisig.threshold,
        ErrorCode::NotEnoughMultisigSigners
    );

    multisig.nonce += 1;

    Ok(())
}

/// Digest multisig owners sign to approve an owner set rotation.
pub fn build_update_multisig_digest(
    multisig: &Pubkey,
    new_owners: &[Pubkey],
    new_threshold: u8,
    nonce: u64,
) -> Vec<u8> {
    let mut hasher = Sha256::new();

    hasher.update(b"UPDATE_MULTISIG");
    hasher.update(multisig.as_ref());

    for owner in new_owners {
        hasher.update(owner.as_ref());
    }

    hasher.update([new_threshold]);
    hasher.update(nonce.to_le_bytes());

    hasher.finalize().to_vec()
}
