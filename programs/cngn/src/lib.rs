/**
 * cNGN Token Program
 *
 * A Solana program implementing a compliance-gated stablecoin. Every token
 * movement is checked against a set of program-owned access lists before the
 * SPL token program is invoked:
 * - Blacklisted accounts can neither send, receive, nor mint
 * - Minting requires a one-shot, admin-granted exact allowance
 * - Relayers on the forwarder allow-list may submit transfers pre-signed by
 *   the token owner (gas-less transfers with per-user replay protection)
 * - Transfers from externally whitelisted accounts to internally whitelisted
 *   accounts are burned instead of moved (cross-chain redemption off-ramp)
 *
 * Security Model:
 * - The token admin (or an allow-listed trusted contract) maintains the
 *   access lists and mint allowances
 * - Forwarded transfers are authorized by an Ed25519 signature of the token
 *   owner, carried in the instruction immediately preceding the forward and
 *   bound to a strictly increasing per-user nonce
 * - Admin authority can be rotated to a k-of-n multisig whose approvals are
 *   accumulated Ed25519 signatures over a deterministic operation digest
 */
pub mod ed25519;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use instructions::*;
#[cfg(not(feature = "no-entrypoint"))]
use {solana_security_txt::security_txt};

// Program ID for the cNGN token program
declare_id!("AyGG5hNXuyeojPafSabxb6CnhNdG8hbwU5Xza8o3UKwE");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "cNGN",
    project_url: "https://cngn.co",
    contacts: "email:security@cngn.co",
    policy: "https://cngn.co/.well-known/security-policy",
    preferred_languages: "en"
}

#[program]
pub mod cngn {
    use super::*;

    /**
     * Initialize the token: creates the SPL mint (with the program's
     * mint-authority PDA as mint and freeze authority), the token config and
     * the mint allowance list.
     *
     * @param ctx Context containing required accounts
     * @param name Token name recorded in the config
     * @param symbol Token symbol recorded in the config
     * @param decimals Decimals of the newly created mint
     */
    pub fn initialize(
        ctx: Context<Initialize>,
        name: String,
        symbol: String,
        decimals: u8,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, name, symbol, decimals)
    }

    /**
     * Second initialization stage: creates the blacklist, forwarder
     * allow-list and trusted contract list. Split from `initialize` to keep
     * the account set (and stack usage) of each instruction bounded.
     */
    pub fn initialize_access_lists(ctx: Context<InitializeAccessLists>) -> Result<()> {
        instructions::initialize::access_lists_handler(ctx)
    }

    /**
     * Third initialization stage: creates the internal and external
     * whitelists used by the bridge-burn transfer rule.
     */
    pub fn initialize_whitelists(ctx: Context<InitializeWhitelists>) -> Result<()> {
        instructions::initialize::whitelists_handler(ctx)
    }

    /**
     * Mint tokens against a previously granted one-shot allowance.
     * The signer must be an authorized minter and `amount` must equal the
     * granted allowance exactly; the authorization is consumed by the mint.
     */
    pub fn mint(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        instructions::mint::handler(ctx, amount)
    }

    /**
     * Transfer tokens out of the signer's own token account, subject to the
     * blacklist and pause gates. External-to-internal whitelisted transfers
     * burn the tokens instead (redemption).
     */
    pub fn transfer(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
        instructions::transfer::handler(ctx, amount)
    }

    /**
     * Burn tokens from the signer's own token account.
     */
    pub fn burn(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
        instructions::burn::handler(ctx, amount)
    }

    /**
     * Execute a transfer pre-signed by the token owner and submitted by an
     * allow-listed forwarder. The owner's Ed25519 signature over the
     * canonical message `transfer:<amount>:<nonce>` must be carried in the
     * instruction immediately preceding this one.
     */
    pub fn execute_forward(
        ctx: Context<ExecuteForward>,
        message: Vec<u8>,
        signature: Vec<u8>,
        amount: u64,
    ) -> Result<()> {
        instructions::execute_forward::handler(ctx, message, signature, amount)
    }

    pub fn pause_minting(ctx: Context<PauseMint>, pause_mint: bool) -> Result<()> {
        instructions::pause::pause_mint_handler(ctx, pause_mint)
    }

    pub fn pause_transfers(ctx: Context<PauseTransfer>, pause_transfer: bool) -> Result<()> {
        instructions::pause::pause_transfer_handler(ctx, pause_transfer)
    }

    pub fn add_can_mint(ctx: Context<AddCanMint>, user: Pubkey) -> Result<()> {
        instructions::admin::add_can_mint_handler(ctx, user)
    }

    pub fn remove_can_mint(ctx: Context<RemoveCanMint>, user: Pubkey) -> Result<()> {
        instructions::admin::remove_can_mint_handler(ctx, user)
    }

    pub fn set_mint_amount(ctx: Context<SetMintAmount>, user: Pubkey, amount: u64) -> Result<()> {
        instructions::admin::set_mint_amount_handler(ctx, user, amount)
    }

    pub fn remove_mint_amount(ctx: Context<RemoveMintAmount>, user: Pubkey) -> Result<()> {
        instructions::admin::remove_mint_amount_handler(ctx, user)
    }

    pub fn add_can_forward(ctx: Context<AddCanForward>, forwarder: Pubkey) -> Result<()> {
        instructions::admin::add_can_forward_handler(ctx, forwarder)
    }

    pub fn remove_can_forward(ctx: Context<RemoveCanForward>, forwarder: Pubkey) -> Result<()> {
        instructions::admin::remove_can_forward_handler(ctx, forwarder)
    }

    pub fn add_blacklist(ctx: Context<AddBlackList>, user: Pubkey) -> Result<()> {
        instructions::admin::add_blacklist_handler(ctx, user)
    }

    pub fn remove_blacklist(ctx: Context<RemoveBlackList>, user: Pubkey) -> Result<()> {
        instructions::admin::remove_blacklist_handler(ctx, user)
    }

    pub fn add_internal_whitelist(
        ctx: Context<UpdateInternalWhitelist>,
        user: Pubkey,
    ) -> Result<()> {
        instructions::admin::add_internal_whitelist_handler(ctx, user)
    }

    pub fn remove_internal_whitelist(
        ctx: Context<UpdateInternalWhitelist>,
        user: Pubkey,
    ) -> Result<()> {
        instructions::admin::remove_internal_whitelist_handler(ctx, user)
    }

    pub fn add_external_whitelist(
        ctx: Context<UpdateExternalWhitelist>,
        user: Pubkey,
    ) -> Result<()> {
        instructions::admin::add_external_whitelist_handler(ctx, user)
    }

    pub fn remove_external_whitelist(
        ctx: Context<UpdateExternalWhitelist>,
        user: Pubkey,
    ) -> Result<()> {
        instructions::admin::remove_external_whitelist_handler(ctx, user)
    }

    pub fn add_trusted_contract(ctx: Context<AddTrustedContract>, contract: Pubkey) -> Result<()> {
        instructions::admin::add_trusted_contract_handler(ctx, contract)
    }

    pub fn remove_trusted_contract(
        ctx: Context<RemoveTrustedContract>,
        contract: Pubkey,
    ) -> Result<()> {
        instructions::admin::remove_trusted_contract_handler(ctx, contract)
    }

    /**
     * Hand admin authority to a new key. Both the current and the new admin
     * must sign, so authority cannot be transferred to an unreachable key.
     */
    pub fn update_admin(ctx: Context<UpdateAdmin>) -> Result<()> {
        instructions::admin::update_admin_handler(ctx)
    }

    pub fn initialize_multisig(
        ctx: Context<InitializeMultisig>,
        owners: Vec<Pubkey>,
        threshold: u8,
    ) -> Result<()> {
        instructions::multisig::initialize_handler(ctx, owners, threshold)
    }

    /**
     * Rotate the multisig owner set. Requires `threshold` distinct owner
     * signatures over the rotation digest, carried as Ed25519 verification
     * instructions in the same transaction.
     */
    pub fn update_multisig(
        ctx: Context<UpdateMultisig>,
        new_owners: Vec<Pubkey>,
        new_threshold: u8,
    ) -> Result<()> {
        instructions::multisig::update_handler(ctx, new_owners, new_threshold)
    }
}
