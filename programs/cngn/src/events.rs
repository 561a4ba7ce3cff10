use anchor_lang::prelude::*;

/**
 * Events emitted by the cNGN token program.
 *
 * Every state transition emits exactly one event from this module, inside the
 * same atomic transaction that performed the transition. Off-chain consumers
 * (indexers, bridge watchers) subscribe to these rather than polling account
 * state.
 */

#[event]
pub struct TokenInitializedEvent {
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[event]
pub struct AccessListsInitializedEvent {
    pub mint: Pubkey,
    pub initializer: Pubkey,
}

#[event]
pub struct WhitelistsInitializedEvent {
    pub mint: Pubkey,
    pub initializer: Pubkey,
}

#[event]
pub struct TokensMintedEvent {
    pub mint: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TokensBurnedEvent {
    pub from: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TokensTransferredEvent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

/**
 * Emitted instead of TokensTransferredEvent when a transfer from an
 * externally whitelisted sender to an internally whitelisted recipient is
 * executed as a burn. Bridge indexers use this to release funds on the
 * destination ledger.
 */
#[event]
pub struct BridgeBurnEvent {
    pub from_account: Pubkey,
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
    pub source_chain: String,
}

/**
 * Emitted after every successful forwarded execution, carrying the exact
 * message that was verified and the nonce it consumed.
 */
#[event]
pub struct ForwardedEvent {
    pub message: String,
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub nonce: u64,
    pub forwarder: Pubkey,
}

#[event]
pub struct TokenMintingPauseEvent {
    pub mint: Pubkey,
    pub mint_paused: bool,
}

#[event]
pub struct TokenTransferPauseEvent {
    pub mint: Pubkey,
    pub transfer_paused: bool,
}

#[event]
pub struct AdminChangedEvent {
    pub mint: Pubkey,
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct CanMintAddedEvent {
    pub mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct CanMintRemovedEvent {
    pub mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct MintAmountSetEvent {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
}

#[event]
pub struct MintAmountRemovedEvent {
    pub mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct CanForwardAddedEvent {
    pub mint: Pubkey,
    pub forwarder: Pubkey,
}

#[event]
pub struct CanForwardRemovedEvent {
    pub mint: Pubkey,
    pub forwarder: Pubkey,
}

#[event]
pub struct BlacklistedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct BlacklistRemovedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct InternalUserWhitelistedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct InternalUserRemovedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct ExternalUserWhitelistedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct ExternalUserRemovedEvent {
    pub mint: Pubkey,
    pub user: Pubkey,
}

#[event]
pub struct TrustedContractAddedEvent {
    pub mint: Pubkey,
    pub contract: Pubkey,
}

#[event]
pub struct TrustedContractRemovedEvent {
    pub mint: Pubkey,
    pub contract: Pubkey,
}

#[event]
pub struct MultisigInitializedEvent {
    pub multisig: Pubkey,
    pub owners: Vec<Pubkey>,
    pub threshold: u8,
}

#[event]
pub struct MultisigUpdatedEvent {
    pub multisig: Pubkey,
    pub old_owners: Vec<Pubkey>,
    pub new_owners: Vec<Pubkey>,
    pub old_threshold: u8,
    pub new_threshold: u8,
}
