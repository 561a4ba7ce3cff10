use anchor_lang::prelude::*;

/**
 * Error codes for the cNGN token program.
 * Every rejection is terminal for the request that triggered it; callers may
 * retry with corrected inputs (and, for forwarded transfers, a fresh nonce).
 */
#[error_code]
pub enum ErrorCode {
    #[msg("Token transfers are currently paused")]
    TransfersPaused,

    #[msg("Minting is paused")]
    MintingPaused,

    #[msg("Invalid admin")]
    InvalidAdmin,

    #[msg("Invalid owner")]
    InvalidOwner,

    #[msg("Mint mismatch")]
    MintMismatch,

    #[msg("User is blacklisted")]
    UserBlacklisted,

    #[msg("Signer is blacklisted")]
    SignerBlacklisted,

    #[msg("Receiver is blacklisted")]
    ReceiverBlacklisted,

    #[msg("Minter not authorized to sign")]
    MinterNotAuthorized,

    #[msg("Attempting to mint more than allowed")]
    InvalidMintAmount,

    #[msg("User is not a minter")]
    NotMinter,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Unauthorized forwarder")]
    UnauthorizedForwarder,

    #[msg("Insufficient funds for transfer")]
    InsufficientFunds,

    #[msg("Already set to this state")]
    AlreadyPassedDesiredState,

    #[msg("Too many authorities")]
    TooManyAuthorities,

    #[msg("Too many blacklisted addresses")]
    TooManyBlacklisted,

    #[msg("Too many whitelisted addresses")]
    TooManyWhitelisted,

    #[msg("Too many forwarders")]
    TooManyForwarders,

    #[msg("Too many trusted contracts")]
    TooManyContracts,

    #[msg("Token name too long")]
    NameTooLong,

    #[msg("Token symbol too long")]
    SymbolTooLong,

    // Forwarded execution
    #[msg("Invalid forwarded message format")]
    InvalidInstructionFormat,

    #[msg("Missing Ed25519 instruction")]
    MissingEd25519Instruction,

    #[msg("Invalid Ed25519 instruction format")]
    InvalidEd25519Instruction,

    #[msg("Invalid public key in Ed25519 instruction")]
    InvalidPublicKey,

    #[msg("Invalid message in Ed25519 instruction")]
    InvalidMessage,

    #[msg("Invalid signature")]
    InvalidSignature,

    #[msg("Invalid nonce: possible replay attack")]
    InvalidNonce,

    #[msg("Reentrancy detected")]
    ReentrancyDetected,

    // Multisig
    #[msg("Invalid threshold")]
    InvalidThreshold,

    #[msg("Too many owners")]
    TooManyOwners,

    #[msg("No owners provided")]
    NoOwnersProvided,

    #[msg("Duplicate owners")]
    DuplicateOwners,

    #[msg("Not enough multisig signers")]
    NotEnoughMultisigSigners,
}
