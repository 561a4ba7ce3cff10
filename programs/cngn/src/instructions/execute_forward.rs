use crate::ed25519;
use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::sysvar::instructions::{
    self as instructions_sysvar, load_current_index_checked, load_instruction_at_checked,
};
use anchor_spl::token_interface::{self, Burn, Mint, TokenAccount, TokenInterface, TransferChecked};

/**
 * Execute a transfer pre-signed by the token owner and submitted by an
 * allow-listed forwarder (relayer), who pays the transaction costs.
 *
 * The owner signs the canonical message `transfer:<amount>:<nonce>` off
 * chain. The relayer submits a transaction containing an Ed25519
 * verification instruction over that message immediately followed by this
 * instruction. The runtime's Ed25519 precompile proves the signature is
 * valid; this handler proves the verified signature belongs to this exact
 * request:
 *
 * 1. The verification instruction must sit at precisely the preceding
 *    instruction index. Searching the transaction for a matching
 *    instruction would let a signature verified for one forward be bound to
 *    another in the same transaction.
 * 2. Its attested pubkey must be the sender, and its attested message and
 *    signature must byte-match the instruction arguments.
 * 3. The nonce embedded in the message must equal the sender's current
 *    nonce, which is consumed on success. The nonce account is created on
 *    the sender's first forward, with the relayer funding the rent.
 * 4. The forwarder must be allow-listed, neither party blacklisted, the
 *    balance sufficient, and transfers not paused.
 *
 * A failure at any step aborts the transaction, rolling back the nonce
 * consumption along with everything else; a rejected request consumes
 * nothing.
 *
 * The transfer itself is signed by the transfer-auth PDA, which the owner
 * must have approved as delegate over the source token account. Transfers
 * from externally whitelisted senders to internally whitelisted recipients
 * are executed as burns (redemption), as in the direct transfer path.
 */
#[derive(Accounts)]
pub struct ExecuteForward<'info> {
    /// Relayer submitting the pre-signed request; pays fees and nonce rent
    #[account(mut)]
    pub forwarder: Signer<'info>,

    /// CHECK: the sending principal. Not a transaction signer; ownership is
    /// proven by the Ed25519 signature verified against the preceding
    /// instruction.
    pub sender: UncheckedAccount<'info>,

    #[account(mut)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = from.owner == sender.key() @ ErrorCode::InvalidOwner,
        constraint = from.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub from: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = to.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub to: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [BLACK_LIST_SEED, mint.key().as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        mut,
        seeds = [CAN_FORWARD_SEED, mint.key().as_ref()],
        bump = can_forward.bump,
    )]
    pub can_forward: Account<'info, CanForward>,

    /// Replay guard, created on the sender's first forwarded transfer
    #[account(
        init_if_needed,
        payer = forwarder,
        space = UserNonce::DISCRIMINATOR.len() + UserNonce::INIT_SPACE,
        seeds = [USER_NONCE_SEED, sender.key().as_ref(), mint.key().as_ref()],
        bump,
    )]
    pub user_nonce: Account<'info, UserNonce>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, mint.key().as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        seeds = [INTERNAL_WHITELIST_SEED, mint.key().as_ref()],
        bump = internal_whitelist.bump,
    )]
    pub internal_whitelist: Account<'info, InternalWhiteList>,

    #[account(
        seeds = [EXTERNAL_WHITELIST_SEED, mint.key().as_ref()],
        bump = external_whitelist.bump,
    )]
    pub external_whitelist: Account<'info, ExternalWhiteList>,

    /// CHECK: data-less PDA approved by the owner as SPL delegate over
    /// `from`; used only to sign the outgoing token CPI
    #[account(
        seeds = [TRANSFER_AUTH_SEED, from.key().as_ref()],
        bump,
    )]
    pub transfer_auth: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,

    /// CHECK: instructions sysvar, verified by address
    #[account(address = instructions_sysvar::ID)]
    pub instruction_sysvar: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<ExecuteForward>,
    message: Vec<u8>,
    signature: Vec<u8>,
    amount: u64,
) -> Result<()> {
    require!(
        signature.len() == ed25519::SIGNATURE_LEN,
        ErrorCode::InvalidSignature
    );

    require!(
        !ctx.accounts.can_forward.is_executed,
        ErrorCode::ReentrancyDetected
    );
    ctx.accounts.can_forward.lock();

    // The verification instruction must be the immediately preceding one.
    let current_index = load_current_index_checked(&ctx.accounts.instruction_sysvar)?;
    require!(current_index > 0, ErrorCode::MissingEd25519Instruction);

    let verification_ix = load_instruction_at_checked(
        (current_index - 1) as usize,
        &ctx.accounts.instruction_sysvar,
    )?;
    require!(
        verification_ix.program_id == ed25519_program::ID,
        ErrorCode::MissingEd25519Instruction
    );

    ed25519::validate_single_signature(
        &verification_ix.data,
        &ctx.accounts.sender.key(),
        &message,
        &signature,
    )?;

    let message_text =
        core::str::from_utf8(&message).map_err(|_| ErrorCode::InvalidInstructionFormat)?;
    let (message_amount, claimed_nonce) = parse_forward_message(message_text)?;
    require!(message_amount == amount, ErrorCode::InvalidInstructionFormat);

    let sender = ctx.accounts.sender.key();

    let user_nonce = &mut ctx.accounts.user_nonce;
    if user_nonce.sender == Pubkey::default() {
        user_nonce.sender = sender;
        user_nonce.bump = ctx.bumps.user_nonce;
    }
    user_nonce.consume(claimed_nonce)?;

    require!(
        ctx.accounts
            .can_forward
            .is_trusted_forwarder(&ctx.accounts.forwarder.key()),
        ErrorCode::UnauthorizedForwarder
    );

    let recipient = ctx.accounts.to.owner;
    require!(
        !ctx.accounts.blacklist.is_blacklisted(&sender)
            && !ctx.accounts.blacklist.is_blacklisted(&recipient),
        ErrorCode::UserBlacklisted
    );

    require!(
        ctx.accounts.from.amount >= amount,
        ErrorCode::InsufficientFunds
    );

    require!(
        !ctx.accounts.token_config.transfer_paused,
        ErrorCode::TransfersPaused
    );

    let from_key = ctx.accounts.from.key();
    let seeds = &[
        TRANSFER_AUTH_SEED,
        from_key.as_ref(),
        &[ctx.bumps.transfer_auth],
    ];
    let signer_seeds = &[&seeds[..]];

    if ctx.accounts.external_whitelist.is_whitelisted(&sender)
        && ctx.accounts.internal_whitelist.is_whitelisted(&recipient)
    {
        let burn_cpi_accounts = Burn {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.from.to_account_info(),
            authority: ctx.accounts.transfer_auth.to_account_info(),
        };

        let burn_cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            burn_cpi_accounts,
            signer_seeds,
        );

        token_interface::burn(burn_cpi_ctx, amount)?;

        emit!(BridgeBurnEvent {
            from_account: ctx.accounts.from.key(),
            sender,
            recipient,
            amount,
            timestamp: Clock::get()?.unix_timestamp,
            source_chain: "solana".to_string(),
        });

        msg!(
            "Bridge burn completed: {} tokens burned for cross-chain transfer",
            amount
        );
    } else {
        let transfer_cpi_accounts = TransferChecked {
            from: ctx.accounts.from.to_account_info(),
            to: ctx.accounts.to.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            authority: ctx.accounts.transfer_auth.to_account_info(),
        };

        let transfer_cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_cpi_accounts,
            signer_seeds,
        );

        token_interface::transfer_checked(transfer_cpi_ctx, amount, ctx.accounts.mint.decimals)?;

        emit!(TokensTransferredEvent {
            from: ctx.accounts.from.key(),
            to: ctx.accounts.to.key(),
            amount,
        });
    }

    ctx.accounts.can_forward.unlock();

    emit!(ForwardedEvent {
        message: message_text.to_string(),
        sender,
        recipient,
        amount,
        nonce: claimed_nonce,
        forwarder: ctx.accounts.forwarder.key(),
    });

    Ok(())
}

/// Parse the canonical forwarded message `transfer:<amount>:<nonce>`.
fn parse_forward_message(text: &str) -> Result<(u64, u64)> {
    let mut parts = text.split(':');
    let (action, amount, nonce) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(action), Some(amount), Some(nonce), None) => (action, amount, nonce),
        _ => return Err(ErrorCode::InvalidInstructionFormat.into()),
    };

    require!(action == "transfer", ErrorCode::InvalidInstructionFormat);

    let amount = amount
        .parse::<u64>()
        .map_err(|_| ErrorCode::InvalidInstructionFormat)?;
    let nonce = nonce
        .parse::<u64>()
        .map_err(|_| ErrorCode::InvalidInstructionFormat)?;

    Ok((amount, nonce))
}
