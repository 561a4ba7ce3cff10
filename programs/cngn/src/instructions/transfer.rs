use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, Mint, TokenAccount, TokenInterface, TransferChecked};

/**
 * Owner-signed transfer with compliance gating.
 *
 * Security Checks:
 * - Transfers must not be paused
 * - The signer must own the source token account
 * - Neither sender nor recipient may be blacklisted
 * - The source account must hold at least `amount`
 *
 * When the sender is externally whitelisted and the recipient is internally
 * whitelisted the transfer is a redemption: the tokens are burned from the
 * sender instead of moved, and a BridgeBurnEvent is emitted for the bridge
 * indexer. The recipient's balance does not change in that case.
 */
#[derive(Accounts)]
pub struct TransferTokens<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, from.mint.as_ref()],
        bump = token_config.bump,
        constraint = !token_config.transfer_paused @ ErrorCode::TransfersPaused,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        constraint = from.owner == owner.key() @ ErrorCode::InvalidOwner,
    )]
    pub from: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = to.mint == from.mint @ ErrorCode::MintMismatch,
    )]
    pub to: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = from.mint,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [BLACK_LIST_SEED, from.mint.as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        seeds = [INTERNAL_WHITELIST_SEED, from.mint.as_ref()],
        bump = internal_whitelist.bump,
    )]
    pub internal_whitelist: Account<'info, InternalWhiteList>,

    #[account(
        seeds = [EXTERNAL_WHITELIST_SEED, from.mint.as_ref()],
        bump = external_whitelist.bump,
    )]
    pub external_whitelist: Account<'info, ExternalWhiteList>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
    let sender = ctx.accounts.owner.key();
    let recipient = ctx.accounts.to.owner;

    if ctx.accounts.from.amount < amount {
        return Err(ErrorCode::InsufficientFunds.into());
    }

    // Blacklist wins over any whitelist membership.
    if ctx.accounts.blacklist.is_blacklisted(&sender)
        || ctx.accounts.blacklist.is_blacklisted(&recipient)
    {
        return Err(ErrorCode::UserBlacklisted.into());
    }

    if ctx.accounts.external_whitelist.is_whitelisted(&sender)
        && ctx.accounts.internal_whitelist.is_whitelisted(&recipient)
    {
        // Redemption path: the value leaves this ledger, so the tokens are
        // destroyed rather than credited to the custodial recipient.
        let burn_cpi_accounts = Burn {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.from.to_account_info(),
            authority: ctx.accounts.owner.to_account_info(),
        };

        let burn_cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            burn_cpi_accounts,
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
            authority: ctx.accounts.owner.to_account_info(),
        };

        let transfer_cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            transfer_cpi_accounts,
        );

        token_interface::transfer_checked(transfer_cpi_ctx, amount, ctx.accounts.mint.decimals)?;

        emit!(TokensTransferredEvent {
            from: ctx.accounts.from.key(),
            to: ctx.accounts.to.key(),
            amount,
        });
    }

    Ok(())
}
