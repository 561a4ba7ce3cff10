use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};

/**
 * Mint tokens against a one-shot allowance.
 *
 * The signer must hold a mint authorization for exactly `amount`; the grant
 * is consumed by the mint, so a compromised minter key can never issue more
 * than what was last approved for it.
 *
 * Security Checks:
 * - Minting must not be paused
 * - Neither the signer nor the receiving account owner may be blacklisted
 * - The signer must be on the allowance list and `amount` must equal the
 *   granted amount exactly
 *
 * Common Errors:
 * - MinterNotAuthorized: signer has no (remaining) grant
 * - InvalidMintAmount: amount differs from the granted amount
 */
#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, mint.key().as_ref()],
        bump = token_config.bump,
        constraint = !token_config.mint_paused @ ErrorCode::MintingPaused,
    )]
    pub token_config: Account<'info, TokenConfig>,

    /// PDA holding the SPL mint authority; signs the mint CPI
    #[account(
        seeds = [MINT_AUTHORITY_SEED, mint.key().as_ref()],
        bump = mint_authority.bump,
    )]
    pub mint_authority: Account<'info, MintAuthority>,

    #[account(
        mut,
        constraint = mint.key() == token_config.mint @ ErrorCode::MintMismatch,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Token account receiving the minted tokens
    #[account(
        mut,
        constraint = token_account.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [BLACK_LIST_SEED, mint.key().as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        mut,
        seeds = [CAN_MINT_SEED, mint.key().as_ref()],
        bump = can_mint.bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
    let signer = ctx.accounts.authority.key();
    let mint_to = ctx.accounts.token_account.owner;

    if ctx.accounts.blacklist.is_blacklisted(&signer) {
        return Err(ErrorCode::SignerBlacklisted.into());
    }

    if ctx.accounts.blacklist.is_blacklisted(&mint_to) {
        return Err(ErrorCode::ReceiverBlacklisted.into());
    }

    if !ctx.accounts.can_mint.can_mint(&signer) {
        return Err(ErrorCode::MinterNotAuthorized.into());
    }

    // The grant is for an exact quantity, not an upper bound.
    let allowed_amount = ctx.accounts.can_mint.get_mint_amount(&signer)?;
    if amount != allowed_amount {
        return Err(ErrorCode::InvalidMintAmount.into());
    }

    let mint_key = ctx.accounts.mint.key();
    let seeds = &[
        MINT_AUTHORITY_SEED,
        mint_key.as_ref(),
        &[ctx.accounts.mint_authority.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = MintTo {
        mint: ctx.accounts.mint.to_account_info(),
        to: ctx.accounts.token_account.to_account_info(),
        authority: ctx.accounts.mint_authority.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );

    token_interface::mint_to(cpi_ctx, amount)?;

    emit!(TokensMintedEvent {
        mint: ctx.accounts.mint.key(),
        to: ctx.accounts.token_account.key(),
        amount,
    });

    // One-shot: the authorization is spent by the mint it approved.
    ctx.accounts.can_mint.remove_authority(&signer)?;

    emit!(CanMintRemovedEvent {
        mint: ctx.accounts.token_config.mint,
        authority: signer,
    });

    Ok(())
}
