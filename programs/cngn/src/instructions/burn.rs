use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, Mint, TokenAccount, TokenInterface};

/// Burn tokens from the signer's own account.
#[derive(Accounts)]
pub struct BurnTokens<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, mint.key().as_ref()],
        bump = token_config.bump,
        constraint = !token_config.transfer_paused @ ErrorCode::TransfersPaused,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(mut)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = burn_from.owner == owner.key() @ ErrorCode::InvalidOwner,
        constraint = burn_from.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub burn_from: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
    let cpi_accounts = Burn {
        mint: ctx.accounts.mint.to_account_info(),
        from: ctx.accounts.burn_from.to_account_info(),
        authority: ctx.accounts.owner.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);

    token_interface::burn(cpi_ctx, amount)?;

    emit!(TokensBurnedEvent {
        from: ctx.accounts.burn_from.key(),
        owner: ctx.accounts.owner.key(),
        amount,
    });

    Ok(())
}
