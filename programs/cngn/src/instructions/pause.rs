use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Pause switches. Admin only; setting the current value again is rejected
/// so an operator script cannot silently believe it changed anything.
#[derive(Accounts)]
pub struct PauseMint<'info> {
    #[account(
        constraint = admin.key() == token_config.admin @ ErrorCode::InvalidAdmin,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,
}

#[derive(Accounts)]
pub struct PauseTransfer<'info> {
    #[account(
        constraint = admin.key() == token_config.admin @ ErrorCode::InvalidAdmin,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,
}

pub fn pause_mint_handler(ctx: Context<PauseMint>, pause_mint: bool) -> Result<()> {
    let token_config = &mut ctx.accounts.token_config;

    if pause_mint == token_config.mint_paused {
        return Err(ErrorCode::AlreadyPassedDesiredState.into());
    }

    token_config.mint_paused = pause_mint;

    emit!(TokenMintingPauseEvent {
        mint: token_config.mint,
        mint_paused: token_config.mint_paused,
    });

    Ok(())
}

pub fn pause_transfer_handler(ctx: Context<PauseTransfer>, pause_transfer: bool) -> Result<()> {
    let token_config = &mut ctx.accounts.token_config;

    if pause_transfer == token_config.transfer_paused {
        return Err(ErrorCode::AlreadyPassedDesiredState.into());
    }

    token_config.transfer_paused = pause_transfer;

    emit!(TokenTransferPauseEvent {
        mint: token_config.mint,
        transfer_paused: token_config.transfer_paused,
    });

    Ok(())
}
