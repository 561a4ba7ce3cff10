use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Access list administration.
 *
 * Every mutation here requires the signer to be the token admin or an
 * allow-listed trusted contract. Additions are idempotent (re-adding a
 * present entry is a no-op and emits no event); removals of absent entries
 * are no-ops except where noted.
 */

#[derive(Accounts)]
pub struct AddCanMint<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        seeds = [BLACK_LIST_SEED, token_config.mint.as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        mut,
        seeds = [CAN_MINT_SEED, token_config.mint.as_ref()],
        bump = can_mint.bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_can_mint_handler(ctx: Context<AddCanMint>, user: Pubkey) -> Result<()> {
    let blacklist = &ctx.accounts.blacklist;
    let can_mint = &mut ctx.accounts.can_mint;

    // Blacklisted accounts cannot be granted mint rights.
    if blacklist.is_blacklisted(&user) {
        return Err(ErrorCode::UserBlacklisted.into());
    }

    if !can_mint.can_mint(&user) {
        can_mint.add_authority(&user)?;

        emit!(CanMintAddedEvent {
            mint: ctx.accounts.token_config.mint,
            authority: user,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveCanMint<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [CAN_MINT_SEED, token_config.mint.as_ref()],
        bump = can_mint.bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn remove_can_mint_handler(ctx: Context<RemoveCanMint>, user: Pubkey) -> Result<()> {
    let can_mint = &mut ctx.accounts.can_mint;

    if can_mint.can_mint(&user) {
        can_mint.remove_authority(&user)?;

        emit!(CanMintRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            authority: user,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct SetMintAmount<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [CAN_MINT_SEED, token_config.mint.as_ref()],
        bump = can_mint.bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn set_mint_amount_handler(ctx: Context<SetMintAmount>, user: Pubkey, amount: u64) -> Result<()> {
    let can_mint = &mut ctx.accounts.can_mint;

    // Fails with NotMinter unless the user was granted mint rights first.
    can_mint.set_mint_amount(&user, amount)?;

    emit!(MintAmountSetEvent {
        mint: ctx.accounts.token_config.mint,
        authority: user,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveMintAmount<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [CAN_MINT_SEED, token_config.mint.as_ref()],
        bump = can_mint.bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn remove_mint_amount_handler(ctx: Context<RemoveMintAmount>, user: Pubkey) -> Result<()> {
    let can_mint = &mut ctx.accounts.can_mint;

    can_mint.set_mint_amount(&user, 0)?;

    emit!(MintAmountRemovedEvent {
        mint: ctx.accounts.token_config.mint,
        authority: user,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AddCanForward<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [CAN_FORWARD_SEED, token_config.mint.as_ref()],
        bump = can_forward.bump,
    )]
    pub can_forward: Account<'info, CanForward>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_can_forward_handler(ctx: Context<AddCanForward>, forwarder: Pubkey) -> Result<()> {
    let can_forward = &mut ctx.accounts.can_forward;

    if !can_forward.is_trusted_forwarder(&forwarder) {
        can_forward.add(&forwarder)?;

        emit!(CanForwardAddedEvent {
            mint: ctx.accounts.token_config.mint,
            forwarder,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveCanForward<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [CAN_FORWARD_SEED, token_config.mint.as_ref()],
        bump = can_forward.bump,
    )]
    pub can_forward: Account<'info, CanForward>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn remove_can_forward_handler(ctx: Context<RemoveCanForward>, forwarder: Pubkey) -> Result<()> {
    let can_forward = &mut ctx.accounts.can_forward;

    if can_forward.is_trusted_forwarder(&forwarder) {
        can_forward.remove(&forwarder)?;

        emit!(CanForwardRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            forwarder,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct AddBlackList<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [BLACK_LIST_SEED, token_config.mint.as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_blacklist_handler(ctx: Context<AddBlackList>, user: Pubkey) -> Result<()> {
    let blacklist = &mut ctx.accounts.blacklist;

    if !blacklist.is_blacklisted(&user) {
        blacklist.add(&user)?;

        emit!(BlacklistedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveBlackList<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [BLACK_LIST_SEED, token_config.mint.as_ref()],
        bump = blacklist.bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn remove_blacklist_handler(ctx: Context<RemoveBlackList>, user: Pubkey) -> Result<()> {
    let blacklist = &mut ctx.accounts.blacklist;

    if blacklist.is_blacklisted(&user) {
        blacklist.remove(&user)?;

        emit!(BlacklistRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

/// Shared by add_internal_whitelist and remove_internal_whitelist.
#[derive(Accounts)]
pub struct UpdateInternalWhitelist<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [INTERNAL_WHITELIST_SEED, token_config.mint.as_ref()],
        bump = internal_whitelist.bump,
    )]
    pub internal_whitelist: Account<'info, InternalWhiteList>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_internal_whitelist_handler(
    ctx: Context<UpdateInternalWhitelist>,
    user: Pubkey,
) -> Result<()> {
    let internal_whitelist = &mut ctx.accounts.internal_whitelist;

    if !internal_whitelist.is_whitelisted(&user) {
        internal_whitelist.add(&user)?;

        emit!(InternalUserWhitelistedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

pub fn remove_internal_whitelist_handler(
    ctx: Context<UpdateInternalWhitelist>,
    user: Pubkey,
) -> Result<()> {
    let internal_whitelist = &mut ctx.accounts.internal_whitelist;

    if internal_whitelist.is_whitelisted(&user) {
        internal_whitelist.remove(&user)?;

        emit!(InternalUserRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

/// Shared by add_external_whitelist and remove_external_whitelist.
#[derive(Accounts)]
pub struct UpdateExternalWhitelist<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [EXTERNAL_WHITELIST_SEED, token_config.mint.as_ref()],
        bump = external_whitelist.bump,
    )]
    pub external_whitelist: Account<'info, ExternalWhiteList>,

    #[account(
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_external_whitelist_handler(
    ctx: Context<UpdateExternalWhitelist>,
    user: Pubkey,
) -> Result<()> {
    let external_whitelist = &mut ctx.accounts.external_whitelist;

    if !external_whitelist.is_whitelisted(&user) {
        external_whitelist.add(&user)?;

        emit!(ExternalUserWhitelistedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

pub fn remove_external_whitelist_handler(
    ctx: Context<UpdateExternalWhitelist>,
    user: Pubkey,
) -> Result<()> {
    let external_whitelist = &mut ctx.accounts.external_whitelist;

    if external_whitelist.is_whitelisted(&user) {
        external_whitelist.remove(&user)?;

        emit!(ExternalUserRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            user,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct AddTrustedContract<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn add_trusted_contract_handler(
    ctx: Context<AddTrustedContract>,
    contract: Pubkey,
) -> Result<()> {
    let trusted_contracts = &mut ctx.accounts.trusted_contracts;

    if !trusted_contracts.is_trusted_contract(&contract) {
        trusted_contracts.add(&contract)?;

        emit!(TrustedContractAddedEvent {
            mint: ctx.accounts.token_config.mint,
            contract,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct RemoveTrustedContract<'info> {
    #[account(
        constraint = (
            authority.key() == token_config.admin
                || trusted_contracts.is_trusted_contract(&authority.key())
        ) @ ErrorCode::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        seeds = [TOKEN_CONFIG_SEED, token_config.mint.as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        seeds = [TRUSTED_CONTRACTS_SEED, token_config.mint.as_ref()],
        bump = trusted_contracts.bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,
}

pub fn remove_trusted_contract_handler(
    ctx: Context<RemoveTrustedContract>,
    contract: Pubkey,
) -> Result<()> {
    let trusted_contracts = &mut ctx.accounts.trusted_contracts;

    if trusted_contracts.is_trusted_contract(&contract) {
        trusted_contracts.remove(&contract)?;

        emit!(TrustedContractRemovedEvent {
            mint: ctx.accounts.token_config.mint,
            contract,
        });
    }

    Ok(())
}

/**
 * Transfer admin authority. Both the current and the new admin must sign,
 * so control cannot be handed to a key nobody holds.
 */
#[derive(Accounts)]
pub struct UpdateAdmin<'info> {
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

    pub new_admin: Signer<'info>,
}

pub fn update_admin_handler(ctx: Context<UpdateAdmin>) -> Result<()> {
    let token_config = &mut ctx.accounts.token_config;
    let old_admin = token_config.admin;

    token_config.admin = ctx.accounts.new_admin.key();

    emit!(AdminChangedEvent {
        mint: token_config.mint,
        old_admin,
        new_admin: token_config.admin,
    });

    Ok(())
}
