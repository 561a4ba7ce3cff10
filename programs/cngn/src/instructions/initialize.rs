use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::instruction::AuthorityType;
use anchor_spl::token_interface::{self, Mint, SetAuthority, TokenInterface};

/**
 * Token initialization, split across three instructions so each account set
 * stays small enough for the runtime's stack limits.
 *
 * Stage one creates the SPL mint, the token config, the mint-authority PDA
 * and the mint allowance list. The mint is created with the payer as a
 * temporary authority and handed to the PDA before the instruction returns,
 * so tokens can only ever be issued through this program. The two follow-up
 * stages create the access list PDAs. Because every account is an `init` PDA
 * seeded from the mint, the token can only be initialized once per mint.
 */
#[derive(Accounts)]
#[instruction(name: String, symbol: String, decimals: u8)]
pub struct Initialize<'info> {
    /// Pays for account creation; holds the mint authority only within this
    /// instruction, after which it is moved to the mint_authority PDA
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: recorded as the token admin, never read in this instruction
    pub admin: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        mint::decimals = decimals,
        mint::authority = payer,
        mint::freeze_authority = payer,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = TokenConfig::DISCRIMINATOR.len() + TokenConfig::INIT_SPACE,
        seeds = [TOKEN_CONFIG_SEED, mint.key().as_ref()],
        bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        init,
        payer = payer,
        space = MintAuthority::DISCRIMINATOR.len() + MintAuthority::INIT_SPACE,
        seeds = [MINT_AUTHORITY_SEED, mint.key().as_ref()],
        bump,
    )]
    pub mint_authority: Account<'info, MintAuthority>,

    #[account(
        init,
        payer = payer,
        space = CanMint::DISCRIMINATOR.len() + CanMint::INIT_SPACE,
        seeds = [CAN_MINT_SEED, mint.key().as_ref()],
        bump,
    )]
    pub can_mint: Account<'info, CanMint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    name: String,
    symbol: String,
    decimals: u8,
) -> Result<()> {
    require!(
        name.len() <= TokenConfig::MAX_NAME_LENGTH,
        ErrorCode::NameTooLong
    );
    require!(
        symbol.len() <= TokenConfig::MAX_SYMBOL_LENGTH,
        ErrorCode::SymbolTooLong
    );

    let token_config = &mut ctx.accounts.token_config;
    token_config.name = name.clone();
    token_config.symbol = symbol.clone();
    token_config.decimals = decimals;
    token_config.mint = ctx.accounts.mint.key();
    token_config.admin = ctx.accounts.admin.key();
    token_config.mint_paused = false;
    token_config.transfer_paused = false;
    token_config.bump = ctx.bumps.token_config;

    let mint_authority = &mut ctx.accounts.mint_authority;
    mint_authority.mint = ctx.accounts.mint.key();
    mint_authority.bump = ctx.bumps.mint_authority;

    // The allowance list starts empty; every mint requires an explicit grant.
    let can_mint = &mut ctx.accounts.can_mint;
    can_mint.mint = ctx.accounts.mint.key();
    can_mint.authorities = Vec::new();
    can_mint.mint_amounts = Vec::new();
    can_mint.bump = ctx.bumps.can_mint;

    // Hand both mint authorities to the program's PDA.
    let mint_authority_key = ctx.accounts.mint_authority.key();
    for authority_type in [AuthorityType::MintTokens, AuthorityType::FreezeAccount] {
        let cpi_accounts = SetAuthority {
            account_or_mint: ctx.accounts.mint.to_account_info(),
            current_authority: ctx.accounts.payer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
        );
        token_interface::set_authority(cpi_ctx, authority_type, Some(mint_authority_key))?;
    }

    emit!(TokenInitializedEvent {
        mint: ctx.accounts.mint.key(),
        admin: ctx.accounts.admin.key(),
        name,
        symbol,
        decimals,
    });

    Ok(())
}

/// Stage two: blacklist, forwarder allow-list and trusted contract list.
#[derive(Accounts)]
pub struct InitializeAccessLists<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = BlackList::DISCRIMINATOR.len() + BlackList::INIT_SPACE,
        seeds = [BLACK_LIST_SEED, mint.key().as_ref()],
        bump,
    )]
    pub blacklist: Account<'info, BlackList>,

    #[account(
        init,
        payer = payer,
        space = CanForward::DISCRIMINATOR.len() + CanForward::INIT_SPACE,
        seeds = [CAN_FORWARD_SEED, mint.key().as_ref()],
        bump,
    )]
    pub can_forward: Account<'info, CanForward>,

    #[account(
        init,
        payer = payer,
        space = TrustedContracts::DISCRIMINATOR.len() + TrustedContracts::INIT_SPACE,
        seeds = [TRUSTED_CONTRACTS_SEED, mint.key().as_ref()],
        bump,
    )]
    pub trusted_contracts: Account<'info, TrustedContracts>,

    pub system_program: Program<'info, System>,
}

pub fn access_lists_handler(ctx: Context<InitializeAccessLists>) -> Result<()> {
    let blacklist = &mut ctx.accounts.blacklist;
    blacklist.mint = ctx.accounts.mint.key();
    blacklist.blacklist = Vec::new();
    blacklist.bump = ctx.bumps.blacklist;

    let can_forward = &mut ctx.accounts.can_forward;
    can_forward.mint = ctx.accounts.mint.key();
    can_forward.forwarders = Vec::new();
    can_forward.bump = ctx.bumps.can_forward;
    can_forward.is_executed = false;

    let trusted_contracts = &mut ctx.accounts.trusted_contracts;
    trusted_contracts.mint = ctx.accounts.mint.key();
    trusted_contracts.contracts = Vec::new();
    trusted_contracts.bump = ctx.bumps.trusted_contracts;

    emit!(AccessListsInitializedEvent {
        mint: ctx.accounts.mint.key(),
        initializer: ctx.accounts.payer.key(),
    });

    Ok(())
}

/// Stage three: the whitelists consulted by the bridge-burn rule.
#[derive(Accounts)]
pub struct InitializeWhitelists<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = payer,
        space = InternalWhiteList::DISCRIMINATOR.len() + InternalWhiteList::INIT_SPACE,
        seeds = [INTERNAL_WHITELIST_SEED, mint.key().as_ref()],
        bump,
    )]
    pub internal_whitelist: Account<'info, InternalWhiteList>,

    #[account(
        init,
        payer = payer,
        space = ExternalWhiteList::DISCRIMINATOR.len() + ExternalWhiteList::INIT_SPACE,
        seeds = [EXTERNAL_WHITELIST_SEED, mint.key().as_ref()],
        bump,
    )]
    pub external_whitelist: Account<'info, ExternalWhiteList>,

    pub system_program: Program<'info, System>,
}

pub fn whitelists_handler(ctx: Context<InitializeWhitelists>) -> Result<()> {
    let internal_whitelist = &mut ctx.accounts.internal_whitelist;
    internal_whitelist.mint = ctx.accounts.mint.key();
    internal_whitelist.whitelist = Vec::new();
    internal_whitelist.bump = ctx.bumps.internal_whitelist;

    let external_whitelist = &mut ctx.accounts.external_whitelist;
    external_whitelist.mint = ctx.accounts.mint.key();
    external_whitelist.whitelist = Vec::new();
    external_whitelist.bump = ctx.bumps.external_whitelist;

    emit!(WhitelistsInitializedEvent {
        mint: ctx.accounts.mint.key(),
        initializer: ctx.accounts.payer.key(),
    });

    Ok(())
}
