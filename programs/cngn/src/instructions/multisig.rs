use crate::errors::ErrorCode;
use crate::events::*;
use crate::state::{self, Multisig, TokenConfig, MULTISIG_SEED, TOKEN_CONFIG_SEED};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;
use anchor_spl::token_interface::Mint;
use std::collections::BTreeSet;

/**
 * k-of-n administrative approval.
 *
 * The multisig account holds an owner set and a threshold. Owners approve an
 * operation by signing its deterministic digest off chain; the collected
 * signatures are submitted as Ed25519 verification instructions alongside the
 * gated instruction. Each digest commits to the multisig nonce, which is
 * consumed on success, so an approval set authorizes exactly one execution.
 */
#[derive(Accounts)]
pub struct InitializeMultisig<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        constraint = token_config.admin == payer.key() @ ErrorCode::Unauthorized,
        seeds = [TOKEN_CONFIG_SEED, mint.key().as_ref()],
        bump = token_config.bump,
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        init,
        payer = payer,
        space = Multisig::DISCRIMINATOR.len() + Multisig::INIT_SPACE,
        seeds = [MULTISIG_SEED, mint.key().as_ref()],
        bump,
    )]
    pub multisig: Account<'info, Multisig>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateMultisig<'info> {
    #[account(
        mut,
        seeds = [MULTISIG_SEED, mint.key().as_ref()],
        bump = multisig.bump,
    )]
    pub multisig: Account<'info, Multisig>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: instructions sysvar, verified by address
    #[account(address = instructions_sysvar::ID)]
    pub instructions: AccountInfo<'info>,
}

pub fn initialize_handler(
    ctx: Context<InitializeMultisig>,
    owners: Vec<Pubkey>,
    threshold: u8,
) -> Result<()> {
    require!(owners.len() <= Multisig::MAX_OWNERS, ErrorCode::TooManyOwners);
    require!(!owners.is_empty(), ErrorCode::NoOwnersProvided);

    let mut unique_owners = BTreeSet::new();
    for owner in &owners {
        require!(unique_owners.insert(owner), ErrorCode::DuplicateOwners);
    }

    Multisig::assert_valid_threshold(owners.len(), threshold)?;

    let multisig = &mut ctx.accounts.multisig;
    multisig.owners = owners.clone();
    multisig.threshold = threshold;
    multisig.nonce = 0;
    multisig.bump = ctx.bumps.multisig;

    emit!(MultisigInitializedEvent {
        multisig: multisig.key(),
        owners,
        threshold,
    });

    Ok(())
}

pub fn update_handler(
    ctx: Context<UpdateMultisig>,
    new_owners: Vec<Pubkey>,
    new_threshold: u8,
) -> Result<()> {
    require!(!new_owners.is_empty(), ErrorCode::NoOwnersProvided);

    let mut unique_owners = BTreeSet::new();
    for owner in &new_owners {
        require!(unique_owners.insert(owner), ErrorCode::DuplicateOwners);
    }

    let multisig = &mut ctx.accounts.multisig;
    let old_owners = multisig.owners.clone();
    let old_threshold = multisig.threshold;

    let digest = state::build_update_multisig_digest(
        &multisig.key(),
        &new_owners,
        new_threshold,
        multisig.nonce,
    );

    state::validate_multisig_authorization(multisig, &ctx.accounts.instructions, &digest)?;

    multisig.rotate_owners(new_owners.clone(), new_threshold)?;

    emit!(MultisigUpdatedEvent {
        multisig: ctx.accounts.multisig.key(),
        old_owners,
        new_owners,
        old_threshold,
        new_threshold,
    });

    Ok(())
}
