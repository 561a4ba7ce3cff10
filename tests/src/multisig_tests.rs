use crate::common::*;
use cngn::errors::ErrorCode;
use cngn::state::{build_update_multisig_digest, Multisig};
use solana_program_test::tokio;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

struct MultisigSetup {
    token: TokenContext,
    multisig: Pubkey,
    owner_kps: Vec<Keypair>,
    owner_pks: Vec<Pubkey>,
}

/// Token with a 2-of-3 multisig installed.
fn setup_multisig(ctx: &mut Context) -> MultisigSetup {
    let token = setup_token(ctx, TokenProgram::Token);

    let owner_kps: Vec<Keypair> = (0..3).map(|_| Keypair::new()).collect();
    let owner_pks: Vec<Pubkey> = owner_kps.iter().map(|kp| kp.pubkey()).collect();

    let ix = initialize_multisig_ix(ctx, &token, &ctx.payer_pk, owner_pks.clone(), 2);
    let tx = create_transaction(ctx, &[ix]);
    submit_transaction(ctx, tx).unwrap();

    let multisig = multisig_pda(ctx, &token.mint);

    MultisigSetup {
        token,
        multisig,
        owner_kps,
        owner_pks,
    }
}

/// Approval instructions: each signer signs the rotation digest for the
/// multisig's current nonce.
fn approval_instructions(
    ms: &MultisigSetup,
    signers: &[&Keypair],
    new_owners: &[Pubkey],
    new_threshold: u8,
    nonce: u64,
) -> Vec<Instruction> {
    let digest = build_update_multisig_digest(&ms.multisig, new_owners, new_threshold, nonce);
    signers
        .iter()
        .map(|kp| {
            let signature = sign_bytes(kp, &digest);
            ed25519_verify_ix(&kp.pubkey(), &digest, &signature)
        })
        .collect()
}

#[tokio::test]
async fn test_initialize_multisig_stores_owner_set() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let multisig: Multisig = read_account(&ctx, &ms.multisig);
    assert_eq!(multisig.owners, ms.owner_pks);
    assert_eq!(multisig.threshold, 2);
    assert_eq!(multisig.nonce, 0);
}

#[tokio::test]
async fn test_initialize_multisig_validates_inputs() {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, TokenProgram::Token);

    let owner = Pubkey::new_unique();

    let ix = initialize_multisig_ix(&ctx, &token, &ctx.payer_pk, vec![], 1);
    let tx = create_transaction(&ctx, &[ix]);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NoOwnersProvided.to_string());

    let ix = initialize_multisig_ix(&ctx, &token, &ctx.payer_pk, vec![owner, owner], 1);
    let tx = create_transaction(&ctx, &[ix]);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::DuplicateOwners.to_string());

    let ix = initialize_multisig_ix(&ctx, &token, &ctx.payer_pk, vec![owner], 0);
    let tx = create_transaction(&ctx, &[ix]);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::InvalidThreshold.to_string());

    let ix = initialize_multisig_ix(&ctx, &token, &ctx.payer_pk, vec![owner], 2);
    let tx = create_transaction(&ctx, &[ix]);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::InvalidThreshold.to_string());
}

#[tokio::test]
async fn test_initialize_multisig_requires_admin() {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, TokenProgram::Token);

    let (rogue_kp, rogue_pk) = setup_keypair(&mut ctx);

    let ix = initialize_multisig_ix(&ctx, &token, &rogue_pk, vec![Pubkey::new_unique()], 1);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&rogue_pk),
        &[&rogue_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::Unauthorized.to_string());
}

#[tokio::test]
async fn test_update_multisig_with_quorum() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let mut new_owners = ms.owner_pks.clone();
    new_owners.push(Pubkey::new_unique());

    let mut instructions = approval_instructions(
        &ms,
        &[&ms.owner_kps[0], &ms.owner_kps[1]],
        &new_owners,
        3,
        0,
    );
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners.clone(), 3));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert!(result.is_ok(), "Failed to rotate owners: {:?}", result.err());

    let multisig: Multisig = read_account(&ctx, &ms.multisig);
    assert_eq!(multisig.owners, new_owners);
    assert_eq!(multisig.threshold, 3);
    // The approval set was consumed.
    assert_eq!(multisig.nonce, 1);
}

#[tokio::test]
async fn test_update_multisig_insufficient_signatures() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let new_owners = vec![Pubkey::new_unique(), Pubkey::new_unique()];

    let mut instructions =
        approval_instructions(&ms, &[&ms.owner_kps[0]], &new_owners, 2, 0);
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners, 2));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NotEnoughMultisigSigners.to_string());
}

#[tokio::test]
async fn test_update_multisig_duplicate_signatures_do_not_count() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let new_owners = vec![Pubkey::new_unique(), Pubkey::new_unique()];

    // The same owner approving twice is one approval.
    let mut instructions = approval_instructions(
        &ms,
        &[&ms.owner_kps[0], &ms.owner_kps[0]],
        &new_owners,
        2,
        0,
    );
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners, 2));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NotEnoughMultisigSigners.to_string());
}

#[tokio::test]
async fn test_update_multisig_rejects_non_owner_signatures() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let strangers: Vec<Keypair> = (0..2).map(|_| Keypair::new()).collect();
    let new_owners = vec![Pubkey::new_unique(), Pubkey::new_unique()];

    let digest = build_update_multisig_digest(&ms.multisig, &new_owners, 2, 0);
    let mut instructions: Vec<Instruction> = strangers
        .iter()
        .map(|kp| {
            let signature = sign_bytes(kp, &digest);
            ed25519_verify_ix(&kp.pubkey(), &digest, &signature)
        })
        .collect();
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners, 2));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NotEnoughMultisigSigners.to_string());
}

#[tokio::test]
async fn test_update_multisig_rejects_wrong_message() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    let new_owners = vec![Pubkey::new_unique(), Pubkey::new_unique()];

    // Owners sign something, just not the rotation digest for this nonce.
    let wrong = b"UPDATE_MULTISIG but not really".to_vec();
    let mut instructions: Vec<Instruction> = ms.owner_kps[..2]
        .iter()
        .map(|kp| {
            let signature = sign_bytes(kp, &wrong);
            ed25519_verify_ix(&kp.pubkey(), &wrong, &signature)
        })
        .collect();
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners, 2));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NotEnoughMultisigSigners.to_string());
}

#[tokio::test]
async fn test_consumed_approvals_cannot_be_replayed() {
    let mut ctx = setup();
    let ms = setup_multisig(&mut ctx);

    // Rotation that keeps the signing owners in the set.
    let mut new_owners = ms.owner_pks.clone();
    new_owners.push(Pubkey::new_unique());

    let approvals = approval_instructions(
        &ms,
        &[&ms.owner_kps[0], &ms.owner_kps[1]],
        &new_owners,
        2,
        0,
    );
    let mut instructions = approvals.clone();
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners.clone(), 2));

    let tx = create_transaction(&ctx, &instructions);
    submit_transaction(&mut ctx, tx).unwrap();

    // The nonce moved, so the old digest no longer authorizes anything.
    let mut instructions = approvals;
    instructions.push(update_multisig_ix(&ctx, &ms.token, new_owners, 2));

    let tx = create_transaction(&ctx, &instructions);
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::NotEnoughMultisigSigners.to_string());
}
