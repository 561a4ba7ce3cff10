use crate::common::*;
use cngn::errors::ErrorCode;
use cngn::state::CanMint;
use solana_program_test::tokio;

const MINT_AMOUNT: u64 = 1_000_000_000; // 1000 cNGN

// Macro to generate parameterized tests for both TOKEN and TOKEN22 programs.
macro_rules! parameterized_token_test {
    ($test_name:ident, $test_body:expr) => {
        paste::paste! {
            #[tokio::test]
            async fn [<$test_name _token>]() {
                ($test_body)(TokenProgram::Token).await;
            }

            #[tokio::test]
            async fn [<$test_name _token22>]() {
                ($test_body)(TokenProgram::Token2022).await;
            }
        }
    };
}

parameterized_token_test!(test_mint_consumes_one_shot_allowance, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let minter_ata = create_token_account(&mut ctx, &token, &minter_pk);

    grant_mint_allowance(&mut ctx, &token, minter_pk, MINT_AMOUNT);

    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert!(result.is_ok(), "Failed to mint: {:?}", result.err());

    assert_eq!(token_balance(&ctx, &token, &minter_ata), MINT_AMOUNT);
    assert_eq!(mint_supply(&ctx, &token), MINT_AMOUNT);

    // The authorization is spent by the mint it approved.
    let can_mint: CanMint = read_account(&ctx, &token.can_mint);
    assert!(
        !can_mint.authorities.contains(&minter_pk),
        "minter should be removed from the allowance list after minting"
    );

    // A second mint by the same authority must fail until a fresh grant.
    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::MinterNotAuthorized.to_string());
});

parameterized_token_test!(test_mint_without_grant_fails, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let minter_ata = create_token_account(&mut ctx, &token, &minter_pk);

    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::MinterNotAuthorized.to_string());
});

parameterized_token_test!(test_mint_with_wrong_amount_fails, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let minter_ata = create_token_account(&mut ctx, &token, &minter_pk);

    grant_mint_allowance(&mut ctx, &token, minter_pk, MINT_AMOUNT);

    // The grant is for an exact quantity; minting less is as invalid as more.
    for wrong_amount in [MINT_AMOUNT - 1, MINT_AMOUNT + 1] {
        let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, wrong_amount);
        let tx = create_transaction_with_payer_and_signers(
            &ctx,
            &[ix],
            Some(&ctx.payer_pk),
            &[&ctx.payer_kp, &minter_kp],
        );
        let result = submit_transaction(&mut ctx, tx);
        assert_error(result, &ErrorCode::InvalidMintAmount.to_string());
    }

    assert_eq!(token_balance(&ctx, &token, &minter_ata), 0);
});

parameterized_token_test!(test_mint_blacklisted_signer_fails, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let minter_ata = create_token_account(&mut ctx, &token, &minter_pk);

    grant_mint_allowance(&mut ctx, &token, minter_pk, MINT_AMOUNT);
    blacklist_user(&mut ctx, &token, minter_pk);

    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::SignerBlacklisted.to_string());
});

parameterized_token_test!(test_mint_blacklisted_receiver_fails, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let (_, receiver_pk) = setup_keypair(&mut ctx);
    let receiver_ata = create_token_account(&mut ctx, &token, &receiver_pk);

    grant_mint_allowance(&mut ctx, &token, minter_pk, MINT_AMOUNT);
    blacklist_user(&mut ctx, &token, receiver_pk);

    let ix = mint_ix(&ctx, &token, &minter_pk, &receiver_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::ReceiverBlacklisted.to_string());
});

parameterized_token_test!(test_mint_respects_pause, |token_program: TokenProgram| async move {
    let mut ctx = setup();
    let token = setup_token(&mut ctx, token_program);

    let (minter_kp, minter_pk) = setup_keypair(&mut ctx);
    let minter_ata = create_token_account(&mut ctx, &token, &minter_pk);

    grant_mint_allowance(&mut ctx, &token, minter_pk, MINT_AMOUNT);

    let pause = pause_minting_ix(&ctx, &token, &ctx.payer_pk, true);
    let tx = create_transaction(&ctx, &[pause]);
    submit_transaction(&mut ctx, tx).unwrap();

    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    let result = submit_transaction(&mut ctx, tx);
    assert_error(result, &ErrorCode::MintingPaused.to_string());

    // The grant survives the pause and is usable after unpausing.
    let unpause = pause_minting_ix(&ctx, &token, &ctx.payer_pk, false);
    let tx = create_transaction(&ctx, &[unpause]);
    submit_transaction(&mut ctx, tx).unwrap();

    let ix = mint_ix(&ctx, &token, &minter_pk, &minter_ata, MINT_AMOUNT);
    let tx = create_transaction_with_payer_and_signers(
        &ctx,
        &[ix],
        Some(&ctx.payer_pk),
        &[&ctx.payer_kp, &minter_kp],
    );
    submit_transaction(&mut ctx, tx).unwrap();

    assert_eq!(token_balance(&ctx, &token, &minter_ata), MINT_AMOUNT);
});
