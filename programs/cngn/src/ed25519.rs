use crate::errors::ErrorCode;
use anchor_lang::prelude::*;

/**
 * Byte-level validation of Ed25519 verification instructions.
 *
 * The runtime's Ed25519 precompile verifies the signature itself before any
 * program executes; it does not bind that signature to a particular program
 * instruction. The functions here perform that binding: given the raw data of
 * a verification instruction, they check its structure and extract (or match)
 * the signer, message and signature it attests to. Callers are responsible
 * for the positional check that the verification instruction is the one
 * immediately preceding theirs.
 *
 * Instruction data layout (single signature):
 *   byte 0      signature count, must be exactly 1
 *   byte 1      padding
 *   bytes 2..16 Ed25519SignatureOffsets
 *   remainder   pubkey / signature / message at the encoded offsets
 */

pub const PUBKEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

const OFFSETS_START: usize = 2;
const OFFSETS_END: usize = 16;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct Ed25519SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u16,
    pub public_key_offset: u16,
    pub public_key_instruction_index: u16,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u16,
}

fn parse_offsets(data: &[u8]) -> Result<Ed25519SignatureOffsets> {
    require!(data.len() >= OFFSETS_END, ErrorCode::InvalidEd25519Instruction);

    let num_signatures = data[0];
    require!(num_signatures == 1, ErrorCode::InvalidEd25519Instruction);

    let offsets = Ed25519SignatureOffsets::try_from_slice(&data[OFFSETS_START..OFFSETS_END])
        .map_err(|_| ErrorCode::InvalidEd25519Instruction)?;

    // All three payloads must live in this very instruction. A reference into
    // another instruction would let a signature verified elsewhere be bound
    // to this request.
    require!(
        offsets.signature_instruction_index == u16::MAX
            && offsets.public_key_instruction_index == u16::MAX
            && offsets.message_instruction_index == u16::MAX,
        ErrorCode::InvalidEd25519Instruction
    );

    let data_len = data.len();
    require!(
        (offsets.signature_offset as usize) + SIGNATURE_LEN <= data_len,
        ErrorCode::InvalidEd25519Instruction
    );
    require!(
        (offsets.public_key_offset as usize) + PUBKEY_LEN <= data_len,
        ErrorCode::InvalidEd25519Instruction
    );
    require!(
        (offsets.message_data_offset as usize) + (offsets.message_data_size as usize) <= data_len,
        ErrorCode::InvalidEd25519Instruction
    );

    Ok(offsets)
}

/// Extract the signer and message attested to by a verification instruction.
/// Used by the multisig approval scan, which accepts any owner as signer.
pub fn parse_single_signature(data: &[u8]) -> Result<(Pubkey, Vec<u8>)> {
    let offsets = parse_offsets(data)?;

    let pubkey_start = offsets.public_key_offset as usize;
    let pubkey_bytes = &data[pubkey_start..pubkey_start + PUBKEY_LEN];
    let signer = Pubkey::new_from_array(
        pubkey_bytes
            .try_into()
            .map_err(|_| ErrorCode::InvalidPublicKey)?,
    );

    let msg_start = offsets.message_data_offset as usize;
    let msg_end = msg_start + offsets.message_data_size as usize;
    let message = data[msg_start..msg_end].to_vec();

    Ok((signer, message))
}

/// Check that a verification instruction attests to exactly the expected
/// signer, message and signature. Pure validation, no side effects.
pub fn validate_single_signature(
    data: &[u8],
    expected_public_key: &Pubkey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let offsets = parse_offsets(data)?;

    let pubkey_start = offsets.public_key_offset as usize;
    if &data[pubkey_start..pubkey_start + PUBKEY_LEN] != expected_public_key.as_ref() {
        return Err(ErrorCode::InvalidPublicKey.into());
    }

    let msg_start = offsets.message_data_offset as usize;
    let msg_end = msg_start + offsets.message_data_size as usize;
    if &data[msg_start..msg_end] != message {
        return Err(ErrorCode::InvalidMessage.into());
    }

    let sig_start = offsets.signature_offset as usize;
    if &data[sig_start..sig_start + SIGNATURE_LEN] != signature {
        return Err(ErrorCode::InvalidSignature.into());
    }

    Ok(())
}
