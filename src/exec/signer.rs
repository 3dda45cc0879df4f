//! EIP-712 signing over the CLOB order schema.
//!
//! The type schema and field order below are fixed by the exchange protocol;
//! any deviation produces a signature the venue rejects even though it is
//! well-formed in isolation.

use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer as _;
use alloy::sol;
use alloy::sol_types::{eip712_domain, SolStruct};
use zeroize::Zeroizing;

use crate::config::SigningSettings;
use crate::error::{ExecutorError, ExecutorResult};
use crate::types::OrderBody;

sol! {
    #[derive(Debug)]
    struct Order {
        address maker;
        address taker;
        uint256 tokenId;
        uint256 price;
        uint256 amount;
        uint256 expiration;
        bytes32 salt;
        uint8 side;
        uint256 feeRateBps;
    }
}

/// Parse the hex credential into a local signer. The raw key bytes live in a
/// zeroized buffer and the hex string is never logged.
pub fn parse_signer(private_key: &str) -> ExecutorResult<PrivateKeySigner> {
    let trimmed = private_key.trim().trim_start_matches("0x");
    let bytes = Zeroizing::new(
        hex::decode(trimmed)
            .map_err(|e| ExecutorError::Signing(format!("private key is not hex: {e}")))?,
    );
    PrivateKeySigner::from_slice(&bytes)
        .map_err(|e| ExecutorError::Signing(format!("invalid private key: {e}")))
}

fn parse_uint(field: &str, value: &str) -> ExecutorResult<U256> {
    value
        .parse::<U256>()
        .map_err(|e| ExecutorError::Signing(format!("{field} is not an unsigned integer: {e}")))
}

/// The 128-bit salt occupies the high-order bytes of the `bytes32` slot
/// (ABI `bytesN` packing).
fn parse_salt(salt: &str) -> ExecutorResult<B256> {
    let bytes =
        hex::decode(salt).map_err(|e| ExecutorError::Signing(format!("salt is not hex: {e}")))?;
    if bytes.len() > 32 {
        return Err(ExecutorError::Signing(format!(
            "salt is {} bytes, expected at most 32",
            bytes.len()
        )));
    }
    Ok(B256::right_padding_from(&bytes))
}

/// Produce the 65-byte `r || s || v` signature (v in Electrum 27/28 notation)
/// over the domain-separated order struct.
pub async fn sign_order(
    signer: &PrivateKeySigner,
    cfg: &SigningSettings,
    body: &OrderBody,
) -> ExecutorResult<String> {
    let verifying_contract: Address = cfg
        .verifying_contract
        .parse()
        .map_err(|e| ExecutorError::Signing(format!("bad verifying contract address: {e}")))?;
    let domain = eip712_domain! {
        name: cfg.eip712_name.clone(),
        version: cfg.eip712_version.clone(),
        chain_id: cfg.chain_id,
        verifying_contract: verifying_contract,
    };

    let maker: Address = body
        .maker
        .parse()
        .map_err(|e| ExecutorError::Signing(format!("bad maker address: {e}")))?;
    let expiration = u64::try_from(body.expiration)
        .map_err(|_| ExecutorError::Signing(format!("negative expiration {}", body.expiration)))?;

    let order = Order {
        maker,
        taker: Address::ZERO,
        tokenId: parse_uint("token id", &body.token_id)?,
        price: parse_uint("price", &body.price)?,
        amount: parse_uint("size", &body.size)?,
        expiration: U256::from(expiration),
        salt: parse_salt(&body.salt)?,
        side: body.side,
        feeRateBps: U256::from(body.fee_rate_bps),
    };

    let hash = order.eip712_signing_hash(&domain);
    let sig = signer
        .sign_hash(&hash)
        .await
        .map_err(|e| ExecutorError::Signing(e.to_string()))?;

    let mut raw = [0u8; 65];
    raw[..32].copy_from_slice(&sig.r().to_be_bytes::<32>());
    raw[32..64].copy_from_slice(&sig.s().to_be_bytes::<32>());
    raw[64] = if sig.v() { 28 } else { 27 };
    Ok(format!("0x{}", hex::encode(raw)))
}
