//! Token helpers for tests

use std::time::{Duration, SystemTime};

use authgate::auth::jwt::TokenCodec;
use authgate::repos::users::UserId;

/// Mint a token for `user_id` valid from now
pub fn mint_test_token(codec: &TokenCodec, user_id: UserId) -> String {
    codec
        .issue(user_id, SystemTime::now())
        .expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix
pub fn bearer_header(codec: &TokenCodec, user_id: UserId) -> String {
    format!("Bearer {}", mint_test_token(codec, user_id))
}

/// Mint a token whose TTL elapsed an hour ago
pub fn mint_expired_token(codec: &TokenCodec, user_id: UserId) -> String {
    let past_time = SystemTime::now()
        .checked_sub(Duration::from_secs(3600))
        .unwrap();
    codec
        .issue(user_id, past_time)
        .expect("should mint expired token successfully")
}

/// Flip one bit of the decoded signature and re-encode the token
pub fn flip_signature_bit(token: &str, bit: usize) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    let (signed, signature) = token.rsplit_once('.').expect("token has three segments");
    let mut sig = URL_SAFE_NO_PAD
        .decode(signature)
        .expect("signature is base64url");
    let idx = (bit / 8) % sig.len();
    sig[idx] ^= 1 << (bit % 8);
    format!("{signed}.{}", URL_SAFE_NO_PAD.encode(sig))
}
