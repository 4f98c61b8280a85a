// --- File: crates/market_auth/src/token_test.rs ---
use crate::error::TokenError;
use crate::token::{issue_token, verify_token};

const SECRET: &str = "test-secret";

#[test]
fn issued_token_verifies_and_carries_the_subject() {
    let token = issue_token("alice@example.com", SECRET, 24);
    let claims = verify_token(&token, SECRET).unwrap();
    assert_eq!(claims.sub, "alice@example.com");
    assert!(claims.exp > claims.iat);
}

#[test]
fn wrong_secret_is_a_signature_failure() {
    let token = issue_token("alice@example.com", SECRET, 24);
    assert!(matches!(
        verify_token(&token, "other-secret"),
        Err(TokenError::Signature)
    ));
}

#[test]
fn tampered_payload_is_rejected() {
    let token = issue_token("alice@example.com", SECRET, 24);
    let (_, signature) = token.split_once('.').unwrap();
    let forged_payload = base64::Engine::encode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        br#"{"sub":"admin@example.com","iat":0,"exp":99999999999}"#,
    );
    let forged = format!("{forged_payload}.{signature}");
    assert!(matches!(
        verify_token(&forged, SECRET),
        Err(TokenError::Signature)
    ));
}

#[test]
fn expired_token_is_rejected() {
    let token = issue_token("alice@example.com", SECRET, -1);
    assert!(matches!(
        verify_token(&token, SECRET),
        Err(TokenError::Expired)
    ));
}

#[test]
fn garbage_is_malformed_not_a_panic() {
    for junk in ["", "no-dot", "a.b.c", "!!!.???", "YQ.YQ.YQ"] {
        assert!(matches!(
            verify_token(junk, SECRET),
            Err(TokenError::Malformed)
        ));
    }
}
