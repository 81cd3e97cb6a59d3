//! # エンドポイントテスト用ヘルパー
//!
//! MemoryStoreを使った共有状態、テスト用キーペア、署名付きメッセージの構築。

use std::sync::Arc;

use arcade_crypto::{ed25519_sign, Ed25519SigningKey};
use arcade_types::SessionClaims;
use base58::ToBase58;
use base64::Engine;

use crate::config::AppState;
use crate::session::{b64, SessionService};
use crate::storage::MemoryStore;

/// テスト用の固定シークレット
pub const TEST_SECRET: &[u8] = b"test-session-secret";

/// MemoryStoreを使ったテスト用AppStateを構築する
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        store: Box::new(MemoryStore::new()),
        sessions: SessionService::new(TEST_SECRET.to_vec()),
    })
}

/// テスト用キーペアとBase58ウォレットアドレスを生成する
pub fn test_wallet() -> (Ed25519SigningKey, String) {
    let signing_key = Ed25519SigningKey::generate(&mut rand::rngs::OsRng);
    let wallet = signing_key.verifying_key().to_bytes().to_base58();
    (signing_key, wallet)
}

/// メッセージに署名し、Base58エンコードされた署名を返す
pub fn sign_message(signing_key: &Ed25519SigningKey, message: &str) -> String {
    ed25519_sign(signing_key, message.as_bytes())
        .to_bytes()
        .to_base58()
}

/// 完全性タグは正しいが既に失効しているセッショントークンを構築する
pub fn expired_token(wallet: &str, game: &str) -> String {
    let claims = SessionClaims {
        wallet: wallet.to_string(),
        game: game.to_string(),
        issued_at: 0,
        expires_at: 1,
    };
    let claims_bytes = serde_json::to_vec(&claims).unwrap();
    let tag = arcade_crypto::hmac_sha256_tag(TEST_SECRET, &claims_bytes);
    format!("{}.{}", b64().encode(&claims_bytes), b64().encode(tag))
}
