//! # セッショントークンサービス
//!
//! (wallet, game)の組に対して発行される自己検証型・時限付きクレデンシャル。
//!
//! トークンはクレームJSONとそのHMAC-SHA256完全性タグをそれぞれBase64で
//! エンコードし、`.`で連結した不透明な文字列。サーバー側には何も保存されず、
//! 検証は完全性タグと失効時刻のチェックのみで完結する。
//! このためスコア送信経路は署名チェック以外のデータベース往復を必要としないが、
//! 自然失効前の取り消しは不可能になる（10分の短い窓を前提とした設計）。

use std::time::{SystemTime, UNIX_EPOCH};

use arcade_types::SessionClaims;
use base64::Engine;

use crate::error::GatewayError;

/// セッショントークンの有効期間（秒）: 10分
pub const SESSION_TTL_SECS: u64 = 600;

/// Base64エンジン（Standard）
pub(crate) fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// 現在時刻（UNIXタイムスタンプ、秒）を返す。
pub(crate) fn unix_now() -> Result<u64, GatewayError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| GatewayError::Internal(format!("時刻取得失敗: {e}")))
}

/// セッショントークンの発行・検証サービス。
///
/// プロセス全体で共有される署名シークレット以外の状態を持たない純粋な
/// サービスであり、任意の数のリクエストが並行して発行・検証を行える。
pub struct SessionService {
    secret: Vec<u8>,
}

impl SessionService {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// (wallet, game)に対するセッショントークンを発行する。
    /// 発行は純粋なエンコード処理であり、何も永続化しない。
    pub fn issue(&self, wallet: &str, game: &str) -> Result<String, GatewayError> {
        self.issue_at(wallet, game, unix_now()?)
    }

    fn issue_at(&self, wallet: &str, game: &str, now: u64) -> Result<String, GatewayError> {
        let claims = SessionClaims {
            wallet: wallet.to_string(),
            game: game.to_string(),
            issued_at: now,
            expires_at: now + SESSION_TTL_SECS,
        };
        let claims_bytes = serde_json::to_vec(&claims)
            .map_err(|e| GatewayError::Internal(format!("クレームのシリアライズに失敗: {e}")))?;
        let tag = arcade_crypto::hmac_sha256_tag(&self.secret, &claims_bytes);

        // `.`はBase64アルファベット外のため、区切りとして曖昧さがない
        Ok(format!(
            "{}.{}",
            b64().encode(&claims_bytes),
            b64().encode(tag)
        ))
    }

    /// トークンを検証し、埋め込まれたクレームを返す。
    ///
    /// 形式不正・完全性タグ不一致は`InvalidToken`、失効時刻以降は`ExpiredToken`。
    /// 境界の曖昧さを避けるため、`expires_at`ちょうども失効扱いとする。
    /// クロックスキューの猶予は設けない。
    pub fn verify(&self, token: &str) -> Result<SessionClaims, GatewayError> {
        self.verify_at(token, unix_now()?)
    }

    fn verify_at(&self, token: &str, now: u64) -> Result<SessionClaims, GatewayError> {
        let (claims_part, tag_part) =
            token.split_once('.').ok_or(GatewayError::InvalidToken)?;

        let claims_bytes = b64()
            .decode(claims_part)
            .map_err(|_| GatewayError::InvalidToken)?;
        let tag = b64()
            .decode(tag_part)
            .map_err(|_| GatewayError::InvalidToken)?;

        arcade_crypto::hmac_sha256_verify(&self.secret, &claims_bytes, &tag)
            .map_err(|_| GatewayError::InvalidToken)?;

        let claims: SessionClaims =
            serde_json::from_slice(&claims_bytes).map_err(|_| GatewayError::InvalidToken)?;

        if now >= claims.expires_at {
            return Err(GatewayError::ExpiredToken);
        }

        Ok(claims)
    }
}
