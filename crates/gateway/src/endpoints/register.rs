//! # POST /register
//!
//! ウォレット登録。署名による鍵所有証明、または明示的なスキップを受け付ける。

use std::sync::Arc;

use arcade_types::{RegisterRequest, RegisterResponse, RegistrationProof, User};
use axum::extract::State;
use axum::Json;

use crate::config::AppState;
use crate::endpoints::require_field;
use crate::error::GatewayError;
use crate::session::unix_now;

/// 表示名の最大文字数。超過分は切り詰める
pub const MAX_NAME_CHARS: usize = 64;

/// POST /register — ウォレット登録。
///
/// `skip: true`の場合は署名検証なしで登録する。これは登録のみのフローの
/// ための意図的な低保証パスであり、重要な操作はスコア送信側のより厳格な
/// 検証で保護される。それ以外の場合はmessageとsignatureの両方を必須とし、
/// walletの公開鍵に対して署名を検証する。
///
/// 同じwalletの再登録は冪等で、既存ユーザーを変更せずそのまま返す
/// （nameが上書きされることはない）。
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, GatewayError> {
    let wallet = require_field(body.wallet, "wallet")?;

    let proof = if body.skip.unwrap_or(false) {
        RegistrationProof::Skipped
    } else {
        let message = require_field(body.message, "message")?;
        let signature = require_field(body.signature, "signature")?;
        RegistrationProof::Signed { message, signature }
    };

    if let RegistrationProof::Signed { message, signature } = &proof {
        arcade_crypto::verify_wallet_signature(message.as_bytes(), signature, &wallet)
            .map_err(|_| GatewayError::InvalidSignature)?;
    }

    let name: String = body
        .name
        .unwrap_or_default()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();

    let user = state
        .store
        .create_user(User {
            wallet,
            name,
            created_at: unix_now()?,
        })
        .await?;

    tracing::info!(wallet = %user.wallet, "ウォレットを登録しました");
    Ok(Json(RegisterResponse {
        success: true,
        user,
    }))
}
