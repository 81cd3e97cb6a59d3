//! # POST /score
//!
//! スコア送信。セッショントークンとウォレット署名の二重検証を通過した
//! 場合のみスコアレコードを追記する。

use std::sync::Arc;

use arcade_types::{ScoreRecord, ScoreSubmitRequest, ScoreSubmitResponse};
use axum::extract::State;
use axum::Json;

use crate::config::AppState;
use crate::endpoints::require_field;
use crate::error::GatewayError;
use crate::session::unix_now;

/// POST /score — スコア送信。
///
/// 検証は次の順で行い、最初の失敗で打ち切る:
/// 1. 6フィールドすべての存在確認（欠落は`MissingFields`）
/// 2. セッショントークンの完全性・期限検証（`InvalidToken` / `ExpiredToken`）
/// 3. トークンの(wallet, game)とリクエストの一致確認（`SessionMismatch`。
///    別の組に対して発行されたトークンの流用を防ぐ）
/// 4. ウォレット署名の検証（`InvalidSignature`）
/// 5. 表示名の解決。未登録ウォレットの送信も許可し、nameは空文字列になる
/// 6. スコアレコードの追記。重複排除・最高値判定は行わず、検証を通過した
///    呼び出しごとに必ず1件作成する
///
/// 記録されたレコードは「送信時点で有効なセッションと鍵の所有」を証明するが、
/// 署名対象メッセージの内容とスコア値の意味的な結び付きまでは保証しない。
pub async fn handle_score(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScoreSubmitRequest>,
) -> Result<Json<ScoreSubmitResponse>, GatewayError> {
    let wallet = require_field(body.wallet, "wallet")?;
    let game = require_field(body.game, "game")?;
    let score = body
        .score
        .ok_or_else(|| GatewayError::MissingFields("score".to_string()))?;
    let session_token = require_field(body.session_token, "sessionToken")?;
    let client_signature = require_field(body.client_signature, "clientSignature")?;
    let signature_message = require_field(body.signature_message, "signatureMessage")?;

    let claims = state.sessions.verify(&session_token)?;

    if claims.wallet != wallet || claims.game != game {
        return Err(GatewayError::SessionMismatch);
    }

    arcade_crypto::verify_wallet_signature(
        signature_message.as_bytes(),
        &client_signature,
        &wallet,
    )
    .map_err(|_| GatewayError::InvalidSignature)?;

    let name = state
        .store
        .find_user(&wallet)
        .await?
        .map(|u| u.name)
        .unwrap_or_default();

    state
        .store
        .insert_score(ScoreRecord {
            wallet: wallet.clone(),
            game: game.clone(),
            score,
            name,
            timestamp: unix_now()?,
        })
        .await?;

    tracing::info!(wallet = %wallet, game = %game, score, "スコアを記録しました");
    Ok(Json(ScoreSubmitResponse { success: true }))
}
