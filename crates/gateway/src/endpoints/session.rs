//! # POST /session
//!
//! (wallet, game)にスコープされたセッショントークンの発行。

use std::sync::Arc;

use arcade_types::{SessionRequest, SessionResponse};
use axum::extract::State;
use axum::Json;

use crate::config::AppState;
use crate::endpoints::require_field;
use crate::error::GatewayError;

/// POST /session — セッショントークン発行。
///
/// 発行されたトークンは指定された(wallet, game)の組に対してのみ有効で、
/// 発行から10分で自然失効する。発行自体は所有証明を要求しない。
/// トークン単体ではスコア送信は通らない（送信時に署名検証が別途必要）。
pub async fn handle_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, GatewayError> {
    let wallet = require_field(body.wallet, "wallet")?;
    let game = require_field(body.game, "game")?;

    let session_token = state.sessions.issue(&wallet, &game)?;

    Ok(Json(SessionResponse { session_token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_helpers::test_state;

    /// 発行されたトークンが正しいクレームに検証されることを確認
    #[tokio::test]
    async fn test_issue_session_token() {
        let state = test_state();

        let result = handle_session(
            State(state.clone()),
            Json(SessionRequest {
                wallet: Some("W".to_string()),
                game: Some("snake".to_string()),
            }),
        )
        .await
        .unwrap();

        let claims = state.sessions.verify(&result.0.session_token).unwrap();
        assert_eq!(claims.wallet, "W");
        assert_eq!(claims.game, "snake");
    }

    /// wallet/gameの欠落がMissingFieldsになることを確認
    #[tokio::test]
    async fn test_missing_fields() {
        let state = test_state();

        let result = handle_session(
            State(state.clone()),
            Json(SessionRequest {
                wallet: Some("W".to_string()),
                game: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(GatewayError::MissingFields(_))));

        let result = handle_session(
            State(state),
            Json(SessionRequest {
                wallet: None,
                game: Some("snake".to_string()),
            }),
        )
        .await;
        assert!(matches!(result, Err(GatewayError::MissingFields(_))));
    }
}
