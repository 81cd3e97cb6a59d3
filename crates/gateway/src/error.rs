//! # Gateway エラー型
//!
//! 全エンドポイント共通のエラー分類とHTTPステータスへの対応付け。
//! 検証失敗はすべてリクエストに対して終局的であり、自動リトライはしない。

use axum::http::StatusCode;
use axum::Json;

/// Gatewayエラー型。
///
/// 暗号処理やトークンのデコード失敗はエンドポイント境界でこの型に
/// 正規化され、未処理の例外として伝播することはない。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 必須フィールドの欠落
    #[error("必須フィールドがありません: {0}")]
    MissingFields(String),
    /// ウォレット署名の検証失敗
    #[error("署名の検証に失敗しました")]
    InvalidSignature,
    /// セッショントークンの(wallet, game)とリクエストの不一致
    #[error("セッションの対象とリクエストが一致しません")]
    SessionMismatch,
    /// セッショントークンの期限切れ
    #[error("セッショントークンの有効期限が切れています")]
    ExpiredToken,
    /// セッショントークンの完全性検証失敗・不正な形式
    #[error("不正なセッショントークンです")]
    InvalidToken,
    /// レコードストア操作の失敗
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::MissingFields(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidSignature
            | GatewayError::SessionMismatch
            | GatewayError::ExpiredToken
            | GatewayError::InvalidToken => StatusCode::UNAUTHORIZED,
            GatewayError::Storage(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
