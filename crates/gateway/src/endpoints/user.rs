//! # GET /user
//!
//! ウォレットの登録状態照会。

use std::sync::Arc;

use arcade_types::UserInfoResponse;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::AppState;
use crate::error::GatewayError;

/// GET /user クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub wallet: String,
}

/// GET /user?wallet — 登録状態と表示名を返す。
pub async fn handle_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserParams>,
) -> Result<Json<UserInfoResponse>, GatewayError> {
    let user = state.store.find_user(&params.wallet).await?;

    Ok(Json(UserInfoResponse {
        registered: user.is_some(),
        name: user.map(|u| u.name),
    }))
}
