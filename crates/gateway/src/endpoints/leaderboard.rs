//! # GET /leaderboard
//!
//! ゲーム別ランキング照会。読み取り専用の単純なプロジェクション。

use std::sync::Arc;

use arcade_types::LeaderboardResponse;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::AppState;
use crate::error::GatewayError;

/// リーダーボードの最大件数
pub const LEADERBOARD_LIMIT: usize = 50;

/// GET /leaderboard クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub game: String,
}

/// GET /leaderboard?game — スコア降順、最大50件のランキングを返す。
pub async fn handle_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, GatewayError> {
    let scores = state
        .store
        .top_scores(&params.game, LEADERBOARD_LIMIT)
        .await?;
    Ok(Json(LeaderboardResponse { scores }))
}
