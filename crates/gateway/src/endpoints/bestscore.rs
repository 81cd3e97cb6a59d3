//! # GET /bestscore
//!
//! (wallet, game)の最高スコア照会。読み取り専用の単純なプロジェクション。

use std::sync::Arc;

use arcade_types::BestScoreResponse;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::AppState;
use crate::error::GatewayError;

/// GET /bestscore クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct BestScoreParams {
    pub wallet: String,
    pub game: String,
}

/// GET /bestscore?wallet&game — 最高スコア照会。記録がなければnullを返す。
pub async fn handle_bestscore(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BestScoreParams>,
) -> Result<Json<BestScoreResponse>, GatewayError> {
    let best = state.store.best_score(&params.wallet, &params.game).await?;
    Ok(Json(BestScoreResponse { best }))
}
