//! # Arcade Protocol Gateway
//!
//! ウォレット署名認証とスコア送信整合性プロトコルのHTTP/JSONゲートウェイ。
//!
//! ## 役割
//! - ウォレット所有証明（Ed25519署名）の検証
//! - (wallet, game)にスコープされた時限付きセッショントークンの発行・検証
//! - 検証を通過したスコアの記録とリーダーボード照会
//!
//! ## API エンドポイント
//! - `POST /register` — ウォレット登録（署名証明またはskip）
//! - `POST /session` — セッショントークン発行
//! - `POST /score` — スコア送信（トークン+署名の二重検証）
//! - `GET /bestscore` — (wallet, game)の最高スコア
//! - `GET /leaderboard` — ゲーム別ランキング（降順、最大50件）
//! - `GET /user` — 登録状態の照会

mod config;
mod endpoints;
mod error;
mod session;
mod storage;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use config::{AppState, GatewayConfig};
use endpoints::{
    handle_bestscore, handle_leaderboard, handle_register, handle_score, handle_session,
    handle_user,
};
use session::SessionService;
use storage::MemoryStore;

/// 許可オリジンリストからCORSレイヤーを構築する。
/// リストが空か"*"を含む場合はすべてのオリジンを許可する。
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env()?;

    let state = Arc::new(AppState {
        store: Box::new(MemoryStore::new()),
        sessions: SessionService::new(config.session_secret.clone()),
    });

    let app = axum::Router::new()
        .route("/register", axum::routing::post(handle_register))
        .route("/session", axum::routing::post(handle_session))
        .route("/score", axum::routing::post(handle_score))
        .route("/bestscore", axum::routing::get(handle_bestscore))
        .route("/leaderboard", axum::routing::get(handle_leaderboard))
        .route("/user", axum::routing::get(handle_user))
        .layer(build_cors_layer(&config.allowed_origins))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
