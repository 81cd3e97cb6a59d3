//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//!
//! ## 設定項目
//! - `SESSION_SIGNING_SECRET` — セッショントークン署名用シークレット（16進数）
//! - `ALLOWED_ORIGINS` — CORSで許可するオリジン（カンマ区切り）
//! - `PORT` — 待ち受けポート（デフォルト3000）

use crate::session::SessionService;
use crate::storage::RecordStore;

/// Gatewayの起動設定。
pub struct GatewayConfig {
    /// セッショントークン署名用シークレット。
    /// 起動時に一度だけ初期化され、以後変更されない
    pub session_secret: Vec<u8>,
    /// CORSで許可するフロントエンドオリジン。
    /// 空または"*"を含む場合はすべてのオリジンを許可する
    pub allowed_origins: Vec<String>,
    /// 待ち受けポート
    pub port: u16,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = match std::env::var("SESSION_SIGNING_SECRET") {
            Ok(secret_hex) => hex::decode(&secret_hex).map_err(|_| {
                anyhow::anyhow!("SESSION_SIGNING_SECRETは16進数である必要があります")
            })?,
            Err(_) => {
                // 開発環境用: ランダムシークレットを生成（再起動で全トークンが無効になる）
                tracing::warn!(
                    "SESSION_SIGNING_SECRETが未設定です。ランダムシークレットを生成します（開発環境用）"
                );
                let mut secret = vec![0u8; 32];
                rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut secret);
                secret
            }
        };

        let allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let port = std::env::var("PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()
            .map_err(|_| anyhow::anyhow!("PORTは数値である必要があります"))?
            .unwrap_or(3000);

        Ok(Self {
            session_secret,
            allowed_origins,
            port,
        })
    }
}

/// Gatewayの共有状態。
///
/// すべての操作はリクエストスコープで独立しており、共有されるのは
/// 読み取り専用のシークレットとストアハンドルのみ。
pub struct AppState {
    /// レコードストア（トレイトで抽象化）
    pub store: Box<dyn RecordStore>,
    /// セッショントークンサービス
    pub sessions: SessionService,
}
