//! # Arcade Protocol 共有型定義
//!
//! Gatewayの各エンドポイントとレコードストアが共有するデータ構造を
//! Rust構造体として提供する。
//!
//! ## エンコーディング規則
//! - Base58: ウォレットアドレス（Ed25519公開鍵）、クライアント署名
//! - Base64: セッショントークン（クレームと完全性タグ）
//! - JSONワイヤーフォーマットはcamelCase（`sessionToken`等）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 永続レコード
// ---------------------------------------------------------------------------

/// 登録済みユーザー。ウォレットごとに最初の登録時に一度だけ作成され、
/// 以後更新も削除もされない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Base58エンコードされたウォレットアドレス（システム全体で一意）
    pub wallet: String,
    /// 表示名。登録時にのみ設定される（後から変更不可）
    pub name: String,
    /// 登録時刻（UNIXタイムスタンプ、秒）
    pub created_at: u64,
}

/// スコアレコード。送信が検証を通過するたびに1件追記される。
/// 追記専用であり、更新・削除・重複排除は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Base58エンコードされたウォレットアドレス
    pub wallet: String,
    /// ゲーム識別子
    pub game: String,
    /// スコア値
    pub score: i64,
    /// 送信時点のユーザー表示名の非正規化コピー（未登録なら空文字列）
    pub name: String,
    /// 記録時刻（UNIXタイムスタンプ、秒）
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// セッショントークン
// ---------------------------------------------------------------------------

/// セッショントークンに埋め込まれるクレーム。
/// トークン自体が自己検証型のため、どこにも永続化されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// トークンが対象とするウォレットアドレス
    pub wallet: String,
    /// トークンが対象とするゲーム識別子
    pub game: String,
    /// 発行時刻（UNIXタイムスタンプ、秒）
    pub issued_at: u64,
    /// 失効時刻（UNIXタイムスタンプ、秒）。この時刻ちょうども失効扱い
    pub expires_at: u64,
}

// ---------------------------------------------------------------------------
// 登録証明
// ---------------------------------------------------------------------------

/// 登録時の鍵所有証明。
///
/// `Skipped`は意図的な低保証パスであり、登録のみのフローで使用される。
/// 重要な操作はスコア送信側のより厳格な検証で保護される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationProof {
    /// 署名検証を明示的にスキップする
    Skipped,
    /// 署名付き証明。messageに対するsignatureをウォレット公開鍵で検証する
    Signed {
        /// 署名対象のメッセージ（内容はクライアントとの合意による任意文字列）
        message: String,
        /// Base58エンコードされたEd25519署名
        signature: String,
    },
}

// ---------------------------------------------------------------------------
// リクエスト / レスポンス
// ---------------------------------------------------------------------------

/// POST /register リクエストボディ。
/// 必須フィールドの欠落はデシリアライズエラーではなく400として扱うため、
/// すべてOptionで受ける。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub wallet: Option<String>,
    pub signature: Option<String>,
    pub message: Option<String>,
    pub name: Option<String>,
    /// trueの場合、署名検証なしで登録する（明示的なスキップフラグ）
    pub skip: Option<bool>,
}

/// POST /register レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: User,
}

/// POST /session リクエストボディ。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    pub wallet: Option<String>,
    pub game: Option<String>,
}

/// POST /session レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// 発行されたセッショントークン（不透明な文字列）
    pub session_token: String,
}

/// POST /score リクエストボディ。6フィールドすべて必須。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmitRequest {
    pub wallet: Option<String>,
    pub game: Option<String>,
    pub score: Option<i64>,
    pub session_token: Option<String>,
    /// Base58エンコードされたクライアント署名
    pub client_signature: Option<String>,
    /// クライアントが署名したメッセージ
    pub signature_message: Option<String>,
}

/// POST /score レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSubmitResponse {
    pub success: bool,
}

/// GET /bestscore レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScoreResponse {
    /// 該当（wallet, game）の最高スコア。記録がなければnull
    pub best: Option<ScoreRecord>,
}

/// GET /leaderboard レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// スコア降順、最大50件
    pub scores: Vec<ScoreRecord>,
}

/// GET /user レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
