//! # レコードストア
//!
//! UsersとScoresの2コレクションを持つ外部レコードストアの
//! 抽象インターフェースとインメモリ実装。
//!
//! - Users: walletで一意。作成のみ（更新・削除なし）
//! - Scores: 一意制約なし。追記専用
//!
//! セッショントークンは自己検証型のため、ここには一切保存されない。

use std::collections::HashMap;

use arcade_types::{ScoreRecord, User};
use tokio::sync::RwLock;

use crate::error::GatewayError;

/// レコードストアの抽象インターフェース。
///
/// Gateway運用者はインメモリ実装のほか、ドキュメント単位の書き込みが
/// アトミックな任意のバックエンドを実装として選択できる。
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// ユーザーを作成する。同じwalletのユーザーが既に存在する場合は
    /// 何も書き込まず、既存のユーザーをそのまま返す（冪等）。
    /// 存在確認と作成は単一のアトミックな操作として行われる。
    async fn create_user(&self, user: User) -> Result<User, GatewayError>;

    /// walletでユーザーを検索する。
    async fn find_user(&self, wallet: &str) -> Result<Option<User>, GatewayError>;

    /// スコアレコードを追記する。
    async fn insert_score(&self, record: ScoreRecord) -> Result<(), GatewayError>;

    /// (wallet, game)の最高スコアを返す。同点の場合は先に記録されたものを返す。
    async fn best_score(
        &self,
        wallet: &str,
        game: &str,
    ) -> Result<Option<ScoreRecord>, GatewayError>;

    /// gameのスコアをスコア降順で最大limit件返す。
    async fn top_scores(&self, game: &str, limit: usize)
        -> Result<Vec<ScoreRecord>, GatewayError>;
}

/// インメモリのレコードストア実装。
///
/// ロックはストア自身のドキュメント単位アトミシティ契約を満たすためのもので、
/// リクエスト間の直列化点はここ以外に存在しない。
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    scores: RwLock<Vec<ScoreRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, GatewayError> {
        let mut users = self.users.write().await;
        Ok(users.entry(user.wallet.clone()).or_insert(user).clone())
    }

    async fn find_user(&self, wallet: &str) -> Result<Option<User>, GatewayError> {
        Ok(self.users.read().await.get(wallet).cloned())
    }

    async fn insert_score(&self, record: ScoreRecord) -> Result<(), GatewayError> {
        self.scores.write().await.push(record);
        Ok(())
    }

    async fn best_score(
        &self,
        wallet: &str,
        game: &str,
    ) -> Result<Option<ScoreRecord>, GatewayError> {
        let scores = self.scores.read().await;
        let mut best: Option<&ScoreRecord> = None;
        for record in scores.iter() {
            if record.wallet != wallet || record.game != game {
                continue;
            }
            // 同点では先に記録されたレコードを保持する
            if best.map_or(true, |b| record.score > b.score) {
                best = Some(record);
            }
        }
        Ok(best.cloned())
    }

    async fn top_scores(
        &self,
        game: &str,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, GatewayError> {
        let scores = self.scores.read().await;
        let mut ranked: Vec<ScoreRecord> = scores
            .iter()
            .filter(|r| r.game == game)
            .cloned()
            .collect();
        // 安定ソートのため、同点は記録順を維持する
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);
        Ok(ranked)
    }
}
