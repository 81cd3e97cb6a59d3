//! # Gatewayエンドポイント

pub mod bestscore;
pub mod leaderboard;
pub mod register;
pub mod score;
pub mod session;
pub mod user;

#[cfg(test)]
pub mod test_helpers;

pub use bestscore::handle_bestscore;
pub use leaderboard::handle_leaderboard;
pub use register::handle_register;
pub use score::handle_score;
pub use session::handle_session;
pub use user::handle_user;

use crate::error::GatewayError;

/// 必須フィールドの存在と非空を確認する。
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingFields(name.to_string())),
    }
}
