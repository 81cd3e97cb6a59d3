//! # Arcade Protocol 暗号処理
//!
//! ウォレット署名検証とセッショントークン完全性タグの暗号プリミティブを実装する。
//!
//! ## 暗号アルゴリズム
//! | 用途 | アルゴリズム |
//! |------|------------|
//! | ウォレット署名 | Ed25519（detached署名、生メッセージバイト列が対象） |
//! | トークン完全性 | HMAC-SHA256 |
//!
//! ウォレットアドレスは32バイトEd25519公開鍵のBase58表現、
//! クライアント署名は64バイトdetached署名のBase58表現。
//! デコード失敗（不正なBase58、長さ不一致、非正準な公開鍵）は
//! すべて`CryptoError::Decode`として返し、決してパニックしない。

use base58::FromBase58;
use ed25519_dalek::Verifier;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub use ed25519_dalek::{
    Signature as Ed25519Signature, Signer, SigningKey as Ed25519SigningKey,
    VerifyingKey as Ed25519VerifyingKey,
};

/// 暗号処理のエラー型
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Base58デコード失敗、または鍵・署名の長さ不一致
    #[error("デコードに失敗しました: {0}")]
    Decode(String),
    /// Ed25519署名検証エラー
    #[error("Ed25519署名検証に失敗しました")]
    SignatureVerify,
    /// HMAC完全性タグの不一致
    #[error("完全性タグの検証に失敗しました")]
    TagMismatch,
}

type HmacSha256 = Hmac<Sha256>;

/// Base58文字列からEd25519公開鍵をデコードする。
///
/// ウォレットアドレスはこの公開鍵のBase58表現そのものであり、
/// 32バイト以外の長さや非正準な点はデコード失敗として扱う。
pub fn decode_wallet_pubkey(wallet: &str) -> Result<Ed25519VerifyingKey, CryptoError> {
    let bytes = wallet
        .from_base58()
        .map_err(|e| CryptoError::Decode(format!("不正なBase58公開鍵: {e:?}")))?;
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|v: Vec<u8>| CryptoError::Decode(format!("公開鍵長が不正: {}バイト", v.len())))?;
    Ed25519VerifyingKey::from_bytes(&arr)
        .map_err(|_| CryptoError::Decode("非正準なEd25519公開鍵".to_string()))
}

/// Base58文字列からEd25519 detached署名をデコードする。
pub fn decode_signature(signature: &str) -> Result<Ed25519Signature, CryptoError> {
    let bytes = signature
        .from_base58()
        .map_err(|e| CryptoError::Decode(format!("不正なBase58署名: {e:?}")))?;
    let arr: [u8; 64] = bytes
        .try_into()
        .map_err(|v: Vec<u8>| CryptoError::Decode(format!("署名長が不正: {}バイト", v.len())))?;
    Ok(Ed25519Signature::from_bytes(&arr))
}

/// Ed25519による署名生成。
pub fn ed25519_sign(signing_key: &Ed25519SigningKey, message: &[u8]) -> Ed25519Signature {
    signing_key.sign(message)
}

/// Ed25519による署名検証。
pub fn ed25519_verify(
    verifying_key: &Ed25519VerifyingKey,
    message: &[u8],
    signature: &Ed25519Signature,
) -> Result<(), CryptoError> {
    verifying_key
        .verify(message, signature)
        .map_err(|_| CryptoError::SignatureVerify)
}

/// ウォレット署名の検証。
///
/// `wallet`（Base58公開鍵）と`signature`（Base58 detached署名）をデコードし、
/// 生の`message`バイト列に対して検証する。成立するのは、`wallet`に対応する
/// 秘密鍵がちょうど`message`に署名した場合のみ。メッセージ・署名・鍵の
/// いずれか1ビットでも異なれば失敗する。
pub fn verify_wallet_signature(
    message: &[u8],
    signature: &str,
    wallet: &str,
) -> Result<(), CryptoError> {
    let verifying_key = decode_wallet_pubkey(wallet)?;
    let sig = decode_signature(signature)?;
    ed25519_verify(&verifying_key, message, &sig)
}

/// HMAC-SHA256完全性タグを計算する。
pub fn hmac_sha256_tag(secret: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret)
        .expect("HMACは任意長の鍵を受け付ける");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// HMAC-SHA256完全性タグを検証する。比較は定数時間で行われる。
pub fn hmac_sha256_verify(secret: &[u8], data: &[u8], tag: &[u8]) -> Result<(), CryptoError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .expect("HMACは任意長の鍵を受け付ける");
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| CryptoError::TagMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base58::ToBase58;

    fn test_keypair() -> (Ed25519SigningKey, String) {
        let signing_key = Ed25519SigningKey::generate(&mut rand::rngs::OsRng);
        let wallet = signing_key.verifying_key().to_bytes().to_base58();
        (signing_key, wallet)
    }

    /// 正しい鍵・メッセージ・署名の組で検証が成功することを確認
    #[test]
    fn test_wallet_signature_roundtrip() {
        let (signing_key, wallet) = test_keypair();
        let message = b"arbitrary client message";
        let signature = ed25519_sign(&signing_key, message).to_bytes().to_base58();

        assert!(verify_wallet_signature(message, &signature, &wallet).is_ok());
    }

    /// メッセージの1バイト変化で検証が失敗することを確認
    #[test]
    fn test_flipped_message_fails() {
        let (signing_key, wallet) = test_keypair();
        let message = b"arbitrary client message".to_vec();
        let signature = ed25519_sign(&signing_key, &message).to_bytes().to_base58();

        let mut tampered = message.clone();
        tampered[0] ^= 0x01;
        assert!(matches!(
            verify_wallet_signature(&tampered, &signature, &wallet),
            Err(CryptoError::SignatureVerify)
        ));
    }

    /// 署名の1バイト変化で検証が失敗することを確認
    #[test]
    fn test_flipped_signature_fails() {
        let (signing_key, wallet) = test_keypair();
        let message = b"arbitrary client message";
        let mut sig_bytes = ed25519_sign(&signing_key, message).to_bytes();
        sig_bytes[10] ^= 0x01;
        let signature = sig_bytes.to_base58();

        assert!(verify_wallet_signature(message, &signature, &wallet).is_err());
    }

    /// 別の鍵で検証が失敗することを確認
    #[test]
    fn test_wrong_key_fails() {
        let (signing_key, _) = test_keypair();
        let (_, other_wallet) = test_keypair();
        let message = b"arbitrary client message";
        let signature = ed25519_sign(&signing_key, message).to_bytes().to_base58();

        assert!(verify_wallet_signature(message, &signature, &other_wallet).is_err());
    }

    /// 不正なBase58がDecodeエラーになる（パニックしない）ことを確認
    #[test]
    fn test_malformed_base58_is_decode_error() {
        let (signing_key, wallet) = test_keypair();
        let message = b"m";
        let signature = ed25519_sign(&signing_key, message).to_bytes().to_base58();

        // 0はBase58アルファベット外
        assert!(matches!(
            verify_wallet_signature(message, "0invalid0", &wallet),
            Err(CryptoError::Decode(_))
        ));
        assert!(matches!(
            verify_wallet_signature(message, &signature, "0invalid0"),
            Err(CryptoError::Decode(_))
        ));
    }

    /// 長さ不一致の鍵・署名がDecodeエラーになることを確認
    #[test]
    fn test_wrong_length_is_decode_error() {
        let short_key = [1u8; 16].to_base58();
        assert!(matches!(
            decode_wallet_pubkey(&short_key),
            Err(CryptoError::Decode(_))
        ));

        let short_sig = [1u8; 32].to_base58();
        assert!(matches!(
            decode_signature(&short_sig),
            Err(CryptoError::Decode(_))
        ));
    }

    /// HMACタグの計算と検証のラウンドトリップを確認
    #[test]
    fn test_hmac_tag_roundtrip() {
        let secret = b"test-secret";
        let data = b"claims bytes";
        let tag = hmac_sha256_tag(secret, data);

        assert!(hmac_sha256_verify(secret, data, &tag).is_ok());
    }

    /// 改竄されたデータ・別の鍵でHMAC検証が失敗することを確認
    #[test]
    fn test_hmac_tag_mismatch() {
        let secret = b"test-secret";
        let data = b"claims bytes";
        let tag = hmac_sha256_tag(secret, data);

        assert!(matches!(
            hmac_sha256_verify(secret, b"claims byteS", &tag),
            Err(CryptoError::TagMismatch)
        ));
        assert!(matches!(
            hmac_sha256_verify(b"other-secret", data, &tag),
            Err(CryptoError::TagMismatch)
        ));
    }
}
