//! # SM Upload 暗号処理
//!
//! ブラウザからオブジェクトストアへの直接アップロードに必要な署名計算。
//!
//! ## 暗号アルゴリズム
//! | 用途 | アルゴリズム |
//! |------|------------|
//! | ポリシー署名 / ヘッダー署名 | HMAC-SHA1 |
//! | エンコード | Base64 (Standard) |

use std::fmt;

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// 暗号処理のエラー型
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// 署名用シークレットが未設定または空
    #[error("署名用シークレットが設定されていません")]
    MissingSecret,
    /// HMAC鍵の初期化に失敗
    #[error("HMAC鍵の初期化に失敗しました")]
    InvalidKey,
}

/// Base64エンジン（Standard）
pub fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// 署名用シークレット。
///
/// 起動時に一度だけ構築され、署名器に注入される。
/// `Debug` は値を出力せず、`Display` / `Serialize` は実装しない。
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// シークレットを構築する。空のバイト列は `MissingSecret`。
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CryptoError::MissingSecret);
        }
        Ok(Self(bytes))
    }

    fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// HMAC-SHA1の計算。
pub fn hmac_sha1(secret: &SigningSecret, message: &[u8]) -> Result<[u8; 20], CryptoError> {
    let mut mac =
        HmacSha1::new_from_slice(secret.expose()).map_err(|_| CryptoError::InvalidKey)?;
    mac.update(message);
    let result = mac.finalize().into_bytes();
    let mut digest = [0u8; 20];
    digest.copy_from_slice(&result);
    Ok(digest)
}

/// `base64(HMAC-SHA1(secret, message))` を返す。
pub fn sign_base64(secret: &SigningSecret, message: &[u8]) -> Result<String, CryptoError> {
    hmac_sha1(secret, message).map(|digest| b64().encode(digest))
}
