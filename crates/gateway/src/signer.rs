//! # アップロード署名器
//!
//! ブラウザがオブジェクトストアへ直接アップロードするための署名を発行する。
//!
//! ## 署名モード
//! - ヘッダー署名（チャンク / REST アップロード）:
//!   `signature = base64(HMAC-SHA1(secret, headers))`
//! - ポリシー署名（ブラウザフォームアップロード）:
//!   `policy = base64(body)`, `signature = base64(HMAC-SHA1(secret, policy))`
//!
//! 両モードの非対称性（ヘッダーは生バイト列、ポリシーはBase64後の文字列に署名）は
//! 外部検証側の方式に合わせたもので、統合してはならない。

use base64::Engine;
use serde_json::{Map, Value};
use sm_upload_crypto::{b64, sign_base64, CryptoError, SigningSecret};
use sm_upload_types::S3SignResponse;

/// 署名処理のエラー型
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// ボディがJSONオブジェクトではない、またはheadersが文字列ではない
    #[error("不正な署名リクエスト: {0}")]
    MalformedRequest(String),
    /// 署名用シークレットが利用できない
    #[error("署名用シークレットが設定されていません")]
    MissingSecret,
    /// その他の暗号処理エラー
    #[error("署名計算に失敗: {0}")]
    Crypto(CryptoError),
}

impl From<CryptoError> for SignError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::MissingSecret => SignError::MissingSecret,
            other => SignError::Crypto(other),
        }
    }
}

/// リクエストボディから一度だけ決定される署名モード。
#[derive(Debug, PartialEq, Eq)]
pub enum SignMode<'a> {
    /// `headers` フィールドの値をそのまま署名する
    Headers(String),
    /// リクエストボディ全体をポリシードキュメントとして署名する
    Policy(&'a [u8]),
}

impl<'a> SignMode<'a> {
    /// ボディをJSONオブジェクトとしてパースし、署名モードを決定する。
    ///
    /// `headers` が真値（空でない文字列等）ならヘッダー署名、
    /// 欠落または偽値（null, false, 0, "", [], {}）ならポリシー署名。
    pub fn from_body(body: &'a [u8]) -> Result<Self, SignError> {
        let mut payload: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|e| SignError::MalformedRequest(format!("JSONオブジェクトのパースに失敗: {e}")))?;

        match payload.remove("headers") {
            Some(Value::String(headers)) if !headers.is_empty() => Ok(SignMode::Headers(headers)),
            Some(value) if is_truthy(&value) => Err(SignError::MalformedRequest(
                "headersは文字列である必要があります".to_string(),
            )),
            _ => Ok(SignMode::Policy(body)),
        }
    }
}

/// JSON値の真偽判定
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// アップロード署名器。シークレットは構築時に注入され、以後変更されない。
#[derive(Debug, Clone)]
pub struct UploadSigner {
    secret: SigningSecret,
}

impl UploadSigner {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// リクエストボディに署名する。
    pub fn sign(&self, body: &[u8]) -> Result<S3SignResponse, SignError> {
        match SignMode::from_body(body)? {
            SignMode::Headers(headers) => {
                tracing::debug!(mode = "headers", "ヘッダー署名を発行");
                self.sign_headers(headers.as_bytes())
            }
            SignMode::Policy(document) => {
                tracing::debug!(mode = "policy", "ポリシー署名を発行");
                self.sign_policy(document)
            }
        }
    }

    /// チャンクアップロード用ヘッダーブロックへの署名
    fn sign_headers(&self, headers: &[u8]) -> Result<S3SignResponse, SignError> {
        Ok(S3SignResponse {
            policy: None,
            signature: sign_base64(&self.secret, headers)?,
        })
    }

    /// ブラウザフォームアップロード用ポリシードキュメントへの署名
    fn sign_policy(&self, document: &[u8]) -> Result<S3SignResponse, SignError> {
        let policy = b64().encode(document);
        let signature = sign_base64(&self.secret, policy.as_bytes())?;
        Ok(S3SignResponse {
            policy: Some(policy),
            signature,
        })
    }
}
