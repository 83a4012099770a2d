//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。

use axum::http::StatusCode;

use crate::signer::SignError;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 不正なリクエスト（JSONパース失敗、セッションCookie不正）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// Content-Typeがapplication/jsonではない
    #[error("Error: Content-Type has to be 'application/json'")]
    UnsupportedMediaType,
    /// メタデータが既に書き込まれている
    #[error("{0}")]
    Conflict(String),
    /// 署名用シークレットが未設定。詳細はレスポンスに含めない。
    #[error("署名サービスは利用できません")]
    MissingSecret,
    /// オブジェクトストア操作に失敗
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<SignError> for GatewayError {
    fn from(e: SignError) -> Self {
        match e {
            SignError::MalformedRequest(msg) => GatewayError::BadRequest(msg),
            SignError::MissingSecret => GatewayError::MissingSecret,
            SignError::Crypto(_) => GatewayError::Internal("署名計算に失敗".to_string()),
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::MissingSecret | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Storage(_) => StatusCode::BAD_GATEWAY,
        };
        // サーバー側の詳細（パス、I/Oエラー）はログにのみ出力する
        let body = match &self {
            GatewayError::Internal(_) => {
                tracing::error!(error = %self, "リクエスト処理に失敗");
                "内部エラー".to_string()
            }
            GatewayError::Storage(_) => {
                tracing::error!(error = %self, "オブジェクトストアへのアップロードに失敗");
                "ストレージ操作に失敗".to_string()
            }
            _ => self.to_string(),
        };
        (status, body).into_response()
    }
}
