use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use sm_upload_types::S3SignResponse;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// POST /s3/sign — ポリシードキュメントまたはRESTヘッダーへの署名。
///
/// 署名用シークレットが未設定の場合は500を返し、詳細は含めない。
pub async fn handle_s3_sign(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Result<Json<S3SignResponse>, GatewayError> {
    let signer = state.signer.as_ref().ok_or(GatewayError::MissingSecret)?;
    let response = signer.sign(&body)?;
    Ok(Json(response))
}
