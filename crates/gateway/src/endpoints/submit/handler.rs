use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum_extra::extract::CookieJar;
use sm_upload_types::METADATA_FILE_NAME;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::session::SessionId;

/// POST /submit — メタデータの保存とアップロード。
pub async fn handle_submit(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Bytes,
) -> Result<([(header::HeaderName, &'static str); 1], String), GatewayError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("application/json") {
        tracing::warn!(content_type, "application/json以外のメタデータを拒否");
        return Err(GatewayError::UnsupportedMediaType);
    }

    let session = SessionId::from_jar(&jar)?;

    state.scratch.prepare_session_dir(&session).await?;
    let local_path = state.scratch.create_metadata_file(&session, &body).await?;

    let key = format!("{session}/{METADATA_FILE_NAME}");
    let target = match state.object_store.upload_file(&local_path, &key).await {
        Ok(target) => target,
        Err(e) => {
            state.scratch.discard_metadata_file(&session).await;
            return Err(e);
        }
    };
    tracing::info!(
        session_id = %session,
        bucket = %target.bucket,
        key = %target.key,
        "メタデータをアップロード"
    );

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        format!("Uploaded to S3: {}", String::from_utf8_lossy(&body)),
    ))
}
