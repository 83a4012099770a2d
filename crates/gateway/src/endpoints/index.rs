//! # GET /
//!
//! セッションCookieの発行とトップページの返却。

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::CookieJar;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::session::SessionId;

/// GET / — 新しいセッションIDをCookieで発行し、index.htmlを返す。
pub async fn handle_index(
    State(state): State<Arc<GatewayState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), GatewayError> {
    let index_path = state.static_dir.join("index.html");
    let page = tokio::fs::read_to_string(&index_path).await.map_err(|e| {
        GatewayError::Internal(format!("{} の読み込みに失敗: {e}", index_path.display()))
    })?;

    let session = SessionId::generate();
    tracing::debug!(session_id = %session, "セッションを発行");

    Ok((jar.add(session.to_cookie()), Html(page)))
}
