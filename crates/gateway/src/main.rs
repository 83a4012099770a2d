//! # SM Upload Gateway
//!
//! ブラウザからのデータセット投稿を受け付けるWebアップロードGateway。
//!
//! ## 役割
//! - トップページの配信とセッションCookieの発行
//! - メタデータJSONのローカル保存とオブジェクトストアへの転送
//! - ブラウザからオブジェクトストアへ直接アップロードするための署名発行
//!
//! ## API エンドポイント
//! - `GET /` — トップページ + セッションCookie発行
//! - `GET /static/*` — 静的ファイル
//! - `POST /submit` — メタデータの保存とアップロード
//! - `POST /s3/sign` — ポリシードキュメント / RESTヘッダーへの署名

mod config;
mod endpoints;
mod error;
mod scratch;
mod session;
mod signer;
mod storage;

use std::sync::Arc;

use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{GatewayConfig, GatewayState};
use crate::endpoints::{handle_index, handle_s3_sign, handle_submit};

/// ルーターを構築する。
pub(crate) fn build_router(state: Arc<GatewayState>) -> axum::Router {
    let static_files = ServeDir::new(&state.static_dir);

    axum::Router::new()
        .route("/", get(handle_index))
        .route("/submit", post(handle_submit))
        .route("/s3/sign", post(handle_s3_sign))
        .nest_service("/static", static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    let listen_addr = config.listen_addr.clone();

    // オブジェクトストア（S3互換）
    let object_store = storage::S3ObjectStore::from_env()?;
    tracing::info!(
        bucket = %storage::ObjectStore::bucket_name(&object_store),
        "オブジェクトストアを設定"
    );

    let state = Arc::new(GatewayState::new(config, Box::new(object_store)));

    state.scratch.ensure_root().await?;
    tracing::info!(
        scratch_dir = %state.scratch.root().display(),
        static_dir = %state.static_dir.display(),
        signing_enabled = state.signer.is_some(),
        "作業ディレクトリを準備"
    );

    let app = build_router(state);

    tracing::info!("Gatewayを {} で起動します", listen_addr);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    use crate::endpoints::test_helpers::{read_body, send, test_state, TEST_SECRET};
    use crate::session::SessionId;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// GET / がindex.htmlとセッションCookieを返すことを確認
    #[tokio::test]
    async fn test_index_issues_session_cookie() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Some(TEST_SECRET), Arc::default());

        let response = send(state, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let value = cookie
            .strip_prefix("session_id=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert!(SessionId::parse(value).is_ok());

        let body = String::from_utf8(read_body(response).await).unwrap();
        assert_eq!(body, "<html>upload</html>");
    }

    /// 訪問ごとに異なるセッションIDが発行されることを確認
    #[tokio::test]
    async fn test_index_issues_fresh_session_per_visit() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Some(TEST_SECRET), Arc::default());

        let first = send(state.clone(), get("/")).await;
        let second = send(state, get("/")).await;
        assert_ne!(
            first.headers().get(header::SET_COOKIE),
            second.headers().get(header::SET_COOKIE)
        );
    }

    #[tokio::test]
    async fn test_index_without_page_is_server_error() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Some(TEST_SECRET), Arc::default());
        std::fs::remove_file(state.static_dir.join("index.html")).unwrap();

        let response = send(state, get("/")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = String::from_utf8(read_body(response).await).unwrap();
        assert!(!body.contains(&tmp.path().display().to_string()));
        assert!(!body.contains("index.html"));
    }

    /// /static/ 配下のファイルが配信されることを確認
    #[tokio::test]
    async fn test_static_files_served() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Some(TEST_SECRET), Arc::default());
        std::fs::write(state.static_dir.join("app.js"), "console.log(1);").unwrap();

        let response = send(state, get("/static/app.js")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, b"console.log(1);");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path(), Some(TEST_SECRET), Arc::default());

        let response = send(state, get("/nonexistent")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
