//! # エンドポイントテスト用共通ヘルパー
//!
//! submit, s3_signテストで共有するモックとリクエスト構築関数。

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use sm_upload_crypto::SigningSecret;
use sm_upload_types::UploadTarget;
use tower::ServiceExt;

use crate::config::{GatewayConfig, GatewayState};
use crate::error::GatewayError;
use crate::storage::ObjectStore;

/// テスト用の署名シークレット
pub const TEST_SECRET: &str = "testsecret";

/// アップロードされた内容をメモリに記録するモックObjectStore。
#[derive(Default)]
pub struct MockObjectStore {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    fn bucket_name(&self) -> &str {
        "test-bucket"
    }

    async fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
    ) -> Result<UploadTarget, GatewayError> {
        if self.fail {
            return Err(GatewayError::Storage("mock failure".to_string()));
        }
        let content = tokio::fs::read(local_path).await.unwrap();
        self.uploads.lock().unwrap().push((key.to_string(), content));
        Ok(UploadTarget {
            bucket: self.bucket_name().to_string(),
            key: key.to_string(),
        })
    }
}

/// テスト用GatewayStateを構築するヘルパー。
/// `static_dir` にはindex.htmlを書き込んでおく。
pub fn test_state(
    root: &Path,
    secret: Option<&str>,
    store: Arc<MockObjectStore>,
) -> Arc<GatewayState> {
    let static_dir = root.join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<html>upload</html>").unwrap();

    let config = GatewayConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        scratch_dir: root.join("scratch"),
        static_dir,
        signing_secret: secret.map(|s| SigningSecret::new(s).unwrap()),
    };
    Arc::new(GatewayState::new(config, Box::new(SharedStore(store))))
}

/// `Arc<MockObjectStore>` をテスト側と共有するためのラッパー
struct SharedStore(Arc<MockObjectStore>);

#[async_trait::async_trait]
impl ObjectStore for SharedStore {
    fn bucket_name(&self) -> &str {
        self.0.bucket_name()
    }

    async fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
    ) -> Result<UploadTarget, GatewayError> {
        self.0.upload_file(local_path, key).await
    }
}

/// ルーターに1リクエストを送り、レスポンスを返す。
pub async fn send(state: Arc<GatewayState>, request: Request<Body>) -> Response<Body> {
    crate::build_router(state).oneshot(request).await.unwrap()
}

/// レスポンスボディを全て読み込む。
pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// 一時ディレクトリのパス
pub fn scratch_path(root: &Path) -> PathBuf {
    root.join("scratch")
}
