//! # S3互換オブジェクトストア実装
//!
//! AWS S3, MinIO 等のS3互換APIを使用する。

use std::path::Path;

use sm_upload_types::{UploadTarget, DEFAULT_BUCKET};

use super::ObjectStore;
use crate::error::GatewayError;

/// S3互換ストレージによるObjectStore実装。
pub struct S3ObjectStore {
    bucket: s3::Bucket,
    bucket_name: String,
}

impl S3ObjectStore {
    pub fn new(bucket: s3::Bucket, bucket_name: impl Into<String>) -> Self {
        Self {
            bucket,
            bucket_name: bucket_name.into(),
        }
    }

    /// 環境変数から構築する。
    ///
    /// `S3_ENDPOINT` が設定されていればS3互換エンドポイント（path-style）、
    /// なければ `AWS_REGION` のAWS S3を使用する。
    /// `S3_ACCESS_KEY` / `S3_SECRET_KEY` が未設定の場合はAWS標準の認証情報チェーンに従う。
    pub fn from_env() -> anyhow::Result<Self> {
        let bucket_name =
            std::env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());
        let region_name = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let access_key = std::env::var("S3_ACCESS_KEY").ok();
        let secret_key = std::env::var("S3_SECRET_KEY").ok();

        let credentials = s3::creds::Credentials::new(
            access_key.as_deref(),
            secret_key.as_deref(),
            None,
            None,
            None,
        )?;

        let bucket = match std::env::var("S3_ENDPOINT").ok() {
            Some(endpoint) => {
                tracing::info!(s3_endpoint = %endpoint, "S3互換エンドポイントを使用");
                let region = s3::Region::Custom {
                    region: region_name,
                    endpoint,
                };
                s3::Bucket::new(&bucket_name, region, credentials)?.with_path_style()
            }
            None => {
                let region: s3::Region = region_name.parse()?;
                s3::Bucket::new(&bucket_name, region, credentials)?
            }
        };

        Ok(Self::new(*bucket, bucket_name))
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    async fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
    ) -> Result<UploadTarget, GatewayError> {
        let content = tokio::fs::read(local_path).await.map_err(|e| {
            GatewayError::Internal(format!("アップロード元ファイルの読み込みに失敗: {e}"))
        })?;

        let response = self
            .bucket
            .put_object_with_content_type(key, &content, "application/json")
            .await
            .map_err(|e| GatewayError::Storage(format!("アップロードに失敗: {e}")))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(GatewayError::Storage(format!(
                "オブジェクトストアがエラーを返しました: HTTP {status}"
            )));
        }

        Ok(UploadTarget {
            bucket: self.bucket_name.clone(),
            key: key.to_string(),
        })
    }
}
