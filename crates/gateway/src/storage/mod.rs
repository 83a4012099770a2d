//! # オブジェクトストア
//!
//! メタデータファイルのアップロード先の抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

#[cfg(feature = "vendor-aws")]
pub mod s3;

#[cfg(feature = "vendor-aws")]
pub use s3::S3ObjectStore;

use std::path::Path;

use sm_upload_types::UploadTarget;

use crate::error::GatewayError;

/// オブジェクトストアの抽象インターフェース。
///
/// AWS S3, MinIO 等のS3互換ストレージや、テスト用のインメモリ実装を差し替えられる。
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// アップロード先バケット名
    fn bucket_name(&self) -> &str;

    /// ローカルファイルを `key` にアップロードする。
    async fn upload_file(&self, local_path: &Path, key: &str)
        -> Result<UploadTarget, GatewayError>;
}
