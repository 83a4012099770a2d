//! # SM Upload 共有型定義
//!
//! Gatewayとテストで共有するワイヤ型と定数。
//!
//! ## エンコーディング規則
//! - Base64: ポリシードキュメント、HMAC署名（Standard、パディングあり）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 定数
// ---------------------------------------------------------------------------

/// セッションIDを保持するCookie名
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// セッションごとに1つだけ書き込まれるメタデータファイル名
pub const METADATA_FILE_NAME: &str = "meta.json";

/// メタデータのアップロード先バケット（既定値）
pub const DEFAULT_BUCKET: &str = "sm-engine-upload";

/// ローカル作業ディレクトリ（既定値）
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// 待ち受けアドレス（既定値）
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9777";

// ---------------------------------------------------------------------------
// POST /s3/sign
// ---------------------------------------------------------------------------

/// POST /s3/sign のレスポンス。
///
/// - ポリシー署名モード: `{"policy": "<base64>", "signature": "<base64>"}`
/// - ヘッダー署名モード: `{"signature": "<base64>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3SignResponse {
    /// Base64エンコードされたポリシードキュメント（ヘッダー署名モードでは省略）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Base64エンコードされたHMAC-SHA1署名
    pub signature: String,
}

// ---------------------------------------------------------------------------
// POST /submit
// ---------------------------------------------------------------------------

/// メタデータファイルのアップロード先。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    /// バケット名
    pub bucket: String,
    /// オブジェクトキー (`<session_id>/meta.json`)
    pub key: String,
}
