//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。

use std::path::PathBuf;

use sm_upload_crypto::{CryptoError, SigningSecret};
use sm_upload_types::{DEFAULT_LISTEN_ADDR, DEFAULT_SCRATCH_DIR};

use crate::scratch::ScratchDir;
use crate::signer::UploadSigner;
use crate::storage::ObjectStore;

/// 起動時に環境変数から読み込む設定。
#[derive(Debug)]
pub struct GatewayConfig {
    /// 待ち受けアドレス
    pub listen_addr: String,
    /// ローカル作業ディレクトリのルート
    pub scratch_dir: PathBuf,
    /// 静的ファイルのディレクトリ（index.htmlを含む）
    pub static_dir: PathBuf,
    /// 署名用シークレット。未設定の場合、署名エンドポイントは常に失敗する。
    pub signing_secret: Option<SigningSecret>,
}

impl GatewayConfig {
    /// 環境変数から構築する。
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let scratch_dir = std::env::var("SCRATCH_DIR")
            .unwrap_or_else(|_| DEFAULT_SCRATCH_DIR.to_string())
            .into();
        let static_dir = std::env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string())
            .into();

        let signing_secret = match std::env::var_os("AWS_CLIENT_SECRET_KEY")
            .map(|v| SigningSecret::new(v.into_encoded_bytes()))
        {
            Some(Ok(secret)) => Some(secret),
            Some(Err(CryptoError::MissingSecret)) | None => {
                tracing::error!(
                    "AWS_CLIENT_SECRET_KEYが未設定です。/s3/sign は利用できません"
                );
                None
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "署名用シークレットの読み込みに失敗");
                None
            }
        };

        Self {
            listen_addr,
            scratch_dir,
            static_dir,
            signing_secret,
        }
    }
}

/// Gatewayの共有状態。
pub struct GatewayState {
    /// アップロード署名器（シークレット未設定の場合はNone）
    pub signer: Option<UploadSigner>,
    /// メタデータのアップロード先
    pub object_store: Box<dyn ObjectStore>,
    /// ローカル作業ディレクトリ
    pub scratch: ScratchDir,
    /// 静的ファイルのディレクトリ
    pub static_dir: PathBuf,
}

impl GatewayState {
    pub fn new(config: GatewayConfig, object_store: Box<dyn ObjectStore>) -> Self {
        Self {
            signer: config.signing_secret.map(UploadSigner::new),
            object_store,
            scratch: ScratchDir::new(config.scratch_dir),
            static_dir: config.static_dir,
        }
    }
}
