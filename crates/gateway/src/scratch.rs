//! # ローカル作業ディレクトリ
//!
//! セッションごとのメタデータファイルを `<root>/<session_id>/meta.json` に書き出す。
//! オブジェクトストアへのアップロード元として使用する。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sm_upload_types::METADATA_FILE_NAME;
use tokio::io::AsyncWriteExt;

use crate::error::GatewayError;
use crate::session::SessionId;

/// セッション単位の作業ディレクトリを管理する。
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ルートディレクトリを作成する（起動時に一度だけ呼ぶ）。
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub fn session_dir(&self, session: &SessionId) -> PathBuf {
        self.root.join(session.to_string())
    }

    pub fn metadata_path(&self, session: &SessionId) -> PathBuf {
        self.session_dir(session).join(METADATA_FILE_NAME)
    }

    /// セッションディレクトリを用意する。既に存在する場合は何もしない。
    pub async fn prepare_session_dir(&self, session: &SessionId) -> Result<PathBuf, GatewayError> {
        let dir = self.session_dir(session);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            GatewayError::Internal(format!("作業ディレクトリの作成に失敗: {e}"))
        })?;
        Ok(dir)
    }

    /// メタデータファイルを新規作成して書き込む。
    ///
    /// 1セッションにつき1回のみ。既存ファイルがあれば `Conflict`。
    pub async fn create_metadata_file(
        &self,
        session: &SessionId,
        data: &[u8],
    ) -> Result<PathBuf, GatewayError> {
        let path = self.metadata_path(session);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "メタデータファイルが既に存在");
                    GatewayError::Conflict("メタデータは既に送信済みです".to_string())
                }
                _ => GatewayError::Internal(format!("メタデータファイルの作成に失敗: {e}")),
            })?;

        let written = match file.write_all(data).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        drop(file);
        if let Err(e) = written {
            self.discard_metadata_file(session).await;
            return Err(GatewayError::Internal(format!("メタデータの書き込みに失敗: {e}")));
        }

        Ok(path)
    }

    /// 書き込み済みのメタデータファイルを削除し、同じセッションから再送信できるようにする。
    pub async fn discard_metadata_file(&self, session: &SessionId) {
        let path = self.metadata_path(session);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "メタデータファイルの削除に失敗");
            }
        }
    }
}
