//! # セッション識別子
//!
//! 訪問ごとに発行される不透明なセッションID。認証には使用しない。
//! 作業ディレクトリのパスとオブジェクトキーに埋め込まれるため、UUID形式のみ受け付ける。

use std::fmt;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sm_upload_types::SESSION_COOKIE_NAME;

use crate::error::GatewayError;

/// セッションID（UUID v4）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// 新しいセッションIDを生成する。
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// 文字列からパースする。UUID以外は不正なリクエスト。
    pub fn parse(value: &str) -> Result<Self, GatewayError> {
        uuid::Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| GatewayError::BadRequest("セッションIDの形式が不正です".to_string()))
    }

    /// リクエストのCookieからセッションIDを取り出す。
    pub fn from_jar(jar: &CookieJar) -> Result<Self, GatewayError> {
        let cookie = jar.get(SESSION_COOKIE_NAME).ok_or_else(|| {
            GatewayError::BadRequest("セッションCookieがありません".to_string())
        })?;
        Self::parse(cookie.value())
    }

    /// レスポンスに付与するCookieを構築する。
    pub fn to_cookie(self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, self.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
