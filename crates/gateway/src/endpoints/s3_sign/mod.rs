//! # POST /s3/sign
//!
//! ブラウザからオブジェクトストアへ直接アップロードするための署名発行。
//! リクエストボディに `headers` があればヘッダー署名、なければボディ全体をポリシーとして署名する。

mod handler;


pub use handler::handle_s3_sign;
