//! # POST /submit
//!
//! ブラウザから送信されたメタデータJSONをセッション単位で保存し、
//! オブジェクトストアへ転送する。
//!
//! ## 処理フロー
//! 1. Content-Typeが `application/json` であることを確認
//! 2. セッションCookieからセッションIDを取得
//! 3. `<scratch>/<session_id>/meta.json` を新規作成してボディをそのまま書き込む
//! 4. `<bucket>/<session_id>/meta.json` へアップロード
//!
//! メタデータのスキーマは検証しない。

mod handler;


pub use handler::handle_submit;
