//! # Gatewayエンドポイント

pub mod index;
pub mod s3_sign;
pub mod submit;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use index::handle_index;
pub use s3_sign::handle_s3_sign;
pub use submit::handle_submit;
