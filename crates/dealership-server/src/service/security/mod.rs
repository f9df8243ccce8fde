//! Credential signing and verification.

mod token_codec;

pub use token_codec::{Claims, TOKEN_LIFETIME, TokenCodec, TokenConfig, TokenError};
