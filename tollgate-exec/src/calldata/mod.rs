mod abi;
mod packing;

pub use abi::build_function_call;
pub use packing::{
    decode_single_call, encode_batch, encode_single_call, hex_bytes, selector_bytes, CallTriple,
};

use tollgate_core::expressions::ResolutionError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalldataError {
    #[error("malformed abi fragment: {0}")]
    Fragment(String),
    #[error("abi parameter '{0}' has no value in argsMapping")]
    MissingArgument(String),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("cannot encode value {value} as solidity type {ty}")]
    TypeMismatch { ty: String, value: String },
    #[error("unsupported solidity type: {0}")]
    UnsupportedType(String),
    #[error("invalid hex string: {0}")]
    Hex(String),
    #[error("selector must be a 0x-prefixed 4-byte hex string: {0}")]
    Selector(String),
    #[error("abi encoding failed: {0}")]
    Encoding(String),
    #[error("single-call payload is too short ({0} bytes)")]
    TruncatedPayload(usize),
}
