use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{hex, Address, U256};

use super::CalldataError;

/// One resolved chain call, ready for either wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTriple {
    pub target: Address,
    pub value: U256,
    pub calldata: Vec<u8>,
}

/// Single-call wire format: 20-byte target, value left-padded to 32 bytes,
/// then the variable-length calldata.
pub fn encode_single_call(call: &CallTriple) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + 32 + call.calldata.len());
    out.extend_from_slice(call.target.as_slice());
    out.extend_from_slice(&call.value.to_be_bytes::<32>());
    out.extend_from_slice(&call.calldata);
    out
}

pub fn decode_single_call(data: &[u8]) -> Result<CallTriple, CalldataError> {
    if data.len() < 52 {
        return Err(CalldataError::TruncatedPayload(data.len()));
    }
    Ok(CallTriple {
        target: Address::from_slice(&data[..20]),
        value: U256::from_be_slice(&data[20..52]),
        calldata: data[52..].to_vec(),
    })
}

/// Batch wire format: the standard ABI encoding of an
/// `(address,uint256,bytes)[]` array of call triples.
pub fn encode_batch(calls: &[CallTriple]) -> Vec<u8> {
    let items = calls
        .iter()
        .map(|call| {
            DynSolValue::Tuple(vec![
                DynSolValue::Address(call.target),
                DynSolValue::Uint(call.value, 256),
                DynSolValue::Bytes(call.calldata.clone()),
            ])
        })
        .collect();
    DynSolValue::Tuple(vec![DynSolValue::Array(items)]).abi_encode_params()
}

pub fn selector_bytes(selector: &str) -> Result<[u8; 4], CalldataError> {
    let hex_part = selector
        .strip_prefix("0x")
        .ok_or_else(|| CalldataError::Selector(selector.to_string()))?;
    let bytes =
        hex::decode(hex_part).map_err(|_| CalldataError::Selector(selector.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| CalldataError::Selector(selector.to_string()))
}

pub fn hex_bytes(input: &str) -> Result<Vec<u8>, CalldataError> {
    let hex_part = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(hex_part).map_err(|_| CalldataError::Hex(input.to_string()))
}
