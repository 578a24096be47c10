use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_primitives::{Address, B256, I256, U256};
use indexmap::IndexMap;

use tollgate_core::expressions::resolve_all;
use tollgate_core::types::{AnyValue, WorkflowContext};

use super::CalldataError;

/// Build call data from a human-readable single-function ABI fragment and a
/// name-keyed argument mapping. Authors write arguments by name for
/// readability; on-chain calls are strictly positional, so resolved values
/// are re-ordered into the fragment's parameter sequence before encoding.
pub fn build_function_call(
    fragment: &str,
    args_mapping: &IndexMap<String, AnyValue>,
    ctx: &WorkflowContext,
) -> Result<Vec<u8>, CalldataError> {
    let function =
        Function::parse(fragment).map_err(|e| CalldataError::Fragment(e.to_string()))?;

    let mut values = Vec::with_capacity(function.inputs.len());
    for param in &function.inputs {
        let expr = args_mapping
            .get(&param.name)
            .ok_or_else(|| CalldataError::MissingArgument(param.name.clone()))?;
        let resolved = resolve_all(expr, ctx)?;
        let ty =
            DynSolType::parse(&param.ty).map_err(|e| CalldataError::Fragment(e.to_string()))?;
        values.push(coerce_value(&ty, &resolved)?);
    }

    function
        .abi_encode_input(&values)
        .map_err(|e| CalldataError::Encoding(e.to_string()))
}

fn coerce_value(ty: &DynSolType, value: &AnyValue) -> Result<DynSolValue, CalldataError> {
    match ty {
        DynSolType::Address => {
            let s = expect_str(ty, value)?;
            s.parse::<Address>()
                .map(DynSolValue::Address)
                .map_err(|_| mismatch(ty, value))
        }
        DynSolType::Uint(size) => parse_uint(value)
            .map(|v| DynSolValue::Uint(v, *size))
            .ok_or_else(|| mismatch(ty, value)),
        DynSolType::Int(size) => parse_int(value)
            .map(|v| DynSolValue::Int(v, *size))
            .ok_or_else(|| mismatch(ty, value)),
        DynSolType::Bool => match value {
            AnyValue::Bool(b) => Ok(DynSolValue::Bool(*b)),
            AnyValue::String(s) if s == "true" => Ok(DynSolValue::Bool(true)),
            AnyValue::String(s) if s == "false" => Ok(DynSolValue::Bool(false)),
            _ => Err(mismatch(ty, value)),
        },
        DynSolType::Bytes => {
            let s = expect_str(ty, value)?;
            super::hex_bytes(s).map(DynSolValue::Bytes)
        }
        DynSolType::FixedBytes(size) => {
            let s = expect_str(ty, value)?;
            let bytes = super::hex_bytes(s)?;
            if bytes.len() != *size {
                return Err(mismatch(ty, value));
            }
            let mut word = B256::ZERO;
            word.0[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, *size))
        }
        DynSolType::String => Ok(DynSolValue::String(expect_str(ty, value)?.to_string())),
        DynSolType::Array(inner) => {
            let items = expect_array(ty, value)?;
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(coerce_value(inner, item)?);
            }
            Ok(DynSolValue::Array(out))
        }
        DynSolType::FixedArray(inner, size) => {
            let items = expect_array(ty, value)?;
            if items.len() != *size {
                return Err(mismatch(ty, value));
            }
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(coerce_value(inner, item)?);
            }
            Ok(DynSolValue::FixedArray(out))
        }
        other => Err(CalldataError::UnsupportedType(other.to_string())),
    }
}

fn parse_uint(value: &AnyValue) -> Option<U256> {
    match value {
        AnyValue::Number(n) => n.as_u64().map(U256::from),
        AnyValue::String(s) => {
            if let Some(hex_part) = s.strip_prefix("0x") {
                U256::from_str_radix(hex_part, 16).ok()
            } else {
                U256::from_str_radix(s, 10).ok()
            }
        }
        _ => None,
    }
}

fn parse_int(value: &AnyValue) -> Option<I256> {
    match value {
        AnyValue::Number(n) => n.as_i64().map(I256::try_from).and_then(Result::ok),
        AnyValue::String(s) => I256::from_dec_str(s).ok(),
        _ => None,
    }
}

fn expect_str<'a>(ty: &DynSolType, value: &'a AnyValue) -> Result<&'a str, CalldataError> {
    value.as_str().ok_or_else(|| mismatch(ty, value))
}

fn expect_array<'a>(
    ty: &DynSolType,
    value: &'a AnyValue,
) -> Result<&'a Vec<AnyValue>, CalldataError> {
    match value {
        AnyValue::Array(items) => Ok(items),
        _ => Err(mismatch(ty, value)),
    }
}

fn mismatch(ty: &DynSolType, value: &AnyValue) -> CalldataError {
    CalldataError::TypeMismatch {
        ty: ty.to_string(),
        value: value.to_string(),
    }
}
