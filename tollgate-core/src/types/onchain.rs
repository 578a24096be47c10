use indexmap::IndexMap;

use crate::types::AnyValue;

/// One chain call. The calldata comes from exactly one source, resolved in
/// this order: a pre-built `calldata` expression, ABI building from
/// `selector` + `abiFragment` + `argsMapping`, or the bare 4-byte
/// `selector` with no argument data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnchainOperation {
    /// Address literal or expression resolving to a `0x` hex address.
    #[serde(default)]
    pub target: String,

    /// Native-token amount, literal or expression. Defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calldata: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Human-readable single-function signature, e.g.
    /// `function transfer(address to, uint256 amount)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_fragment: Option<String>,

    /// Parameter name -> expression. Values are re-ordered into the ABI
    /// fragment's positional parameter order before encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args_mapping: Option<IndexMap<String, AnyValue>>,
}
