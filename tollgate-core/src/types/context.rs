use std::collections::BTreeMap;

use chrono::Utc;
use indexmap::IndexMap;

use crate::types::AnyValue;

/// Caller-supplied values a run starts from. The context adds a creation
/// timestamp on top of these.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub wallet: String,
    pub chain_id: u64,
    pub session_id: String,
    pub session_key_address: String,
    pub input: AnyValue,
    pub computed: BTreeMap<String, AnyValue>,
}

/// The data structure expressions resolve against. Owned exclusively by one
/// run; `steps` grows monotonically as steps complete and is write-once per
/// key.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    wallet: String,
    chain_id: u64,
    session_id: String,
    session_key_address: String,
    timestamp: i64,
    input: AnyValue,
    steps: IndexMap<String, AnyValue>,
    computed: BTreeMap<String, AnyValue>,
}

impl WorkflowContext {
    pub fn new(params: RunParams) -> Self {
        Self {
            wallet: params.wallet,
            chain_id: params.chain_id,
            session_id: params.session_id,
            session_key_address: params.session_key_address,
            timestamp: Utc::now().timestamp(),
            input: params.input,
            steps: IndexMap::new(),
            computed: params.computed,
        }
    }

    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn session_key_address(&self) -> &str {
        &self.session_key_address
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn input(&self) -> &AnyValue {
        &self.input
    }

    /// Record a finished step's context value under its id, and under the
    /// alias when distinct. First write wins; existing keys are never
    /// overwritten.
    pub fn record_step(&mut self, id: &str, alias: &str, value: AnyValue) {
        if !self.steps.contains_key(id) {
            self.steps.insert(id.to_string(), value.clone());
        }
        if alias != id && !self.steps.contains_key(alias) {
            self.steps.insert(alias.to_string(), value);
        }
    }

    pub(crate) fn step_value(&self, key: &str) -> Option<&AnyValue> {
        self.steps.get(key)
    }

    pub(crate) fn computed_value(&self, key: &str) -> Option<&AnyValue> {
        self.computed.get(key)
    }
}
