use std::collections::BTreeMap;

use async_trait::async_trait;

/// A stored proxy record: where a marketplace listing's upstream actually
/// lives, with provider credentials kept encrypted at rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub target_url: String,
    pub http_method: String,
    pub encrypted_headers: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProxyError {
    #[error("proxy lookup failed: {0}")]
    Lookup(String),
    #[error("header decryption failed: {0}")]
    Decrypt(String),
}

#[async_trait]
pub trait ProxyStore: Send + Sync {
    async fn get_proxy(&self, proxy_id: &str) -> Result<Option<ProxyConfig>, ProxyError>;
}

#[async_trait]
pub trait HeaderCrypto: Send + Sync {
    async fn decrypt_headers(
        &self,
        encrypted: &str,
    ) -> Result<BTreeMap<String, String>, ProxyError>;
}
