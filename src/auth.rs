//! API key authentication
//!
//! The Discovery API authenticates with an `apikey` query parameter. The
//! authenticator holds the credential and exposes it as request parameters
//! merged into every call. No validation of the key's syntactic form is
//! attempted; a bad key surfaces as an Unauthorized response from the server.

use std::collections::HashMap;

/// Holds the API key and exposes it as query parameters
#[derive(Debug, Clone)]
pub struct ApiKeyAuthenticator {
    api_key: String,
}

impl ApiKeyAuthenticator {
    /// Create a new authenticator with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Query parameters carrying the credential
    pub fn query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("apikey".to_string(), self.api_key.clone());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let auth = ApiKeyAuthenticator::new("secret-key");
        let params = auth.query_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("apikey"), Some(&"secret-key".to_string()));
    }

    #[test]
    fn test_query_params_is_pure() {
        let auth = ApiKeyAuthenticator::new("k");
        assert_eq!(auth.query_params(), auth.query_params());
    }
}
