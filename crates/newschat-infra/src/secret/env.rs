//! Environment variable credential provider.

use secrecy::SecretString;

use newschat_types::error::CredentialError;

/// Key for the OpenAI chat-completion and embeddings API.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Key for the World News API.
pub const NEWS_API_KEY: &str = "NEWS_API_KEY";

/// Read-only credential provider backed by environment variables.
pub struct EnvCredentials;

impl EnvCredentials {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key`. Unset, blank and non-Unicode values count as absent.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "ignoring credential with invalid Unicode");
                None
            }
        }
    }

    /// Like [`Self::get`], but absence is an error naming the variable.
    pub fn require(&self, key: &str) -> Result<SecretString, CredentialError> {
        self.get(key)
            .ok_or_else(|| CredentialError::Missing(key.to_string()))
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_get_existing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("NEWSCHAT_TEST_SECRET_1", "sk-test-123") };

        let creds = EnvCredentials::new();
        let secret = creds.get("NEWSCHAT_TEST_SECRET_1").unwrap();
        assert_eq!(secret.expose_secret(), "sk-test-123");

        // SAFETY: the variable was just set above by this test.
        unsafe { std::env::remove_var("NEWSCHAT_TEST_SECRET_1") };
    }

    #[test]
    fn test_blank_value_is_absent() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("NEWSCHAT_TEST_SECRET_2", "   ") };

        let creds = EnvCredentials::new();
        assert!(creds.get("NEWSCHAT_TEST_SECRET_2").is_none());

        // SAFETY: the variable was just set above by this test.
        unsafe { std::env::remove_var("NEWSCHAT_TEST_SECRET_2") };
    }

    #[test]
    fn test_require_missing_names_the_key() {
        let creds = EnvCredentials::new();
        let err = creds.require("NEWSCHAT_TEST_NONEXISTENT_XYZ").unwrap_err();
        assert!(matches!(err, CredentialError::Missing(ref key) if key == "NEWSCHAT_TEST_NONEXISTENT_XYZ"));
        assert!(err.to_string().starts_with("NEWSCHAT_TEST_NONEXISTENT_XYZ is not set"));
    }
}
