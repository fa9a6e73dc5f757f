//! 从环境变量加载 Cloudflare 凭证

use std::collections::HashMap;

use dns_purge_provider::{
    CredentialValidationError, ProviderCredentials, ProviderType, credential_fields,
};
use thiserror::Error;

pub const EMAIL_VAR: &str = "CLOUDFLARE_EMAIL";
pub const API_KEY_VAR: &str = "CLOUDFLARE_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Cloudflare {what} not found in environment, please export it as {var}")]
    Missing {
        what: &'static str,
        var: &'static str,
    },

    #[error("{var} is set but empty")]
    Empty { var: &'static str },
}

/// Read credentials from the process environment.
pub fn from_env() -> Result<ProviderCredentials, CredentialError> {
    load(|var| std::env::var(var).ok())
}

/// Build credentials from `lookup`, which maps an environment variable name to its value.
pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<ProviderCredentials, CredentialError> {
    let mut map = HashMap::new();
    for (field, var) in [
        (credential_fields::EMAIL, EMAIL_VAR),
        (credential_fields::API_KEY, API_KEY_VAR),
    ] {
        if let Some(value) = lookup(var) {
            map.insert(field.to_string(), value);
        }
    }

    ProviderCredentials::from_map(ProviderType::Cloudflare, &map).map_err(|e| {
        let (what, var) = if e.field() == credential_fields::EMAIL {
            ("email", EMAIL_VAR)
        } else {
            ("API key", API_KEY_VAR)
        };
        match e {
            CredentialValidationError::MissingField { .. } => CredentialError::Missing { what, var },
            CredentialValidationError::EmptyField { .. } => CredentialError::Empty { var },
        }
    })
}
