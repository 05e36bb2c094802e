//! Semantic OAuth value types.
//!
//! Every value exchanged with a provider is a string on the wire. The newtypes
//! below keep their roles apart at compile time and serialize transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, Result};

macro_rules! opaque_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

/// Declares values whose content is safe to show in logs.
macro_rules! visible {
    ($($name:ident),*) => {$(
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    )*};
}

/// Declares values that must never be printed.
macro_rules! secret {
    ($($name:ident),*) => {$(
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}([REDACTED])", stringify!($name))
            }
        }
    )*};
}

opaque_string!(
    /// Registered application identifier.
    ClientId
);
opaque_string!(
    /// Registered application secret.
    ClientSecret
);
opaque_string!(
    /// Single-use code handed back by the provider's OAuth redirect.
    AuthorizationCode
);
opaque_string!(
    /// Bearer credential for authenticated calls. No expiry is tracked.
    AccessToken
);
opaque_string!(
    /// Provider-assigned user/account identifier.
    AccountId
);
opaque_string!(
    /// Opaque position in a provider's ordered change feed.
    ///
    /// Only ever passed back to the provider as received.
    Cursor
);

visible!(ClientId, AccountId, Cursor);
secret!(ClientSecret, AuthorizationCode, AccessToken);

/// OAuth providers the connectors talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Dropbox,
    Slack,
}

impl ProviderKind {
    /// Prefix of the environment variables holding this provider's credentials.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderKind::Dropbox => "DROPBOX",
            ProviderKind::Slack => "SLACK",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Dropbox => write!(f, "Dropbox"),
            ProviderKind::Slack => write!(f, "Slack"),
        }
    }
}

/// Application credentials registered with a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<ClientId>, client_secret: impl Into<ClientSecret>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read credentials from two environment variables.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingCredential`] naming the first variable that is unset
    /// or empty.
    pub fn from_env(id_var: &str, secret_var: &str) -> Result<Self> {
        Ok(Self::new(read_env(id_var)?, read_env(secret_var)?))
    }

    /// Read `<PREFIX>_CLIENT_ID` / `<PREFIX>_CLIENT_SECRET` for `provider`.
    pub fn from_env_for(provider: ProviderKind) -> Result<Self> {
        let prefix = provider.env_prefix();
        Self::from_env(
            &format!("{}_CLIENT_ID", prefix),
            &format!("{}_CLIENT_SECRET", prefix),
        )
    }

    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

fn read_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AuthError::MissingCredential(var.to_string())),
    }
}
