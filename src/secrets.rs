use std::env::VarError;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::{ConfigError, ConfigResult};

/// Environment variable holding the consumer key.
pub const CONSUMER_KEY_ENV: &str = "CONSUMER_KEY";
/// Environment variable holding the consumer secret.
pub const CONSUMER_SECRET_ENV: &str = "CONSUMER_SECRET";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";
/// Environment variable holding the access token secret.
pub const ACCESS_SECRET_ENV: &str = "ACCESS_SECRET";

/// Source of the four OAuth 1.0a secrets used by the [`Signer`](crate::Signer).
pub trait SecretsProvider {
    /// `(consumer_key, consumer_secret)`
    fn get_consumer_key_pair(&self) -> (&str, &str);

    /// `(oauth_token, oauth_token_secret)`
    fn get_token_pair(&self) -> (&str, &str);
}

impl<T> SecretsProvider for &T
where
    T: SecretsProvider + ?Sized,
{
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (**self).get_consumer_key_pair()
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (**self).get_token_pair()
    }
}

impl<T> SecretsProvider for Arc<T>
where
    T: SecretsProvider + ?Sized,
{
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (**self).get_consumer_key_pair()
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (**self).get_token_pair()
    }
}

/// Long-lived consumer and access-token credentials.
///
/// Built once at startup and never mutated. The consumer key, consumer secret
/// and access token must be non-empty; the token secret may be empty, in which
/// case the signing key ends with a bare `&`.
///
/// `Debug` output never contains the secrets.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

#[derive(Deserialize)]
struct RawCredentials {
    consumer_key: String,
    consumer_secret: String,
    #[serde(alias = "access_token")]
    token: String,
    #[serde(default, alias = "access_secret")]
    token_secret: String,
}

impl std::convert::TryFrom<RawCredentials> for Credentials {
    type Error = ConfigError;

    fn try_from(raw: RawCredentials) -> ConfigResult<Self> {
        Credentials::new(
            raw.consumer_key,
            raw.consumer_secret,
            raw.token,
            raw.token_secret,
        )
    }
}

impl Credentials {
    pub fn new<TKey, TSecret, TToken, TTokenSecret>(
        consumer_key: TKey,
        consumer_secret: TSecret,
        token: TToken,
        token_secret: TTokenSecret,
    ) -> ConfigResult<Self>
    where
        TKey: Into<String>,
        TSecret: Into<String>,
        TToken: Into<String>,
        TTokenSecret: Into<String>,
    {
        let credentials = Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        };
        if credentials.consumer_key.is_empty() {
            return Err(ConfigError::MissingCredential("consumer_key"));
        }
        if credentials.consumer_secret.is_empty() {
            return Err(ConfigError::MissingCredential("consumer_secret"));
        }
        if credentials.token.is_empty() {
            return Err(ConfigError::MissingCredential("oauth_token"));
        }
        Ok(credentials)
    }

    /// Read the credentials from `CONSUMER_KEY`, `CONSUMER_SECRET`,
    /// `ACCESS_TOKEN` and `ACCESS_SECRET`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_with(|name| std::env::var(name))
    }

    /// Same as [`Credentials::from_env`], with a custom variable lookup.
    pub fn from_env_with<F>(mut lookup: F) -> ConfigResult<Self>
    where
        F: FnMut(&'static str) -> Result<String, VarError>,
    {
        let mut read = |name: &'static str| {
            lookup(name).map_err(|e| ConfigError::EnvVar {
                name,
                reason: e.to_string(),
            })
        };
        let consumer_key = read(CONSUMER_KEY_ENV)?;
        let consumer_secret = read(CONSUMER_SECRET_ENV)?;
        let token = read(ACCESS_TOKEN_ENV)?;
        let token_secret = read(ACCESS_SECRET_ENV)?;
        Credentials::new(consumer_key, consumer_secret, token, token_secret)
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl SecretsProvider for Credentials {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair(&self) -> (&str, &str) {
        (&self.token, &self.token_secret)
    }
}
