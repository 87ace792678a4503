use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encode::percent_encode;
use crate::nonce::generate_nonce;
use crate::{
    SecretsProvider, SignError, SignResult, AUTHORIZATION_SCHEME, OAUTH_CONSUMER_KEY,
    OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY,
    OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Signs requests with OAuth 1.0a HMAC-SHA1 and renders the `Authorization`
/// header value.
///
/// The signer holds nothing but the credentials, so it can be shared freely
/// between threads and tasks.
#[derive(Debug, Clone)]
pub struct Signer<TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: TSecretsProvider,
}

impl<TSecretsProvider> Signer<TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: TSecretsProvider) -> Self {
        Signer { secrets }
    }

    pub fn secrets(&self) -> &TSecretsProvider {
        &self.secrets
    }

    /// Build the `Authorization` header value for one request, with a fresh
    /// nonce and the current timestamp.
    ///
    /// `url` is the absolute URL without its query string; the query goes in
    /// `query`, duplicated keys included.
    pub fn sign<M, K, V>(&self, method: M, url: &str, query: &[(K, V)]) -> SignResult<String>
    where
        M: AsRef<str>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.sign_with(&OAuthParameters::new(), method, url, query)
    }

    /// Same as [`Signer::sign`], but takes the nonce and timestamp from
    /// `parameters` when they are set.
    pub fn sign_with<M, K, V>(
        &self,
        parameters: &OAuthParameters<'_>,
        method: M,
        url: &str,
        query: &[(K, V)],
    ) -> SignResult<String>
    where
        M: AsRef<str>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if url.contains('?') {
            return Err(SignError::QueryInUrl(url.to_string()));
        }
        let method = method.as_ref().to_ascii_uppercase();
        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let (token, token_secret) = self.secrets.get_token_pair();

        let nonce = match parameters.nonce {
            Some(ref nonce) => nonce.clone(),
            None => Cow::from(generate_nonce()?),
        };
        let timestamp = match parameters.timestamp {
            Some(timestamp) => timestamp,
            None => current_timestamp()?,
        }
        .to_string();

        tracing::debug!(
            method = %method,
            url = %url,
            parameters = query.len(),
            "signing request"
        );

        let protocol_parameters = [
            (OAUTH_CONSUMER_KEY, consumer_key),
            (OAUTH_NONCE_KEY, nonce.as_ref()),
            (OAUTH_SIGNATURE_METHOD_KEY, SIGNATURE_METHOD),
            (OAUTH_TIMESTAMP_KEY, timestamp.as_str()),
            (OAUTH_TOKEN_KEY, token),
            (OAUTH_VERSION_KEY, OAUTH_VERSION),
        ];
        let parameter_set = ParameterSet::new(
            query
                .iter()
                .map(|(k, v)| (k.as_ref(), v.as_ref()))
                .chain(protocol_parameters.iter().copied()),
        );

        let base_string = signature_base_string(&method, url, &parameter_set);
        let key = signing_key(consumer_secret, token_secret);
        let signature = sign_hmac_sha1(&key, &base_string)?;

        // header order is fixed; it does not have to follow the base string
        Ok(authorization_header(&[
            (OAUTH_CONSUMER_KEY, consumer_key),
            (OAUTH_NONCE_KEY, nonce.as_ref()),
            (OAUTH_SIGNATURE_KEY, signature.as_str()),
            (OAUTH_SIGNATURE_METHOD_KEY, SIGNATURE_METHOD),
            (OAUTH_TIMESTAMP_KEY, timestamp.as_str()),
            (OAUTH_TOKEN_KEY, token),
            (OAUTH_VERSION_KEY, OAUTH_VERSION),
        ]))
    }
}

/// Per-request overrides for the generated protocol parameters.
///
/// Leave them unset in production; fixing the nonce and the timestamp makes
/// the produced header fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct OAuthParameters<'a> {
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<u64>,
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }
}

/// Percent-encoded request parameters in signing order.
///
/// Pairs are sorted by encoded key, then by encoded value, comparing raw
/// bytes. Pairs sharing a key are all kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new<'p, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        pairs.sort();
        ParameterSet { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `key=value` pairs joined with `&`. Nothing is encoded again here.
    pub fn to_parameter_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Build the signature base string (RFC 5849 section 3.4.1).
///
/// Format: `METHOD&encoded_url&encoded_parameter_string`
pub fn signature_base_string(method: &str, url: &str, parameters: &ParameterSet) -> String {
    format!(
        "{}&{}&{}",
        percent_encode(&method.to_ascii_uppercase()),
        percent_encode(url),
        percent_encode(&parameters.to_parameter_string())
    )
}

/// `encoded_consumer_secret&encoded_token_secret`; the `&` is always present.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// HMAC-SHA1 of `base_string` keyed with `key`, base64 encoded.
pub fn sign_hmac_sha1(key: &str, base_string: &str) -> SignResult<String> {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| SignError::Hmac(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

fn authorization_header(parameters: &[(&str, &str)]) -> String {
    let rendered = parameters
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>();
    format!("{} {}", AUTHORIZATION_SCHEME, rendered.join(", "))
}

fn current_timestamp() -> SignResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| SignError::ClockBeforeEpoch)
}
