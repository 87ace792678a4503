/*!
twitter-oauth1: OAuth 1.0a request signing for Twitter-compatible REST APIs.

# Overview

This library produces the `Authorization` header value of an OAuth 1.0a
HMAC-SHA1 signed request (RFC 5849), the way the Twitter REST API expects it:
strict RFC 3986 percent-encoding, canonical parameter ordering, and a
signature over the exact base string the server recomputes.

A thin [reqwest](https://crates.io/crates/reqwest) integration is included
for attaching the header to outgoing requests.

# How to use

## Basic usecase 1 - signing a request by hand

```rust
use twitter_oauth1::{Credentials, Signer};

# fn run() -> Result<(), Box<dyn std::error::Error>> {
// load once at startup; empty values are rejected here
let credentials = Credentials::from_env()?;
let signer = Signer::new(credentials);

let header = signer.sign(
    "GET",
    "https://api.twitter.com/1.1/search/tweets.json",
    &[("q", "from:twitterdev")],
)?;
// header = OAuth oauth_consumer_key="...", oauth_nonce="...", ...
# Ok(())
# }
```

## Basic usecase 2 - sending a signed request with reqwest

```rust
use twitter_oauth1::{AuthorizationCheckFuture, Credentials, OAuthClientProvider};

# async fn run() -> twitter_oauth1::Result<()> {
let credentials = Credentials::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "[ACCESS_TOKEN]",
    "[TOKEN_SECRET]",
)?;

let client = reqwest::Client::new().oauth1(credentials);
let resp = client
    .get("https://api.twitter.com/1.1/search/tweets.json")
    .query(&[("q", "from:twitterdev")])
    .send()
    // 401 becomes Error::Unauthorized instead of a silent failure
    .ensure_authorized()
    .await?;
# Ok(())
# }
```
*/
mod client;
mod encode;
mod error;
mod nonce;
mod request;
mod response;
mod secrets;
mod signer;

// exposed to external program
pub use client::{Client, OAuthClientProvider};
pub use encode::percent_encode;
pub use error::{ConfigError, ConfigResult, Error, Result, SignError, SignResult};
pub use nonce::{generate_nonce, NONCE_LENGTH};
pub use request::RequestBuilder;
pub use response::{AuthorizationCheck, AuthorizationCheckFuture};
pub use secrets::{
    Credentials, SecretsProvider, ACCESS_SECRET_ENV, ACCESS_TOKEN_ENV, CONSUMER_KEY_ENV,
    CONSUMER_SECRET_ENV,
};
pub use signer::{
    sign_hmac_sha1, signature_base_string, signing_key, OAuthParameters, ParameterSet, Signer,
    OAUTH_VERSION, SIGNATURE_METHOD,
};

// exposed constant variables
/// Scheme token of the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "OAuth";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
