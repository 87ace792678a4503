// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use std::{borrow::Cow, convert::TryFrom, time::Duration};

use reqwest::{
    header::HeaderMap, header::HeaderName, header::HeaderValue, header::AUTHORIZATION,
    Client as ReqwestClient, Request, RequestBuilder as ReqwestRequestBuilder, Response,
};
use serde::Serialize;
use url::Url;

use crate::{OAuthParameters, Result, SecretsProvider, SignResult, Signer};

pub struct RequestBuilder<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    client: ReqwestClient,
    inner: ReqwestRequestBuilder,
    signer: &'a Signer<TSecrets>,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecrets> RequestBuilder<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    pub(crate) fn new(
        client: ReqwestClient,
        builder: ReqwestRequestBuilder,
        signer: &'a Signer<TSecrets>,
    ) -> Self {
        RequestBuilder {
            client,
            inner: builder,
            signer,
            parameters: OAuthParameters::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Finish building the request and send it to server with OAuth signature

    /// Build the `Request`, signing its method, URL and query string, and
    /// set the `Authorization` header.
    pub fn build(self) -> Result<Request> {
        let mut request = self.inner.build()?;
        let header = sign_url(
            self.signer,
            &self.parameters,
            request.method().as_str(),
            request.url(),
        )?;
        request
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_str(&header)?);
        Ok(request)
    }

    /// Constructs the signed Request and sends it to the target URL.
    ///
    /// # Errors
    ///
    /// This method fails if the request could not be signed, if there was an
    /// error while sending request, redirect loop was detected or redirect
    /// limit was exhausted. A non-success status is *not* an error here; see
    /// [`AuthorizationCheck`](crate::AuthorizationCheck).
    pub async fn send(self) -> Result<Response> {
        let client = self.client.clone();
        let request = self.build()?;
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "sending signed request"
        );
        Ok(client.execute(request).await?)
    }

    // ------------------------------------------------------------------------
    // Signing options

    /// Use fixed protocol parameters (nonce, timestamp) for this request.
    pub fn oauth_parameters(self, parameters: OAuthParameters<'a>) -> Self {
        RequestBuilder { parameters, ..self }
    }

    // ------------------------------------------------------------------------
    // Pass-through to inner builder

    fn pass_through<F>(self, f: F) -> Self
    where
        F: FnOnce(ReqwestRequestBuilder) -> ReqwestRequestBuilder,
    {
        RequestBuilder {
            inner: f(self.inner),
            ..self
        }
    }

    /// Modify the query string of the URL.
    ///
    /// Modifies the URL of this request, adding the parameters provided.
    /// This method appends and does not overwrite. This means that it can
    /// be called multiple times and that existing query parameters are not
    /// overwritten if the same key is used. The key will simply show up
    /// twice in the query string, and both pairs are signed.
    /// Calling `.query(&[("foo", "a"), ("foo", "b")])` gives `"foo=a&foo=b"`.
    ///
    /// # Errors
    /// Building will fail if the object you provide cannot be serialized
    /// into a query string.
    pub fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
        self.pass_through(|b| b.query(query))
    }

    /// Add a `Header` to this Request.
    ///
    /// An `Authorization` header set here is replaced by the OAuth one.
    pub fn header<K, V>(self, key: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.pass_through(|b| b.header(key, value))
    }

    /// Add a set of Headers to the existing ones on this Request.
    ///
    /// The headers will be merged in to any already set.
    pub fn headers(self, headers: HeaderMap) -> Self {
        self.pass_through(|b| b.headers(headers))
    }

    /// Enables a request timeout.
    ///
    /// The timeout is applied from the when the request starts connecting
    /// until the response body has finished. It affects only this request
    /// and overrides the timeout configured using `ClientBuilder::timeout()`.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.pass_through(|b| b.timeout(timeout))
    }
}

/// Sign a full request URL: its query string becomes the signed parameters,
/// and the URL is signed without query and fragment.
fn sign_url<TSecrets>(
    signer: &Signer<TSecrets>,
    parameters: &OAuthParameters<'_>,
    method: &str,
    url: &Url,
) -> SignResult<String>
where
    TSecrets: SecretsProvider,
{
    let query: Vec<(Cow<str>, Cow<str>)> = url.query_pairs().collect();
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);
    signer.sign_with(parameters, method, base_url.as_str(), &query)
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use crate::{Credentials, OAuthClientProvider, OAuthParameters};

    fn extract_signature(auth_header: &str) -> String {
        let content = auth_header.strip_prefix("OAuth ").unwrap();
        let mapped_header = content
            .split(", ")
            .map(|item| item.splitn(2, '=').collect::<Vec<&str>>())
            .filter(|v| v.len() == 2)
            .map(|v| (v[0], v[1]))
            .collect::<Vec<(&str, &str)>>();
        let sig_content = mapped_header.iter().find(|(k, _)| k == &"oauth_signature");
        percent_encoding::percent_decode_str(sig_content.unwrap().1.trim_matches('"'))
            .decode_utf8_lossy()
            .to_string()
    }

    fn fixed_params() -> OAuthParameters<'static> {
        OAuthParameters::new()
            .nonce("N".repeat(32))
            .timestamp(1_700_000_000u64)
    }

    #[test]
    fn sign_get_query() {
        let credentials = Credentials::new("ck", "cs", "tok", "ts").unwrap();
        let client = reqwest::Client::new().oauth1(&credentials);

        let req = client
            .get("https://api.example.com/1.1/search/tweets.json")
            .query(&[("q", "from:user")])
            .oauth_parameters(fixed_params())
            .build()
            .unwrap();

        assert_eq!(req.url().query(), Some("q=from%3Auser"));
        let sign = req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(
            sign,
            "OAuth oauth_consumer_key=\"ck\", \
             oauth_nonce=\"NNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNN\", \
             oauth_signature=\"Xpy1DCGvrifGrDJddAPeh9EoOcc%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", \
             oauth_timestamp=\"1700000000\", \
             oauth_token=\"tok\", \
             oauth_version=\"1.0\""
        );
    }

    #[test]
    fn sign_query_embedded_in_url() {
        let credentials = Credentials::new("ck", "cs", "tok", "ts").unwrap();
        let client = reqwest::Client::new().oauth1(&credentials);

        let req = client
            .get("https://api.example.com/1.1/search/tweets.json?q=from%3Auser#top")
            .oauth_parameters(fixed_params())
            .build()
            .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(extract_signature(sign), "Xpy1DCGvrifGrDJddAPeh9EoOcc=");
    }

    #[test]
    fn sign_post_query() {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
        let c_key = "xvz1evFS4wEEPTGEFPHBog";
        let c_secret = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
        let nonce = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
        let timestamp = 1_318_622_958u64;
        let token = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
        let token_secret = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";

        let credentials = Credentials::new(c_key, c_secret, token, token_secret).unwrap();
        let params = OAuthParameters::new().nonce(nonce).timestamp(timestamp);

        let req = reqwest::Client::new()
            .oauth1(credentials)
            .post("https://api.twitter.com/1.1/statuses/update.json")
            .query(&[
                ("include_entities", "true"),
                (
                    "status",
                    "Hello Ladies + Gentlemen, a signed OAuth request!",
                ),
            ])
            .oauth_parameters(params)
            .build()
            .unwrap();

        let sign = req.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(
            extract_signature(sign.to_str().unwrap()),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn oauth_header_replaces_custom_authorization() {
        let credentials = Credentials::new("ck", "cs", "tok", "ts").unwrap();
        let req = reqwest::Client::new()
            .oauth1(&credentials)
            .get("https://api.example.com/1.1/account/verify_credentials.json")
            .header(AUTHORIZATION, "Bearer something")
            .build()
            .unwrap();

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert!(values[0].to_str().unwrap().starts_with("OAuth "));
    }

    #[test]
    fn invalid_url_fails_on_build() {
        let credentials = Credentials::new("ck", "cs", "tok", "ts").unwrap();
        let result = reqwest::Client::new()
            .oauth1(&credentials)
            .get("not a url")
            .build();
        assert!(matches!(result, Err(crate::Error::Reqwest(_))));
    }
}
