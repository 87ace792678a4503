// ----------------------------------------------------------------------------
// This source code contains derived artifacts from seanmonstar's `reqwest`.
// for further information(including license information),
// please visit their repository: https://github.com/seanmonstar/reqwest .
// ----------------------------------------------------------------------------
use reqwest::{Client as ReqwestClient, IntoUrl, Method};

use crate::{SecretsProvider, Signer};

use super::request::RequestBuilder;

pub trait OAuthClientProvider {
    /// Wrap the client so that every request built from it is signed with
    /// `secrets`.
    fn oauth1<TSecrets>(self, secrets: TSecrets) -> Client<TSecrets>
    where
        Self: Sized,
        TSecrets: SecretsProvider,
    {
        self.oauth1_with_signer(Signer::new(secrets))
    }

    fn oauth1_with_signer<TSecrets>(self, signer: Signer<TSecrets>) -> Client<TSecrets>
    where
        Self: Sized,
        TSecrets: SecretsProvider;
}

#[derive(Debug)]
pub struct Client<TSecrets>
where
    TSecrets: SecretsProvider,
{
    inner: ReqwestClient,
    signer: Signer<TSecrets>,
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1_with_signer<TSecrets>(self, signer: Signer<TSecrets>) -> Client<TSecrets>
    where
        Self: Sized,
        TSecrets: SecretsProvider,
    {
        Client {
            inner: self,
            signer,
        }
    }
}

impl<TSecrets> Client<TSecrets>
where
    TSecrets: SecretsProvider,
{
    /// Constructs a new `Client`.
    ///
    /// This method calls reqwest::Client::new() internally.
    pub fn new(secrets: TSecrets) -> Self {
        ReqwestClient::new().oauth1(secrets)
    }

    pub fn signer(&self) -> &Signer<TSecrets> {
        &self.signer
    }

    /// Convenience method to make a `GET` request to a URL.
    ///
    /// # Errors
    ///
    /// Sending fails whenever supplied `Url` cannot be parsed.
    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::GET, url)
    }

    /// Convenience method to make a `POST` request to a URL.
    ///
    /// # Errors
    ///
    /// Sending fails whenever supplied `Url` cannot be parsed.
    pub fn post<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::POST, url)
    }

    /// Convenience method to make a `PUT` request to a URL.
    pub fn put<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::PUT, url)
    }

    /// Convenience method to make a `PATCH` request to a URL.
    pub fn patch<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::PATCH, url)
    }

    /// Convenience method to make a `DELETE` request to a URL.
    pub fn delete<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::DELETE, url)
    }

    /// Convenience method to make a `HEAD` request to a URL.
    pub fn head<U: IntoUrl>(&self, url: U) -> RequestBuilder<'_, TSecrets> {
        self.request(Method::HEAD, url)
    }

    /// Start building a `Request` with the `Method` and `Url`.
    ///
    /// Returns a `RequestBuilder`, which will allow setting query parameters
    /// and headers before sending. The OAuth signature is computed when the
    /// request is built or sent.
    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder<'_, TSecrets> {
        RequestBuilder::new(
            self.inner.clone(),
            self.inner.request(method, url),
            &self.signer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Credentials, SecretsProvider};

    #[test]
    fn wrap_reqwest_client() {
        let credentials = Credentials::new("ck", "cs", "tok", "ts").unwrap();
        let client = reqwest::Client::new().oauth1(&credentials);
        assert_eq!(client.signer().secrets().get_token_pair(), ("tok", "ts"));

        let request = client.delete("https://api.example.com/1.1/x.json").build().unwrap();
        assert_eq!(request.method(), &Method::DELETE);
    }
}
