use std::future::Future;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Response;

use crate::{Error, Result};

/// Add ensure_authorized feature to reqwest::Response.
///
/// A `401 Unauthorized` means the resource server recomputed a different
/// signature, or rejected the credentials; it becomes [`Error::Unauthorized`]
/// carrying the response body. Other client and server errors become
/// [`Error::Status`]. Any other response is passed through untouched.
// this trait is sealed
#[async_trait(?Send)]
pub trait AuthorizationCheck: private::Sealed {
    async fn ensure_authorized(self) -> Result<Response>;
}

#[async_trait(?Send)]
impl AuthorizationCheck for Response {
    async fn ensure_authorized(self) -> Result<Response> {
        let status = self.status();
        if status == StatusCode::UNAUTHORIZED {
            let url = self.url().to_string();
            let body = self.text().await?;
            tracing::warn!(url = %url, "request rejected with 401 Unauthorized");
            return Err(Error::Unauthorized { body });
        }
        if status.is_client_error() || status.is_server_error() {
            let body = self.text().await?;
            return Err(Error::Status { status, body });
        }
        Ok(self)
    }
}

/// Add ensure_authorized feature to Future of reqwest::Response.
// this trait is also sealed
#[async_trait(?Send)]
pub trait AuthorizationCheckFuture: private::SealedWrapper {
    async fn ensure_authorized(self) -> Result<Response>;
}

#[async_trait(?Send)]
impl<T, E> AuthorizationCheckFuture for T
where
    T: Future<Output = std::result::Result<Response, E>>,
    E: Into<Error> + 'static,
{
    async fn ensure_authorized(self) -> Result<Response> {
        match self.await {
            Ok(resp) => resp.ensure_authorized().await,
            Err(err) => Err(err.into()),
        }
    }
}

mod private {
    use std::future::Future;

    use reqwest::Response;

    use crate::Error;

    pub trait Sealed {}
    impl Sealed for Response {}
    pub trait SealedWrapper {}
    impl<T, E> SealedWrapper for T
    where
        T: Future<Output = Result<Response, E>>,
        E: Into<Error>,
    {
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn pass_through_success() {
        let resp = response(200, r#"{"statuses":[]}"#)
            .ensure_authorized()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), r#"{"statuses":[]}"#);
    }

    #[tokio::test]
    async fn surface_unauthorized() {
        let body = r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#;
        let result = response(401, body).ensure_authorized().await;
        match result {
            Err(Error::Unauthorized { body: b }) => assert_eq!(b, body),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn surface_other_failures() {
        let result = response(429, "Rate limit exceeded").ensure_authorized().await;
        match result {
            Err(Error::Status { status, body }) => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(body, "Rate limit exceeded");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn check_future_of_response() {
        let ok = async { Ok::<_, Error>(response(204, "")) };
        assert!(ok.ensure_authorized().await.is_ok());

        let failed = async { Ok::<_, Error>(response(401, "")) };
        assert!(matches!(
            failed.ensure_authorized().await,
            Err(Error::Unauthorized { .. })
        ));

        let errored = async { Err::<Response, _>(Error::Signer(crate::SignError::ClockBeforeEpoch)) };
        assert!(matches!(
            errored.ensure_authorized().await,
            Err(Error::Signer(_))
        ));
    }
}
