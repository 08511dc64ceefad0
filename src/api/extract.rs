use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// JSON body extractor that treats a missing, empty or unparseable body as
/// the payload's default. The historical endpoints never rejected a request
/// on body shape alone; field-level validation decides, and every failure
/// keeps the `{error, message}` form instead of a framework plain-text 400.
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = match Bytes::from_request(req, state).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => T::default(),
        };
        Ok(Self(payload))
    }
}
