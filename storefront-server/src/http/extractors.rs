//! Custom Axum extractors
//!
//! Both reject with [`ApiError::Validation`] so malformed input gets the
//! same JSON 400 body as a failed field rule.

use std::marker::PhantomData;
use std::num::IntErrorKind;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// A resource addressed by an integer primary key
pub trait Resource {
    /// Singular name used in not-found messages
    const NAME: &'static str;
}

/// Extract an integer primary key from the `{id}` path segment.
///
/// A segment that is not an integer is a validation error. An integer
/// outside the key range cannot name a row, so it is reported as not found.
pub struct ResourceId<R> {
    pub id: i32,
    resource: PhantomData<R>,
}

impl<R> ResourceId<R>
where
    R: Resource,
{
    fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw.parse::<i32>() {
            Ok(id) => Ok(Self {
                id,
                resource: PhantomData,
            }),
            Err(e)
                if matches!(
                    e.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                Err(ApiError::not_found(R::NAME))
            }
            Err(_) => Err(ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })),
        }
    }
}

impl<S, R> FromRequestParts<S> for ResourceId<R>
where
    S: Send + Sync,
    R: Resource,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Missing { field: "id" }))?;

        Self::parse(&raw)
    }
}

/// JSON body whose decoding failures become validation errors
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::Malformed {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}
