use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::access::AccessError;
use crate::application::ports::remote_query_port::RemoteCallError;
use crate::application::validation::{ConflictError, ValidationError};

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Failure returned by every handler, rendered as `{"detail": ...}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthorized,
    #[error(transparent)]
    Forbidden(#[from] AccessError),
    #[error("missing role claim")]
    MissingRole,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Conflict(ConflictError),
    #[error(transparent)]
    Validation(ValidationError),
    #[error("upstream service did not answer in time")]
    GatewayTimeout,
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) | ApiError::MissingRole => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(v) = err.downcast_ref::<ValidationError>() {
            return ApiError::Validation(v.clone());
        }
        if let Some(c) = err.downcast_ref::<ConflictError>() {
            return ApiError::Conflict(c.clone());
        }
        if let Some(a) = err.downcast_ref::<AccessError>() {
            return ApiError::Forbidden(*a);
        }
        if let Some(db) = err.downcast_ref::<sqlx::Error>() {
            if let Some(code) = db.as_database_error().and_then(|d| d.code()) {
                // 23505 unique_violation, 23503 foreign_key_violation
                match code.as_ref() {
                    "23505" => {
                        return ApiError::Conflict(ConflictError("row already exists".into()));
                    }
                    "23503" => {
                        return ApiError::Validation(ValidationError::new(
                            "id_customer",
                            "references a missing row",
                        ));
                    }
                    _ => {}
                }
            }
        }
        tracing::error!(error = ?err, "request_failed");
        ApiError::Internal
    }
}

impl From<RemoteCallError> for ApiError {
    fn from(err: RemoteCallError) -> Self {
        match &err {
            RemoteCallError::RequestTimeout {
                topic,
                correlation_id,
            } => {
                tracing::error!(%topic, %correlation_id, "remote_call_timed_out");
                ApiError::GatewayTimeout
            }
            other => {
                tracing::error!(error = ?other, "remote_call_failed");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_keep_their_status() {
        let v: ApiError = anyhow::Error::new(ValidationError::new("siret", "bad")).into();
        assert_eq!(v.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let c: ApiError = anyhow::Error::new(ConflictError("dup".into())).into();
        assert_eq!(c.status(), StatusCode::CONFLICT);

        let a: ApiError = anyhow::Error::new(AccessError::NotOwner).into();
        assert_eq!(a.status(), StatusCode::FORBIDDEN);

        let other: ApiError = anyhow::anyhow!("db exploded").into();
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.to_string(), "internal server error");
    }

    #[test]
    fn remote_errors_map_to_gateway_codes() {
        let timeout: ApiError = RemoteCallError::RequestTimeout {
            topic: "customer.orders.request".into(),
            correlation_id: "abc".into(),
        }
        .into();
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let down: ApiError = RemoteCallError::BrokerUnavailable(anyhow::anyhow!("refused")).into();
        assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(down.to_string(), "internal server error");
    }
}
