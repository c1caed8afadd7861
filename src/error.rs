//! Error handling.

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tracing::{event, Level};

/// Floodcast server error type
///
/// This type encapsulates the various errors that may occur.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum FloodcastError {
    /// Error reading a source data file
    #[error("failed to read source data file")]
    DataFileRead(#[from] std::io::Error),

    /// Error parsing a source CSV file
    #[error("failed to parse source CSV file")]
    CsvParse(#[from] csv::Error),

    /// Error parsing the processed results file
    #[error("failed to parse processed results file")]
    ProcessedResultParse(#[from] serde_json::Error),

    /// No district normals entry for the requested district
    #[error("District {district} not found")]
    DistrictNotFound { district: String },

    /// Error deserialising a request body
    #[error("request data is not valid")]
    RequestDataJsonRejection(#[from] JsonRejection),

    /// Error validating a request body (single error)
    #[error("request data is not valid")]
    RequestDataValidationSingle(#[from] validator::ValidationError),

    /// Error validating a request body (multiple errors)
    #[error("request data is not valid")]
    RequestDataValidation(#[from] validator::ValidationErrors),
}

impl IntoResponse for FloodcastError {
    /// Convert from a `FloodcastError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// A response to send in error cases
///
/// The API error contract is a single flat JSON object with an `error` field.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Error message
    error: String,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status,
            error: error.to_string(),
        }
    }

    /// Return a 400 bad request ErrorResponse
    fn bad_request<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Return a 404 not found ErrorResponse
    fn not_found<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<FloodcastError> for ErrorResponse {
    /// Convert from a `FloodcastError` into an `ErrorResponse`.
    fn from(error: FloodcastError) -> Self {
        let response = match &error {
            // Bad request
            FloodcastError::RequestDataJsonRejection(_)
            | FloodcastError::RequestDataValidationSingle(_)
            | FloodcastError::RequestDataValidation(_) => Self::bad_request(&error),

            // Not found
            FloodcastError::DistrictNotFound { district: _ } => Self::not_found(&error),

            // Internal server error
            FloodcastError::DataFileRead(_)
            | FloodcastError::CsvParse(_)
            | FloodcastError::ProcessedResultParse(_) => Self::internal_server_error(&error),
        };

        // Log server errors with their source chain.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source.to_string());
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hyper::HeaderMap;

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn test_floodcast_error(error: FloodcastError, status: StatusCode, message: &str) {
        let response = error.into_response();
        assert_eq!(status, response.status());
        let mut headers = HeaderMap::new();
        headers.insert(&header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(headers, *response.headers());
        let error_response: ErrorResponse =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(message.to_string(), error_response.error);
    }

    #[tokio::test]
    async fn data_file_read_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = FloodcastError::DataFileRead(io_error);
        let message = "failed to read source data file";
        test_floodcast_error(error, StatusCode::INTERNAL_SERVER_ERROR, message).await;
    }

    #[tokio::test]
    async fn csv_parse_error() {
        // Unequal row lengths are the simplest way to provoke a csv::Error.
        let mut reader = csv::Reader::from_reader("a,b\n1,2,3\n".as_bytes());
        let error = reader.records().next().unwrap().unwrap_err();
        let error = FloodcastError::CsvParse(error);
        let message = "failed to parse source CSV file";
        test_floodcast_error(error, StatusCode::INTERNAL_SERVER_ERROR, message).await;
    }

    #[tokio::test]
    async fn processed_result_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = FloodcastError::ProcessedResultParse(json_error);
        let message = "failed to parse processed results file";
        test_floodcast_error(error, StatusCode::INTERNAL_SERVER_ERROR, message).await;
    }

    #[tokio::test]
    async fn district_not_found_error() {
        let error = FloodcastError::DistrictNotFound {
            district: "UNKNOWNPLACE".to_string(),
        };
        let message = "District UNKNOWNPLACE not found";
        test_floodcast_error(error, StatusCode::NOT_FOUND, message).await;
    }

    #[tokio::test]
    async fn request_data_validation_error() {
        let mut validation_errors = validator::ValidationErrors::new();
        let validation_error = validator::ValidationError::new("foo");
        validation_errors.add("bar", validation_error);
        let error = FloodcastError::RequestDataValidation(validation_errors);
        let message = "request data is not valid";
        test_floodcast_error(error, StatusCode::BAD_REQUEST, message).await;
    }
}
