use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::web::{log, Error};

/// Maps every outgoing response.
/// Errors stashed in the response extensions get converted to the client-facing
/// `{"message": ...}` JSON bodies, a request log-line is emitted, and the CORS
/// headers are attached. The headers go on *every* branch, error responses
/// included, so that browser callers can always read the body.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let uuid = Uuid::new_v4();

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| er.as_ref());
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error.as_ref().map(|(status, cl_err)| {
        let client_error_body = json!({ "message": cl_err.to_string() });

        (*status, Json(client_error_body)).into_response()
    });

    let _ = log::log_request(
        uuid,
        req_method,
        uri,
        resp.status(),
        web_error,
        client_status_and_error,
    )
    .await;

    let mut resp = err_resp.unwrap_or(resp);
    append_cors_headers(&mut resp);
    resp
}

fn append_cors_headers(resp: &mut Response) {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("OPTIONS, POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
