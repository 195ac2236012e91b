use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{CloudProxy, ProxyError};
use crate::presentation::state::ProxyState;

#[derive(Deserialize)]
pub struct LlmParams {
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct CognitiveParams {
    pub text: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorDetail { detail })).into_response()
}

fn relay(result: Result<Value, ProxyError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Upstream call failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[tracing::instrument(skip(state, params))]
pub async fn llm_handler<P>(
    State(state): State<ProxyState<P>>,
    params: Result<Query<LlmParams>, QueryRejection>,
) -> Response
where
    P: CloudProxy + 'static,
{
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected /llm query");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    relay(state.proxy.completion(&params.prompt).await)
}

#[tracing::instrument(skip(state, params))]
pub async fn cognitive_handler<P>(
    State(state): State<ProxyState<P>>,
    params: Result<Query<CognitiveParams>, QueryRejection>,
) -> Response
where
    P: CloudProxy + 'static,
{
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected /cognitive query");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    relay(state.proxy.sentiment(&params.text).await)
}
