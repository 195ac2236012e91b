use axum::extract::{Multipart, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::domain::{ContentType, DocumentSession, SessionId, UploadedDocument};
use crate::presentation::state::DemoState;
use crate::presentation::views::{PageView, PanelView, UPLOAD_FIRST_MESSAGE, UploadView};

use super::session_cookie::{session_cookie, session_id_from_headers};

pub const UPLOAD_FIELD: &str = "document";

#[derive(Debug, thiserror::Error)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    Missing,
    #[error("Failed to read upload: {0}")]
    Unreadable(String),
    #[error("Unsupported file type '{filename}'. Supported: {accepted}")]
    UnsupportedType { filename: String, accepted: String },
}

impl UploadRejection {
    fn status(&self) -> StatusCode {
        match self {
            UploadRejection::Missing | UploadRejection::Unreadable(_) => StatusCode::BAD_REQUEST,
            UploadRejection::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

async fn load_session(state: &DemoState, headers: &HeaderMap) -> DocumentSession {
    let id = session_id_from_headers(headers).unwrap_or_default();
    state
        .sessions
        .load(id)
        .await
        .unwrap_or_else(|| DocumentSession::new(id))
}

fn render(
    state: &DemoState,
    session_id: SessionId,
    status: StatusCode,
    view: &PageView,
) -> Response {
    match state.renderer.render(view) {
        Ok(html) => {
            let cookie = session_cookie(session_id, state.session_ttl);
            (status, [(SET_COOKIE, cookie)], Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn read_document(mut multipart: Multipart) -> Result<UploadedDocument, UploadRejection> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadRejection::Unreadable(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(UploadRejection::Missing),
        };

        let Some(content_type) = ContentType::from_filename(&filename) else {
            return Err(UploadRejection::UnsupportedType {
                filename,
                accepted: ContentType::ACCEPTED_EXTENSIONS.join(", "),
            });
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| UploadRejection::Unreadable(e.to_string()))?;

        return Ok(UploadedDocument::new(filename, content_type, data.to_vec()));
    }

    Err(UploadRejection::Missing)
}

#[tracing::instrument(skip_all)]
pub async fn index_handler(State(state): State<DemoState>, headers: HeaderMap) -> Response {
    let session = load_session(&state, &headers).await;
    let services = state.cloud.resolve().await;

    let view = PageView::new(services).with_session(&session);
    render(&state, session.id, StatusCode::OK, &view)
}

/// Upload, analyze, store, summarize, render; one sequential chain.
#[tracing::instrument(skip_all)]
pub async fn upload_handler(
    State(state): State<DemoState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let mut session = load_session(&state, &headers).await;
    let services = state.cloud.resolve().await;
    let mut view = PageView::new(services);

    let document = match read_document(multipart).await {
        Ok(document) => document,
        Err(rejection) => {
            tracing::warn!(error = %rejection, session_id = %session.id, "Upload rejected");
            let status = rejection.status();
            let mut view = view.with_session(&session);
            view.upload_error = Some(rejection.to_string());
            return render(&state, session.id, status, &view);
        }
    };

    tracing::info!(
        session_id = %session.id,
        filename = %document.filename,
        bytes = document.data.len(),
        "Document uploaded"
    );

    view.upload = Some(UploadView {
        filename: document.filename.clone(),
        size_bytes: document.size_bytes(),
    });

    view.analysis = match services.pipeline.analyze(&mut session, &document).await {
        Ok(analysis) => PanelView::analysis(analysis),
        Err(e) => PanelView::error(e.to_string()),
    };

    view.insight = if session.is_ready_for_insight() {
        match services.pipeline.summarize(&mut session).await {
            Ok(insight) => PanelView::insight(insight),
            Err(e) => PanelView::error(e.to_string()),
        }
    } else {
        PanelView::notice(UPLOAD_FIRST_MESSAGE)
    };

    let session_id = session.id;
    state.sessions.save(session).await;

    render(&state, session_id, StatusCode::OK, &view.with_mock_notices())
}

/// Regenerates insights from the session's stored analysis.
#[tracing::instrument(skip_all)]
pub async fn insights_handler(State(state): State<DemoState>, headers: HeaderMap) -> Response {
    let mut session = load_session(&state, &headers).await;
    let services = state.cloud.resolve().await;

    if !session.is_ready_for_insight() {
        tracing::debug!(session_id = %session.id, "Insight requested before analysis");
        let mut view = PageView::new(services).with_session(&session);
        view.insight = PanelView::notice(UPLOAD_FIRST_MESSAGE);
        return render(&state, session.id, StatusCode::OK, &view);
    }

    let outcome = services
        .pipeline
        .summarize(&mut session)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string());

    let mut view = PageView::new(services).with_session(&session);
    if let Err(message) = outcome {
        view.insight = PanelView::error(message);
    }

    let session_id = session.id;
    state.sessions.save(session).await;

    render(&state, session_id, StatusCode::OK, &view)
}
