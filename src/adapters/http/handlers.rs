//! HTTP handlers for the engine's inbound operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::assessment::{
    ConfirmProfileCommand, ConfirmProfileHandler, NextQuestionHandler, NextQuestionQuery,
    StartSessionCommand, StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::application::handlers::interaction::{
    GetConfigurationHandler, GetConfigurationQuery, ReportEventCommand, ReportEventHandler,
};
use crate::application::handlers::profile::{
    DeleteProfileCommand, DeleteProfileHandler, GetProfileHandler, GetProfileQuery,
};
use crate::domain::detector::InteractionEvent;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};

use super::dto::{
    ConfigurationResponse, ConfirmProfileRequest, ConfirmProfileResponse, ErrorResponse,
    ProfileResponse, ReportEventRequest, ReportEventResponse, SessionProgressResponse,
    StartSessionRequest, StartSessionResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};

/// Shared handler state for the router.
#[derive(Clone)]
pub struct EngineHandlers {
    pub start_session: Arc<StartSessionHandler>,
    pub submit_answer: Arc<SubmitAnswerHandler>,
    pub next_question: Arc<NextQuestionHandler>,
    pub confirm_profile: Arc<ConfirmProfileHandler>,
    pub report_event: Arc<ReportEventHandler>,
    pub get_configuration: Arc<GetConfigurationHandler>,
    pub get_profile: Arc<GetProfileHandler>,
    pub delete_profile: Arc<DeleteProfileHandler>,
}

fn error_response(err: DomainError) -> Response {
    let status = match err.code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound | ErrorCode::ProfileNotFound | ErrorCode::QuestionNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::SequenceViolation
        | ErrorCode::SessionClosed
        | ErrorCode::Conflict
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::ConfigurationGap | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(&err))).into_response()
}

fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(DomainError::from)
}

fn parse_session_id(raw: &str) -> Result<SessionId, DomainError> {
    raw.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::SessionNotFound,
            format!("'{}' is not a session id", raw),
        )
    })
}

/// POST /api/assessment/sessions
pub async fn start_session(
    State(handlers): State<EngineHandlers>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let user_id = match parse_user_id(&req.user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    let cmd = StartSessionCommand {
        user_id,
        mode: req.mode,
        known_types: req.known_types.into_iter().collect(),
    };
    match handlers.start_session.handle(cmd).await {
        Ok(result) => {
            let response: StartSessionResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// POST /api/assessment/sessions/:id/answers
pub async fn submit_answer(
    State(handlers): State<EngineHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        question_id: req.question_id,
        answer: req.answer,
        sequence: req.sequence,
    };
    match handlers.submit_answer.handle(cmd).await {
        Ok(result) => {
            let response: SubmitAnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/assessment/sessions/:id/progress
pub async fn session_progress(
    State(handlers): State<EngineHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    match handlers
        .next_question
        .handle(NextQuestionQuery { session_id })
        .await
    {
        Ok(progress) => {
            let response: SessionProgressResponse = progress.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// POST /api/assessment/sessions/:id/confirm
pub async fn confirm_profile(
    State(handlers): State<EngineHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<ConfirmProfileRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };

    let cmd = ConfirmProfileCommand {
        session_id,
        confirmed: req.confirmed,
        adjustments: req.adjustments.into_iter().collect(),
    };
    match handlers.confirm_profile.handle(cmd).await {
        Ok(result) => {
            let response: ConfirmProfileResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// POST /api/events
pub async fn report_event(
    State(handlers): State<EngineHandlers>,
    Json(req): Json<ReportEventRequest>,
) -> Response {
    let user_id = match parse_user_id(&req.user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    let cmd = ReportEventCommand {
        user_id,
        event: InteractionEvent::new(Timestamp::now(), req.event),
    };
    match handlers.report_event.handle(cmd).await {
        Ok(result) => (
            StatusCode::ACCEPTED,
            Json(ReportEventResponse {
                state: result.state,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/users/:user_id/configuration
pub async fn get_configuration(
    State(handlers): State<EngineHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    match handlers
        .get_configuration
        .handle(GetConfigurationQuery { user_id })
        .await
    {
        Ok(snapshot) => {
            let response: ConfigurationResponse = snapshot.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/users/:user_id/profile
pub async fn get_profile(
    State(handlers): State<EngineHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    match handlers
        .get_profile
        .handle(GetProfileQuery {
            user_id: user_id.clone(),
        })
        .await
    {
        Ok(Some(summary)) => {
            let response: ProfileResponse = summary.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                code: ErrorCode::ProfileNotFound.to_string(),
                message: format!("No profile for user {}", user_id),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/users/:user_id/profile
pub async fn delete_profile(
    State(handlers): State<EngineHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    match handlers
        .delete_profile
        .handle(DeleteProfileCommand { user_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}
