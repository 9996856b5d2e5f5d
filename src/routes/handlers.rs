use std::net::SocketAddr;

use bytes::Bytes;
use slog::debug;
use time::OffsetDateTime;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::BackendError;
use crate::routes::rejection::{Context, Rejection};
use crate::routes::response::SuccessResponse;
use crate::submission::{HashedSubmissionRecord, StoredSurveyRecord, SurveySubmission, TIMESTAMP_FORMAT};

type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

/// `GET /ping`: health check. Never touches the stores.
pub async fn ping(environment: Environment) -> RouteResult {
    debug!(environment.logger, "Ping");

    let response = SuccessResponse::Ping {
        status: "ok",
        message: "API is alive",
        utc_time: OffsetDateTime::now_utc().format(TIMESTAMP_FORMAT),
    };

    Ok(Box::new(json(&response)) as Box<dyn Reply>)
}

/// `POST /v1/survey`: validate, derive identity, append one raw record
/// to the survey log.
pub async fn submit_survey(
    environment: Environment,
    forwarded_for: Option<String>,
    remote: Option<SocketAddr>,
    body: Bytes,
) -> RouteResult {
    let Environment {
        logger,
        survey_store,
        ..
    } = environment;

    let submission =
        parse_submission(&body).map_err(|e| Rejection::new(Context::survey(None), e))?;

    let ip = client_ip(forwarded_for, remote);
    let record = StoredSurveyRecord::build(submission, ip);
    let id = record.submission_id.clone();

    debug!(logger, "Appending survey record..."; "submission_id" => &id);
    let line = serde_json::to_string(&record).map_err(|source| {
        Rejection::new(
            Context::survey(Some(id.clone())),
            BackendError::Serialization { source },
        )
    })?;
    survey_store
        .append(line)
        .await
        .map_err(|e| Rejection::new(Context::survey(Some(id)), e))?;

    let response = SuccessResponse::Survey { status: "ok" };

    Ok(Box::new(with_status(json(&response), StatusCode::CREATED)) as Box<dyn Reply>)
}

/// `POST /submit`: validate, derive identity, append one record with
/// hashed email and age to the fixed submissions file.
pub async fn submit(environment: Environment, body: Bytes) -> RouteResult {
    let Environment {
        logger,
        submit_store,
        ..
    } = environment;

    let submission =
        parse_submission(&body).map_err(|e| Rejection::new(Context::submit(None), e))?;

    let record = HashedSubmissionRecord::build(submission);
    let id = record.submission_id.clone();

    debug!(logger, "Appending hashed submission..."; "submission_id" => &id);
    let line = serde_json::to_string(&record).map_err(|source| {
        Rejection::new(
            Context::submit(Some(id.clone())),
            BackendError::Serialization { source },
        )
    })?;
    submit_store
        .append(line)
        .await
        .map_err(|e| Rejection::new(Context::submit(Some(id.clone())), e))?;

    let response = SuccessResponse::Submit {
        message: "Submission saved successfully",
        submission_id: id,
    };

    Ok(Box::new(json(&response)) as Box<dyn Reply>)
}

/// Parses the body as JSON, then validates it into a submission. A
/// missing or unparseable body is a different failure than a schema
/// violation.
fn parse_submission(body: &Bytes) -> Result<SurveySubmission, BackendError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|source| BackendError::InvalidJson { source })?;

    SurveySubmission::from_value(&value).map_err(|errors| BackendError::Validation { errors })
}

/// Resolves the client address: trusted proxy header first, then the
/// socket peer, then empty. An empty address is accepted, not an error.
fn client_ip(forwarded_for: Option<String>, remote: Option<SocketAddr>) -> String {
    forwarded_for
        .unwrap_or_else(|| remote.map(|addr| addr.ip().to_string()).unwrap_or_default())
}
