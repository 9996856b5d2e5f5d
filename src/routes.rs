use std::sync::Arc;

use slog::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::BackendError;

mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// Formats wrapped backend errors as the JSON error body promised to
/// clients, logging them on the way out. Anything else passes through
/// to warp's default handling.
pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Request failed"; "context" => ?r.context, "status" => %status_code_for(e), "message" => %e);

        return Ok(with_status(json(&r.flatten()), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &BackendError) -> StatusCode {
    use BackendError::*;

    match e {
        InvalidJson { .. } => StatusCode::BAD_REQUEST,
        Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Serialization { .. } | AppendFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use std::convert::Infallible;

    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;

    use super::handlers;
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    fn with_environment(
        environment: Environment,
    ) -> impl Filter<Extract = (Environment,), Error = Infallible> + Clone {
        warp::any().map(move || environment.clone())
    }

    pub fn make_ping_route(environment: Environment) -> Route {
        warp::path("ping")
            .and(end())
            .and(warp::get())
            .and(with_environment(environment))
            .and_then(handlers::ping)
            .boxed()
    }

    /// `POST /v1/survey`. CORS is open to any origin on the `/v1` tree
    /// so static pages can post from anywhere.
    pub fn make_survey_route(environment: Environment) -> Route {
        let cors = warp::cors()
            .allow_any_origin()
            .allow_headers(vec!["content-type"])
            .allow_methods(vec!["POST"]);

        warp::path("v1")
            .and(warp::path("survey"))
            .and(end())
            .and(warp::post())
            .and(with_environment(environment))
            .and(warp::header::optional::<String>("x-forwarded-for"))
            .and(warp::addr::remote())
            .and(warp::body::bytes())
            .and_then(handlers::submit_survey)
            .with(cors)
            .map(|reply| Box::new(reply) as Box<dyn Reply>)
            .boxed()
    }

    pub fn make_submit_route(environment: Environment) -> Route {
        warp::path("submit")
            .and(end())
            .and(warp::post())
            .and(with_environment(environment))
            .and(warp::body::bytes())
            .and_then(handlers::submit)
            .boxed()
    }
}
