use std::error::Error;
use std::sync::Arc;

use slog::info;
use warp::Filter;

use survey_backend::config::{get_port, get_survey_log_path, SUBMISSIONS_FILE};
use survey_backend::environment::Environment;
use survey_backend::log::initialize_logger;
use survey_backend::routes;
use survey_backend::store::FileStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = Arc::new(initialize_logger());

    let port = get_port();
    info!(logger, "Starting..."; "port" => port);

    let survey_store = Arc::new(FileStore::new(get_survey_log_path()));
    let submit_store = Arc::new(FileStore::new(SUBMISSIONS_FILE));

    let environment = Environment::new(logger.clone(), survey_store, submit_store);

    let logger2 = logger.clone();
    let routes = routes::make_ping_route(environment.clone())
        .or(routes::make_survey_route(environment.clone()))
        .or(routes::make_submit_route(environment))
        .recover(move |r| routes::format_rejection(logger2.clone(), r));

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], port), async {
            tokio::signal::ctrl_c().await.ok();
        });

    info!(logger, "Listening"; "addr" => %addr);

    server.await;

    info!(logger, "Exiting gracefully...");

    Ok(())
}
