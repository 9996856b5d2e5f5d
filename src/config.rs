use std::env;

/// The fixed destination for `POST /submit` records.
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Returns the port to bind. Defaults to 0, meaning any free port.
pub fn get_port() -> u16 {
    env::var("SURVEY_PORT")
        .ok()
        .map(|p| p.parse().expect("parse SURVEY_PORT as u16"))
        .unwrap_or(0)
}

/// Returns the destination for `POST /v1/survey` records.
pub fn get_survey_log_path() -> String {
    get_variable("SURVEY_LOG_PATH")
}
