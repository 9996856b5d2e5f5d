use serde::Serialize;

/// Success bodies for each route.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Ping {
        status: &'a str,
        message: &'a str,
        utc_time: String,
    },
    Survey {
        status: &'a str,
    },
    Submit {
        message: &'a str,
        submission_id: String,
    },
}
