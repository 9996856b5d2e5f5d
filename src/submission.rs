use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::errors::FieldError;
use crate::id::{derive_submission_id, hash_sha256};

/// The timestamp format used on the wire and in records: ISO-8601 with
/// offset.
pub(crate) const TIMESTAMP_FORMAT: &str = "%FT%T%z";

/// A validated survey submission as the client sent it. Lives only for
/// the duration of one request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SurveySubmission {
    /// The email provided. No format check beyond being a string.
    pub email: String,

    /// The age provided. Any integer is accepted.
    pub age: i64,

    /// The id the caller wants this submission stored under, if any.
    /// Used verbatim when present; see [`crate::id`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,

    /// The user agent reported in the payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl SurveySubmission {
    /// Validates a parsed JSON body.
    ///
    /// Unknown fields are ignored. All violations are collected rather
    /// than stopping at the first, so the caller sees every offending
    /// field at once.
    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        let object = match body.as_object() {
            Some(object) => object,
            None => {
                return Err(vec![FieldError::new(
                    "__root__",
                    "type_error.dict",
                    "value is not a valid dict",
                )])
            }
        };

        let mut errors = Vec::new();

        let email = match object.get("email") {
            Some(Value::String(email)) => Some(email.clone()),
            Some(_) => {
                errors.push(FieldError::new("email", "type_error.str", "str type expected"));
                None
            }
            None => {
                errors.push(FieldError::new("email", "value_error.missing", "field required"));
                None
            }
        };

        let age = match object.get("age") {
            Some(value) => match value.as_i64() {
                Some(age) => Some(age),
                None => {
                    errors.push(FieldError::new(
                        "age",
                        "type_error.integer",
                        "value is not a valid integer",
                    ));
                    None
                }
            },
            None => {
                errors.push(FieldError::new("age", "value_error.missing", "field required"));
                None
            }
        };

        let submission_id = match object.get("submission_id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Null) | None => None,
            Some(_) => {
                errors.push(FieldError::new(
                    "submission_id",
                    "type_error.str",
                    "str type expected",
                ));
                None
            }
        };

        let user_agent = match object.get("user_agent") {
            Some(Value::String(agent)) => Some(agent.clone()),
            Some(Value::Null) | None => None,
            Some(_) => {
                errors.push(FieldError::new(
                    "user_agent",
                    "type_error.str",
                    "str type expected",
                ));
                None
            }
        };

        match (email, age) {
            (Some(email), Some(age)) if errors.is_empty() => Ok(SurveySubmission {
                email,
                age,
                submission_id,
                user_agent,
            }),
            _ => Err(errors),
        }
    }
}

/// The persisted form of an accepted `POST /v1/survey` submission: the
/// client's fields carried through raw, plus the server-derived ones.
/// Immutable once appended.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoredSurveyRecord {
    pub email: String,

    pub age: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Non-empty by construction: the caller's value when supplied,
    /// otherwise derived from the email and the current UTC hour.
    pub submission_id: String,

    /// When the server received the submission, UTC.
    pub received_at: String,

    /// The client address; may be empty when neither a forwarded-for
    /// header nor a socket peer address was available.
    pub ip: String,
}

impl StoredSurveyRecord {
    /// Builds the record for a submission received now from `ip`.
    pub fn build(submission: SurveySubmission, ip: String) -> Self {
        let SurveySubmission {
            email,
            age,
            submission_id,
            user_agent,
        } = submission;

        let submission_id = submission_id.unwrap_or_else(|| derive_submission_id(&email));
        let received_at = OffsetDateTime::now_utc().format(TIMESTAMP_FORMAT);

        StoredSurveyRecord {
            email,
            age,
            user_agent,
            submission_id,
            received_at,
            ip,
        }
    }
}

/// The persisted form of a `POST /submit` submission: email and age are
/// stored one-way hashed, under the same field names the raw path uses.
/// The digests are unsalted, so they are not secrets (see [`crate::id`]).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HashedSubmissionRecord {
    pub email: String,

    pub age: String,

    pub submission_id: String,

    pub user_agent: Option<String>,
}

impl HashedSubmissionRecord {
    /// Builds the hashed record, deriving a submission id when the
    /// caller did not supply one.
    pub fn build(submission: SurveySubmission) -> Self {
        let SurveySubmission {
            email,
            age,
            submission_id,
            user_agent,
        } = submission;

        let submission_id = submission_id.unwrap_or_else(|| derive_submission_id(&email));

        HashedSubmissionRecord {
            email: hash_sha256(&email),
            age: hash_sha256(&age.to_string()),
            submission_id,
            user_agent,
        }
    }
}
