use std::sync::Arc;

use slog::Logger;

use crate::store::Store;

pub type SharedStore = Arc<dyn Store>;

/// Everything a request handler needs, constructed once at startup and
/// passed into the filters explicitly.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,

    /// Destination for `POST /v1/survey` records.
    pub survey_store: SharedStore,

    /// Destination for `POST /submit` records.
    pub submit_store: SharedStore,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, survey_store: SharedStore, submit_store: SharedStore) -> Self {
        Self {
            logger,
            survey_store,
            submit_store,
        }
    }
}
