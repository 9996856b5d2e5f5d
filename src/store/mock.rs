use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::errors::BackendError;
use crate::store::Store;

/// A store that keeps appended lines in memory.
#[derive(Default)]
pub struct MockStore {
    lines: RwLock<Vec<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        MockStore::default()
    }

    /// The lines appended so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().unwrap().clone()
    }
}

impl Store for MockStore {
    fn append(&self, line: String) -> BoxFuture<Result<(), BackendError>> {
        mock_append(self, line).boxed()
    }
}

async fn mock_append(store: &MockStore, line: String) -> Result<(), BackendError> {
    store.lines.write().unwrap().push(line);

    Ok(())
}
