use crate::cli::CommandLineArgs;
use crate::query::QueryService;
use crate::store::{DataPaths, DataStore};

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// Query operations over the data store.
    pub query: QueryService,
}

impl AppState {
    /// Create and return an [AppState].
    ///
    /// The store starts empty; callers run the initial load before serving.
    pub fn new(args: &CommandLineArgs) -> Self {
        let store = Arc::new(DataStore::new(DataPaths::from_args(args)));

        Self {
            args: args.clone(),
            query: QueryService::new(store),
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
