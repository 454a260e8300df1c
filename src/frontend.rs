//! The query front-end: one query in, one rendered outcome out.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::PlaceBackend;
use crate::place::Query;
use crate::render::PlaceView;

/// Result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The query was blank; no request was made.
    Idle,
    /// The backend call failed; carries the failure description.
    Failed(String),
    /// The backend answered; carries the view to render.
    Answered(PlaceView),
}

/// Accepts a raw query, calls the backend once and builds the view.
#[derive(Clone)]
pub struct QueryFrontEnd {
    backend: Arc<dyn PlaceBackend>,
}

impl std::fmt::Debug for QueryFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryFrontEnd").finish_non_exhaustive()
    }
}

impl QueryFrontEnd {
    #[must_use]
    pub fn new(backend: Arc<dyn PlaceBackend>) -> Self {
        Self { backend }
    }

    /// Submit `raw` to the backend.
    ///
    /// Blank input is a silent no-op. Any failure ends the submission with
    /// [`Outcome::Failed`]; nothing is retried.
    pub async fn submit(&self, raw: &str) -> Outcome {
        let Some(query) = Query::parse(raw) else {
            debug!("Ignoring blank query");
            return Outcome::Idle;
        };

        match self.backend.ask(&query).await {
            Ok(card) => Outcome::Answered(PlaceView::from_card(card)),
            Err(e) => {
                warn!(name: "backend.failed", error = %e, query = %query, "Chat backend call failed");
                Outcome::Failed(e.to_string())
            }
        }
    }
}
