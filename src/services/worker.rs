//! Runs fetch tickets off the UI thread and reports back over a channel

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::types::{ContributionData, Result};

use super::fetcher::ContributionSource;
use super::loader::FetchTicket;

/// Outcome of one ticket
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<ContributionData>,
}

/// Spawns one short-lived thread per ticket. Results land in `try_recv`;
/// the loader decides whether they are still wanted.
pub struct FetchWorker {
    source: Arc<dyn ContributionSource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FetchWorker {
    pub fn new(source: Arc<dyn ContributionSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    pub fn submit(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let FetchTicket {
                generation,
                request,
            } = ticket;
            let result = source.fetch(&request.api_url, &request.subject);
            // Receiver gone means the app quit; nothing to report to
            let _ = tx.send(FetchOutcome { generation, result });
        });
    }

    /// Next finished fetch, if any (non-blocking)
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }
}
