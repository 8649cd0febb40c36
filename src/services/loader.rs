//! Fetch lifecycle for one heatmap: idle → loading → success | error
//!
//! Every accepted request bumps a generation counter. Fetch results carry the
//! generation they were issued under, and only the current generation may
//! commit, so a slow response for an old subject can never overwrite a newer one.

use std::time::{Duration, Instant};

use crate::types::{ContributionData, Result};

use super::debounce::{Debouncer, DEFAULT_DEBOUNCE};

/// The only message users see for transport, status and parse failures
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contribution data";

/// Invoked once per successful fetch
pub type DataLoadCallback = Box<dyn FnMut(&ContributionData)>;

/// What to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub subject: String,
    pub api_url: String,
}

/// A request cleared to run, stamped with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// No subject yet
    Idle,
    /// Waiting for the debounce window or the response
    Loading,
    Success(ContributionData),
    Error(String),
}

pub struct HeatmapLoader {
    state: FetchState,
    current: Option<FetchRequest>,
    generation: u64,
    debouncer: Debouncer<FetchRequest>,
    on_data_load: Option<DataLoadCallback>,
    mounted: bool,
}

impl HeatmapLoader {
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(delay: Duration) -> Self {
        Self {
            state: FetchState::Idle,
            current: None,
            generation: 0,
            debouncer: Debouncer::new(delay),
            on_data_load: None,
            mounted: true,
        }
    }

    /// Register the data-loaded observer
    pub fn on_data_load(mut self, callback: impl FnMut(&ContributionData) + 'static) -> Self {
        self.on_data_load = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Loaded data, only while in `Success`
    pub fn data(&self) -> Option<&ContributionData> {
        match &self.state {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn current_request(&self) -> Option<&FetchRequest> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask for `subject` from `api_url`. Re-requesting the current pair is a no-op.
    /// Returns whether a new fetch cycle started.
    pub fn request(&mut self, subject: &str, api_url: &str, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let request = FetchRequest {
            subject: subject.to_string(),
            api_url: api_url.to_string(),
        };
        if self.current.as_ref() == Some(&request) {
            return false;
        }
        self.start_cycle(request, now);
        true
    }

    /// Refetch the current request (user re-confirmed the same subject)
    pub fn retry(&mut self, now: Instant) -> bool {
        match (self.mounted, self.current.clone()) {
            (true, Some(request)) => {
                self.start_cycle(request, now);
                true
            }
            _ => false,
        }
    }

    /// Drop the subject entirely and go back to `Idle`
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.generation += 1;
        self.current = None;
        self.state = FetchState::Idle;
    }

    fn start_cycle(&mut self, request: FetchRequest, now: Instant) {
        self.generation += 1;
        log::debug!(
            "loader: scheduling '{}' (generation {})",
            request.subject,
            self.generation
        );
        self.current = Some(request.clone());
        self.state = FetchState::Loading;
        self.debouncer.schedule(request, now);
    }

    /// Hand out the pending request once the debounce window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<FetchTicket> {
        if !self.mounted {
            return None;
        }
        let request = self.debouncer.poll(now)?;
        log::debug!(
            "loader: issuing '{}' (generation {})",
            request.subject,
            self.generation
        );
        Some(FetchTicket {
            generation: self.generation,
            request,
        })
    }

    /// How long the event loop may wait before `poll` has work
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    /// Commit a fetch result. Returns `false` when the result was discarded
    /// because it is stale, duplicated, or arrived after unmount.
    pub fn complete(&mut self, generation: u64, result: Result<ContributionData>) -> bool {
        if !self.mounted || generation != self.generation {
            log::debug!(
                "loader: discarding result for generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        if self.state != FetchState::Loading {
            return false;
        }

        match result {
            Ok(data) => {
                if let Some(callback) = self.on_data_load.as_mut() {
                    callback(&data);
                }
                self.state = FetchState::Success(data);
            }
            Err(e) => {
                log::warn!("loader: fetch failed: {}", e);
                self.state = FetchState::Error(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Tear down: cancel the pending fetch; nothing commits or calls back afterwards
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.mounted = false;
        self.state = FetchState::Idle;
    }
}

impl Default for HeatmapLoader {
    fn default() -> Self {
        Self::new()
    }
}
