// src/controller.rs
//! Upload-and-render controller
//!
//! One `submit` call is one form submission: reset the page, send the résumé,
//! then render the result or the error. Each submission takes a generation
//! number under the page lock. Starting a new submission with a file (or calling
//! `cancel`) aborts the request in flight, and a response whose generation is
//! no longer current never touches the page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::core::ResumeAnalyzer;
use crate::error::AnalysisError;
use crate::page::{Page, Region};
use crate::types::{AnalysisResult, ResumeFile};

pub const MISSING_FILE_ALERT: &str = "Please select a file!";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing selected, nothing sent; the message is for a blocking alert
    Alert(String),
    /// Results region is showing this analysis
    Rendered(AnalysisResult),
    /// Error region is showing the failure
    Failed(AnalysisError),
    /// A newer submission or a cancel took over; the page was not touched
    Superseded,
}

struct InFlight {
    generation: u64,
    handle: AbortHandle,
}

pub struct UploadController {
    analyzer: Arc<dyn ResumeAnalyzer>,
    page: Mutex<Page>,
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
}

impl UploadController {
    pub fn new(analyzer: Arc<dyn ResumeAnalyzer>) -> Self {
        Self {
            analyzer,
            page: Mutex::new(Page::new()),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    /// Snapshot of the page as it is now
    pub fn page(&self) -> Page {
        self.lock_page().clone()
    }

    fn lock_page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn abort_in_flight(&self) -> bool {
        match self.lock_in_flight().take() {
            Some(previous) => {
                debug!("Aborting submission #{}", previous.generation);
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    pub async fn submit(&self, selection: Option<ResumeFile>) -> SubmitOutcome {
        let Some(resume) = selection else {
            return self.reject_missing_file();
        };

        let generation = {
            let mut page = self.lock_page();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            page.hide(Region::Results);
            page.hide(Region::Error);
            page.show(Region::Loading);
            generation
        };
        self.abort_in_flight();

        info!(
            "Submission #{}: analyzing {}",
            generation, resume.file_name
        );

        let analyzer = Arc::clone(&self.analyzer);
        let task = tokio::spawn(async move { analyzer.analyze(&resume).await });
        {
            let mut in_flight = self.lock_in_flight();
            if self.generation.load(Ordering::SeqCst) == generation {
                let current = InFlight {
                    generation,
                    handle: task.abort_handle(),
                };
                if let Some(previous) = in_flight.replace(current) {
                    previous.handle.abort();
                }
            } else {
                task.abort();
            }
        }

        let joined = task.await;

        {
            let mut in_flight = self.lock_in_flight();
            if in_flight
                .as_ref()
                .is_some_and(|current| current.generation == generation)
            {
                *in_flight = None;
            }
        }

        let result = match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                debug!("Submission #{} was cancelled", generation);
                return SubmitOutcome::Superseded;
            }
            Err(e) => Err(AnalysisError::Network(e.to_string())),
        };

        let mut page = self.lock_page();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale response for submission #{}", generation);
            return SubmitOutcome::Superseded;
        }

        match result {
            Ok(analysis) => {
                page.render_analysis(&analysis);
                page.hide(Region::Loading);
                page.show(Region::Results);
                info!("Submission #{} rendered", generation);
                SubmitOutcome::Rendered(analysis)
            }
            Err(err) => {
                warn!(
                    "Submission #{} failed ({}): {}",
                    generation,
                    err.kind(),
                    err
                );
                page.hide(Region::Loading);
                page.set_error_text(err.to_string());
                page.show(Region::Error);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Alert path: no request is sent and a request already in flight keeps
    /// running, so loading stays visible only while one is pending.
    fn reject_missing_file(&self) -> SubmitOutcome {
        let mut page = self.lock_page();
        page.hide(Region::Results);
        page.hide(Region::Error);
        if self.lock_in_flight().is_some() {
            page.show(Region::Loading);
        } else {
            page.hide(Region::Loading);
        }
        warn!("Submission without a file");
        SubmitOutcome::Alert(MISSING_FILE_ALERT.to_string())
    }

    /// Abort the submission in flight, if any, and clear the loading indicator
    pub fn cancel(&self) -> bool {
        let mut page = self.lock_page();
        self.generation.fetch_add(1, Ordering::SeqCst);
        let cancelled = self.abort_in_flight();
        page.hide(Region::Loading);
        if cancelled {
            info!("Submission cancelled");
        }
        cancelled
    }
}
