//! SkillSync résumé analysis client
//!
//! Uploads a résumé to the analysis service and renders the returned skills,
//! education, experience and job matches into a page model.

pub mod cli;
pub mod controller;
pub mod core;
pub mod error;
pub mod page;
pub mod types;
pub mod utils;

pub use controller::{SubmitOutcome, UploadController};
pub use crate::core::{AnalysisClient, ClientConfig, ResumeAnalyzer};
pub use error::AnalysisError;
pub use page::Page;
pub use types::{AnalysisResult, JobMatch, ResumeFile};
