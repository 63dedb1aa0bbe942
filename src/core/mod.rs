// src/core/mod.rs
//! Configuration and the HTTP boundary

pub mod config_manager;
pub mod service_client;

pub use config_manager::{ClientConfig, ConfigOverrides};
pub use service_client::{AnalysisClient, ResumeAnalyzer};
