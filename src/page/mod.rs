//! In-memory results page
//!
//! Mirrors the regions of the upload page: a loading indicator, a results
//! block with four rendering targets, and an error block. Only the upload
//! controller mutates it. Every list item and text target holds plain text;
//! renderers are responsible for escaping.

pub mod html;
pub mod terminal;

pub use html::render_html;
pub use terminal::render_terminal;

use crate::types::AnalysisResult;

pub const NO_MATCHES_TEXT: &str = "No matches found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Loading,
    Results,
    Error,
}

/// Visibility change, recorded in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Shown(Region),
    Hidden(Region),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    loading_visible: bool,
    results_visible: bool,
    error_visible: bool,
    error_text: String,
    skills: Vec<String>,
    education: Vec<String>,
    experience: String,
    job_matches: Vec<String>,
    transitions: Vec<Transition>,
}

impl Page {
    /// Fresh page: every region hidden, every target empty
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Loading => self.loading_visible,
            Region::Results => self.results_visible,
            Region::Error => self.error_visible,
        }
    }

    pub fn show(&mut self, region: Region) {
        self.set_visible(region, true);
    }

    pub fn hide(&mut self, region: Region) {
        self.set_visible(region, false);
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        let slot = match region {
            Region::Loading => &mut self.loading_visible,
            Region::Results => &mut self.results_visible,
            Region::Error => &mut self.error_visible,
        };
        if *slot == visible {
            return;
        }
        *slot = visible;
        self.transitions.push(if visible {
            Transition::Shown(region)
        } else {
            Transition::Hidden(region)
        });
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    pub fn set_error_text(&mut self, text: impl Into<String>) {
        self.error_text = text.into();
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn education(&self) -> &[String] {
        &self.education
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn job_matches(&self) -> &[String] {
        &self.job_matches
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Replace all four rendering targets with the contents of `result`.
    /// Region visibility is left untouched.
    pub fn render_analysis(&mut self, result: &AnalysisResult) {
        self.skills = result.skills.clone();
        self.education = result.education.clone();
        self.experience = result.experience.clone();

        self.job_matches = if result.job_matches.is_empty() {
            vec![NO_MATCHES_TEXT.to_string()]
        } else {
            result.job_matches.iter().map(|m| m.display_line()).collect()
        };
    }
}
