pub mod response;
pub mod upload;

pub use response::{AnalysisResult, JobMatch};
pub use upload::{ResumeFile, UPLOAD_FIELD};
