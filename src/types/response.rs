use serde::{Deserialize, Deserializer, Serialize};

// ===== Analysis Service Response Types =====

/// Body of a successful `POST /analyze-resume`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    /// `null` or absent renders as an empty text region
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: String,
    pub job_matches: Vec<JobMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_title: String,
    pub match_score: f64,
    /// Skills the server found in both the résumé and the posting
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_skills: Vec<String>,
}

impl JobMatch {
    pub fn new(job_title: impl Into<String>, match_score: f64) -> Self {
        Self {
            job_title: job_title.into(),
            match_score,
            matched_skills: Vec::new(),
        }
    }

    /// Item text shown in the job matches list
    pub fn display_line(&self) -> String {
        format!(
            "{} (Match Score: {})",
            self.job_title,
            format_score(self.match_score)
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scores print like a browser prints a JSON number: `3` rather than `3.0`,
/// exponent form outside `[1e-6, 1e21)`
pub fn format_score(score: f64) -> String {
    if score == 0.0 {
        // covers -0.0
        return "0".to_string();
    }

    let magnitude = score.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{:e}", score);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    score.to_string()
}
