use std::fmt::Write;

use super::{Page, Region};

/// Plain-text rendering of the visible regions
pub fn render_terminal(page: &Page) -> String {
    let mut out = String::new();

    if page.is_visible(Region::Loading) {
        out.push_str("Analyzing resume...\n");
    }

    if page.is_visible(Region::Error) {
        let _ = writeln!(out, "Error: {}", sanitize(page.error_text()));
    }

    if page.is_visible(Region::Results) {
        write_list(&mut out, "Skills", page.skills());
        write_list(&mut out, "Education", page.education());

        out.push_str("Experience\n");
        for line in page.experience().lines() {
            let _ = writeln!(out, "  {}", sanitize(line));
        }

        write_list(&mut out, "Job Matches", page.job_matches());
    }

    out
}

fn write_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "{}", heading);
    for item in items {
        let _ = writeln!(out, "  - {}", sanitize(item));
    }
}

/// Server text must not drive the terminal: control characters become spaces
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
