//! Standalone HTML report of a page

use super::{Page, Region};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
.hidden{display:none}#error{color:#b00020}";

/// Render the page as a complete HTML document. Regions that are not visible
/// carry the `hidden` class, the way the upload page toggles them.
pub fn render_html(page: &Page, title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_text(title)));
    out.push_str(&format!("<style>{}</style>\n", STYLE));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_text(title)));
    out.push_str(&format!(
        "<p class=\"generated\">Generated {}</p>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str(&format!(
        "<div id=\"loading\"{}>Analyzing resume...</div>\n",
        hidden_class(page, Region::Loading)
    ));

    out.push_str(&format!(
        "<div id=\"results\"{}>\n",
        hidden_class(page, Region::Results)
    ));
    push_list(&mut out, "Skills", "skillsList", page.skills());
    push_list(&mut out, "Education", "educationList", page.education());
    out.push_str(&format!(
        "<h2>Experience</h2>\n<p id=\"experienceText\">{}</p>\n",
        escape_text(page.experience())
    ));
    push_list(&mut out, "Job Matches", "jobMatchesList", page.job_matches());
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<div id=\"error\"{}>{}</div>\n",
        hidden_class(page, Region::Error),
        escape_text(page.error_text())
    ));

    out.push_str("</body>\n</html>\n");
    out
}

fn hidden_class(page: &Page, region: Region) -> &'static str {
    if page.is_visible(region) {
        ""
    } else {
        " class=\"hidden\""
    }
}

fn push_list(out: &mut String, heading: &str, id: &str, items: &[String]) {
    out.push_str(&format!("<h2>{}</h2>\n<ul id=\"{}\">\n", heading, id));
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", escape_text(item)));
    }
    out.push_str("</ul>\n");
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
