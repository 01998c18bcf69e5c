use serde::Serialize;
use utoipa::ToSchema;

const FEATURE_MIN_HEIGHT: u32 = 400;
const FEATURE_MIN_WIDTH: u32 = 600;
const CARD_MIN_HEIGHT: u32 = 200;
const CARD_MIN_WIDTH: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Error,
}

impl Severity {
    /// Class of the status banner on the host form.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Ok => "messages--status",
            Severity::Warning => "messages--warning",
            Severity::Error => "messages--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Finding {
    pub text: String,
    pub severity: Severity,
}

/// How well an image fits the site's feature-story and news-card slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SizeAdvisory {
    pub width: u32,
    pub height: u32,
    pub findings: Vec<Finding>,
    pub severity: Severity,
}

impl SizeAdvisory {
    /// Plain-text summary, e.g. `Image dimensions 700x500px: acceptable ...;`
    pub fn message(&self) -> String {
        let mut message = format!("Image dimensions {}x{}px:", self.width, self.height);
        for finding in &self.findings {
            message.push(' ');
            message.push_str(&finding.text);
            message.push(';');
        }
        message
    }
}

pub fn check_image_size(height: u32, width: u32) -> SizeAdvisory {
    let mut findings = Vec::with_capacity(4);

    findings.push(if height < FEATURE_MIN_HEIGHT {
        finding("likely not tall enough for top feature stories", Severity::Warning)
    } else {
        finding("acceptable height for top feature stories", Severity::Ok)
    });

    findings.push(if width < FEATURE_MIN_WIDTH {
        finding("likely not wide enough for top feature stories", Severity::Warning)
    } else {
        finding("acceptable width for top feature stories", Severity::Ok)
    });

    if height < CARD_MIN_HEIGHT {
        findings.push(finding("likely not tall enough for news cards", Severity::Error));
    }
    if width < CARD_MIN_WIDTH {
        findings.push(finding("likely not wide enough for news cards", Severity::Error));
    }

    let severity = findings
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or_default();

    SizeAdvisory {
        width,
        height,
        findings,
        severity,
    }
}

fn finding(text: &str, severity: Severity) -> Finding {
    Finding {
        text: text.to_string(),
        severity,
    }
}
