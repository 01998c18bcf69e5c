use ammonia::clean_text;
use serde_json::Value;
use std::fmt::Write;

use crate::extractor::{FieldKey, ReconciledField};
use crate::media::{RemoteMedia, Severity, SizeAdvisory};
use crate::profile::Profile;
use crate::response::Command;

pub const REVISION_LOG_MESSAGE: &str = "Node created programmatically";
const REVISION_LOG_SELECTOR: &str = "#edit-revision-log-0-value";
const NOTIFICATION_REGION: &str = ".region-highlighted";
const ALTERNATIVES_SELECTOR: &str = ".alternative-options";

/// Directives that fill the profile's form from reconciled fields.
///
/// Every field yields something: its value plus an alternates table, or a
/// notice that it is missing. The closing notification's severity is the
/// worst of the image advisory and "warning" for any missing field.
pub fn build_commands(
    profile: Profile,
    fields: &[ReconciledField],
    media: Option<&RemoteMedia>,
) -> Vec<Command> {
    let mut commands = vec![Command::remove(ALTERNATIVES_SELECTOR)];
    let mut summary = String::new();
    let mut severity = Severity::Ok;

    for field in fields {
        if field.key == FieldKey::ImageAlt && !profile.fills_image_alt() {
            continue;
        }

        if field.key == FieldKey::Image
            && let Some(media) = media
        {
            let widget = profile.image_widget();
            commands.push(Command::set_value(
                widget.value_selector,
                media.id.to_string(),
            ));
            commands.push(Command::invoke(
                widget.trigger_selector,
                "trigger",
                vec![Value::from("mousedown")],
            ));
            summary.push_str(&advisory_html(&media.size_status));
            severity = severity.max(media.size_status.severity);
            continue;
        }

        if field.key == FieldKey::Description {
            commands.push(Command::update_ckeditor_text(
                field.selector.as_str(),
                field.primary.clone().unwrap_or_default(),
            ));
            continue;
        }

        // A found image URL that could not be imported leaves nothing to fill.
        let primary = match field.key {
            FieldKey::Image => None,
            _ => field.primary.as_deref(),
        };

        match primary {
            Some(primary) => {
                commands.push(Command::set_value(field.selector.as_str(), primary));
                if let Some(table) = alternates_table(field) {
                    commands.push(Command::after(field.selector.as_str(), table));
                }
            }
            None => {
                commands.push(Command::after(field.selector.as_str(), missing_notice(field.key)));
                let _ = write!(
                    summary,
                    "<p>{} <strong>{}</strong></p>",
                    profile.missing_summary_label(),
                    field.key
                );
                severity = severity.max(Severity::Warning);
            }
        }
    }

    if let Some(selector) = profile.robots_noindex_selector() {
        commands.push(Command::invoke(
            selector,
            "prop",
            vec![Value::from("checked"), Value::from(true)],
        ));
    }

    commands.push(Command::prepend(
        NOTIFICATION_REGION,
        process_notification(&summary, severity),
    ));
    commands.push(Command::html(REVISION_LOG_SELECTOR, REVISION_LOG_MESSAGE));

    commands
}

/// `None` when the field has no alternates worth offering.
pub fn alternates_table(field: &ReconciledField) -> Option<String> {
    if field.alternates.is_empty() {
        return None;
    }

    let key = field.key.as_str();
    let target = clean_text(&field.selector);
    let mut rows = String::new();

    for (index, value) in field.alternates.iter().enumerate() {
        let i = index + 1;
        let _ = write!(
            rows,
            "<tr><td>{i}</td><td id='{key}{i}'>{}</td><td><a class='remote-value-alternative' href='#' data-update-alt-value='#{key}{i}' data-update-target='{target}'>Select</a></td></tr>",
            clean_text(value)
        );
    }

    Some(format!(
        r#"<div class="alternative-options-label">Other Options:</div><table class="alternative-options">{rows}</table>"#
    ))
}

pub fn missing_notice(key: FieldKey) -> String {
    let text = match key {
        FieldKey::Date => "Please find date".to_string(),
        other => format!("Missing {other}"),
    };
    format!(r#"<div class="alternative-options-label not-found">{text}</div>"#)
}

fn advisory_html(advisory: &SizeAdvisory) -> String {
    let mut html = format!("<p>Image dimensions {}x{}px:", advisory.width, advisory.height);
    for finding in &advisory.findings {
        match finding.severity {
            Severity::Ok => {
                let _ = write!(html, " {};", finding.text);
            }
            _ => {
                let _ = write!(html, " <strong>{}</strong>;", finding.text);
            }
        }
    }
    html.push_str("</p>");
    html
}

/// Status banner prepended to the page once the form is filled.
pub fn process_notification(summary: &str, severity: Severity) -> String {
    format!(
        "<div data-drupal-messages='' class='messages-list'>\
<div class='messages__wrapper'>\
<div role='contentinfo' aria-labelledby='message-status-title' class='messages-list__item messages {}'>\
<div class='messages__header'><h2 id='message-status-title' class='messages__title'>Complete</h2></div>\
<button type='button' class='button button--dismiss' title='Dismiss'><span class='icon-close'></span>Close</button>\
<div class='messages__content'>Please double check the values for accuracy.<br />{summary}</div>\
</div></div></div>",
        severity.css_class()
    )
}
