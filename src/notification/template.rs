use super::{EmailMessage, MailRouting, NotifyError};
use crate::models::contact::ContactSubmission;
use askama::Template;

/// Label used when the submitter picked no category or an unknown one.
pub const DEFAULT_CATEGORY: &str = "General Inquiry";

const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("sales", "Sales Inquiry"),
    ("demo", "Schedule a Demo"),
    ("implementation", "Implementation & Integration"),
    ("partnership", "Partnership"),
    ("research", "Research Collaboration"),
    ("careers", "Careers/Recruitment"),
    ("other", "Other"),
];

/// Maps a form `interest` tag to the label shown to staff.
pub fn category_label(interest: Option<&str>) -> &'static str {
    interest
        .and_then(|tag| {
            CATEGORY_LABELS
                .iter()
                .find(|(key, _)| *key == tag)
                .map(|(_, label)| *label)
        })
        .unwrap_or(DEFAULT_CATEGORY)
}

#[derive(Template)]
#[template(path = "contact_notification.html")]
struct ContactNotificationTemplate<'a> {
    category: &'a str,
    name: &'a str,
    email: &'a str,
    organization: &'a str,
    submitted_at: String,
    message: &'a str,
}

/// Builds the staff notification for a stored submission.
///
/// Replies go straight to the submitter.
pub fn compose(
    submission: &ContactSubmission,
    routing: &MailRouting,
) -> Result<EmailMessage, NotifyError> {
    let category = category_label(submission.interest.as_deref());

    let html = ContactNotificationTemplate {
        category,
        name: &submission.name,
        email: &submission.email,
        organization: submission.organization.as_deref().unwrap_or("Not provided"),
        submitted_at: submission
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        message: &submission.message,
    }
    .render()?;

    Ok(EmailMessage {
        from: routing.sender.clone(),
        to: routing.recipient.clone(),
        reply_to: Some(submission.email.clone()),
        subject: format!("New Contact Form Submission - {}", category),
        html,
    })
}
