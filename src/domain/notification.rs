use once_cell::sync::Lazy;

use super::{ApplicantEmail, SubmissionRequest};

pub const DEFAULT_SENDER: &str = "Early Access <onboarding@resend.dev>";
pub const DEFAULT_RECIPIENT: &str = "you@yourdomain.com";
pub const NOTIFICATION_SUBJECT: &str = "New Early Access signup";

const HTML_TEMPLATE_NAME: &str = "early_access_notification.html";
const HTML_TEMPLATE: &str = include_str!("../../views/early_access_notification.html");

// `.html` names are autoescaped by a default Tera instance.
static TEMPLATES: Lazy<tera::Tera> = Lazy::new(|| {
    let mut tera = tera::Tera::default();
    tera.add_raw_template(HTML_TEMPLATE_NAME, HTML_TEMPLATE)
        .expect("Notification template is valid");
    tera
});

/// Who the operator notification comes from and goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRouting {
    sender: String,
    recipient: String,
}

impl NotificationRouting {
    pub fn new(sender: Option<String>, recipient: Option<String>) -> Self {
        let or_default = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            sender: or_default(sender, DEFAULT_SENDER),
            recipient: or_default(recipient, DEFAULT_RECIPIENT),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl Default for NotificationRouting {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// The email telling the operator about a new early-access signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub from: String,
    pub to: String,
    pub reply_to: ApplicantEmail,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl NotificationMessage {
    pub fn for_submission(
        routing: &NotificationRouting,
        submission: &SubmissionRequest,
    ) -> Result<Self, tera::Error> {
        let email = submission.email.as_ref();
        let source = submission.source.as_deref();

        Ok(Self {
            from: routing.sender().to_string(),
            to: routing.recipient().to_string(),
            reply_to: submission.email.clone(),
            subject: NOTIFICATION_SUBJECT.to_string(),
            html: render_html(email, source)?,
            text: render_text(email, source),
        })
    }
}

fn render_html(email: &str, source: Option<&str>) -> Result<String, tera::Error> {
    let mut ctx = tera::Context::new();
    ctx.insert("subject", NOTIFICATION_SUBJECT);
    ctx.insert("email", email);
    ctx.insert("source", &source);

    TEMPLATES.render(HTML_TEMPLATE_NAME, &ctx)
}

fn render_text(email: &str, source: Option<&str>) -> String {
    let source = source
        .map(|s| format!("Source: {s}\n"))
        .unwrap_or_default();

    format!("{NOTIFICATION_SUBJECT}\n\nEmail: {email}\n{source}\n--\nSent via Caffriend\n")
}
