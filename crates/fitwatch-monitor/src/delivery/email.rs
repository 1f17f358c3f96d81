use fitwatch_core::EmailSettings;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::DeliveryError;
use crate::types::DeliveryOutcome;

/// Build a `multipart/alternative` message carrying the HTML report.
///
/// `to` may hold several comma-separated addresses.
///
/// # Errors
///
/// Returns [`DeliveryError::Address`] for an unparsable address and
/// [`DeliveryError::Message`] if the message cannot be assembled.
pub fn build_message(
    from: &str,
    to: &str,
    subject: &str,
    html: &str,
) -> Result<Message, DeliveryError> {
    let mut builder = Message::builder()
        .from(from.trim().parse::<Mailbox>()?)
        .subject(subject);

    for recipient in to.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    let message = builder
        .multipart(MultiPart::alternative().singlepart(SinglePart::html(html.to_string())))?;
    Ok(message)
}

/// Send the report over STARTTLS SMTP.
///
/// Returns [`DeliveryOutcome::Skipped`] when sender, password or recipient is
/// missing or empty.
///
/// # Errors
///
/// Returns [`DeliveryError`] if the message cannot be built or SMTP fails.
pub async fn send_report(
    settings: &EmailSettings,
    subject: &str,
    html: &str,
) -> Result<DeliveryOutcome, DeliveryError> {
    let Some((from, password, to)) = settings.credentials() else {
        return Ok(DeliveryOutcome::Skipped(
            "email credentials not configured".to_string(),
        ));
    };

    let message = build_message(from, to, subject, html)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_server)?
        .port(settings.smtp_port)
        .credentials(Credentials::new(from.to_string(), password.to_string()))
        .build();

    tracing::info!(
        to,
        smtp_server = %settings.smtp_server,
        smtp_port = settings.smtp_port,
        "sending email report"
    );
    mailer.send(message).await?;

    Ok(DeliveryOutcome::Delivered(format!("sent to {to}")))
}
