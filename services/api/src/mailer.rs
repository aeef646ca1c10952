//! Contact form delivery

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Resend transactional email endpoint
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Message submitted through the public contact form
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Delivers contact form messages to the institute
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the notification, returning the provider's message id if any
    async fn send_contact(&self, message: &ContactMessage) -> Result<Option<String>>;
}

#[derive(Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

/// Mailer backed by the Resend HTTP API
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    sender: String,
    recipient: String,
}

impl ResendMailer {
    pub fn new(api_key: String, sender: String, recipient: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key,
            sender,
            recipient,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_contact(&self, message: &ContactMessage) -> Result<Option<String>> {
        let payload = json!({
            "from": self.sender,
            "to": [self.recipient],
            "reply_to": message.email,
            "subject": format!("New inquiry from {}", message.name),
            "html": render_contact_html(message),
        });

        let response: ResendResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to reach the email service")?
            .error_for_status()
            .context("Email service rejected the message")?
            .json()
            .await
            .context("Unexpected email service response")?;

        info!("Contact message forwarded with id {:?}", response.id);
        Ok(response.id)
    }
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Notification body for a contact message
pub fn render_contact_html(message: &ContactMessage) -> String {
    let body = escape_html(&message.message).replace('\n', "<br/>");
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="margin: 0;">New Contact Message</h2>
  <p style="margin: 5px 0 15px;">Al Kainaat Learning &amp; Development Institute</p>
  <p><strong>Name:</strong> {}</p>
  <p><strong>Email:</strong> {}</p>
  <p><strong>Message:</strong></p>
  <div style="padding: 15px; border-left: 4px solid #3b82f6; line-height: 1.6;">{}</div>
</div>"#,
        escape_html(&message.name),
        escape_html(&message.email),
        body
    )
}
