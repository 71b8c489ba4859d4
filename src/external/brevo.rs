use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};
use crate::external::{EmailAttachment, NotificationGateway, OutboundEmail};

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    #[serde(rename = "attachment", skip_serializing_if = "Option::is_none")]
    attachments: Option<&'a [EmailAttachment]>,
}

/// Brevo (ex-Sendinblue) transactional email API.
#[derive(Clone)]
pub struct BrevoClient {
    client: Client,
    config: MailConfig,
}

impl BrevoClient {
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent("oaklyn-backend/mail")
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, email: &'a OutboundEmail) -> SendEmailRequest<'a> {
        SendEmailRequest {
            sender: Contact {
                name: Some(&self.config.sender_name),
                email: &self.config.sender_email,
            },
            to: vec![Contact {
                name: None,
                email: &email.to,
            }],
            subject: &email.subject,
            html_content: &email.html,
            attachments: (!email.attachments.is_empty()).then_some(email.attachments.as_slice()),
        }
    }
}

#[async_trait]
impl NotificationGateway for BrevoClient {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        let body = self.request_body(&email);

        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Email to {} could not be dispatched: {e}", email.to);
                AppError::NotificationError(format!("Email dispatch failed: {e}"))
            })?;

        if response.status().is_success() {
            log::info!("Email sent to {}: {}", email.to, email.subject);
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!(
                "Email to {} rejected by provider: HTTP {}, {}",
                email.to,
                status.as_u16(),
                error_text
            );
            Err(AppError::NotificationError(format!(
                "Email provider returned HTTP {}: {}",
                status.as_u16(),
                error_text
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> BrevoClient {
        BrevoClient::new(MailConfig {
            api_key: "xkeysib-test".into(),
            api_url: "http://127.0.0.1:9/v3/smtp/email".into(),
            sender_name: "Oaklyn Real Estates".into(),
            sender_email: "no-reply@oaklyn.test".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_request_body_without_attachments() {
        let client = client();
        let email = OutboundEmail::new("a@example.com", "Hi", "<p>Hi</p>");
        let value = serde_json::to_value(client.request_body(&email)).unwrap();
        assert_eq!(
            value,
            json!({
                "sender": {"name": "Oaklyn Real Estates", "email": "no-reply@oaklyn.test"},
                "to": [{"email": "a@example.com"}],
                "subject": "Hi",
                "htmlContent": "<p>Hi</p>"
            })
        );
    }

    #[test]
    fn test_request_body_with_attachments() {
        let client = client();
        let email = OutboundEmail::new("a@example.com", "Brochure", "<p>See attached</p>")
            .with_attachments(vec![EmailAttachment {
                name: "brochure.pdf".into(),
                content: "JVBERi0=".into(),
            }]);
        let value = serde_json::to_value(client.request_body(&email)).unwrap();
        assert_eq!(
            value["attachment"],
            json!([{"name": "brochure.pdf", "content": "JVBERi0="}])
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_notification_error() {
        let err = client()
            .send(OutboundEmail::new("a@example.com", "Hi", "<p>Hi</p>"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotificationError(_)));
    }
}
