use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::error::{AppError, AppResult};
use crate::external::EmailAttachment;
use crate::models::AttachmentRef;

/// Turns a stored file reference into an inline email attachment.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, attachment: &AttachmentRef) -> AppResult<EmailAttachment>;
}

/// Downloads the file from its storage URL and base64-encodes the body.
#[derive(Clone)]
pub struct HttpAttachmentFetcher {
    client: Client,
}

impl HttpAttachmentFetcher {
    pub fn new(timeout: std::time::Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent("oaklyn-backend/attachments")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

pub fn encode_attachment(name: &str, bytes: &[u8]) -> EmailAttachment {
    EmailAttachment {
        name: name.to_string(),
        content: STANDARD.encode(bytes),
    }
}

#[async_trait]
impl AttachmentFetcher for HttpAttachmentFetcher {
    async fn fetch(&self, attachment: &AttachmentRef) -> AppResult<EmailAttachment> {
        let response = self.client.get(&attachment.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Fetching attachment {} failed: HTTP {}",
                attachment.name,
                response.status().as_u16()
            )));
        }

        let bytes = response.bytes().await?;
        log::debug!("Fetched attachment {} ({} bytes)", attachment.name, bytes.len());
        Ok(encode_attachment(&attachment.name, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_attachment() {
        let attachment = encode_attachment("hello.txt", b"hello world");
        assert_eq!(attachment.name, "hello.txt");
        assert_eq!(attachment.content, "aGVsbG8gd29ybGQ=");
    }
}
