/// Outbound email delivery
///
/// The fileshare service sends exactly one verification mail per client
/// signup. Delivery goes through the [`Mailer`] trait so handlers never know
/// how a message leaves the process:
///
/// - [`HttpMailer`] posts messages to an HTTP mail gateway (Resend-style
///   `POST /emails` with a bearer key) via reqwest.
/// - [`RecordingMailer`] keeps messages in memory so tests can assert on
///   exactly what was sent.
///
/// # Example
///
/// ```
/// use workhub_shared::email::{Mailer, OutboundEmail, RecordingMailer};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mailer = RecordingMailer::new();
/// mailer
///     .send(&OutboundEmail {
///         to: "alice@example.com".to_string(),
///         subject: "Verify Your Email".to_string(),
///         body: "Your OTP is: 123456".to_string(),
///     })
///     .await?;
///
/// assert_eq!(mailer.sent().len(), 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info};

/// Error type for email delivery
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Transport-level failure reaching the gateway
    #[error("Failed to reach mail gateway: {0}")]
    Transport(String),

    /// Gateway rejected the message
    #[error("Mail gateway rejected message: status {status}")]
    Rejected {
        /// HTTP status returned by the gateway
        status: u16,
    },
}

/// A single outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub body: String,
}

/// One-shot message delivery
///
/// Implementations must be cheap to share across request handlers; the
/// services hold a `Arc<dyn Mailer>` in application state.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a single message
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct GatewayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mailer backed by an HTTP mail gateway
///
/// Posts JSON to the configured endpoint with a bearer API key. The gateway
/// owns SMTP; the service only ever speaks HTTP.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// Creates a mailer from gateway settings
    pub fn new(endpoint: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        debug!(to = %email.to, subject = %email.subject, "Sending email via gateway");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&GatewayPayload {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                text: &email.body,
            })
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected {
                status: response.status().as_u16(),
            });
        }

        info!(to = %email.to, "Email accepted by gateway");
        Ok(())
    }
}

/// In-memory mailer for tests
///
/// Records every message instead of delivering it, so tests can assert that
/// a client signup produced exactly one verification mail and an ops signup
/// produced none.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    /// Creates an empty recording mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message sent so far
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .push(email.clone());
        Ok(())
    }
}
