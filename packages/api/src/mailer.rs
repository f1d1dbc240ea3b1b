// ABOUTME: Outbound email for access requests, sent through the Resend HTTP API
// ABOUTME: Handlers talk to the `Mailer` trait so tests can swap the transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

/// Upper bound for one email API call
pub const DEFAULT_MAILER_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email API key is not set")]
    MissingApiKey,

    #[error("access request notification address is not set")]
    MissingRecipient,

    #[error("email API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("email API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type MailerResult<T> = Result<T, MailerError>;

/// Someone asking to be let into the product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_access_request(&self, request: &AccessRequest) -> MailerResult<()>;
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub from: String,
    pub notify: Option<String>,
    pub timeout: Duration,
}

pub struct ResendMailer {
    client: Client,
    config: MailerConfig,
}

impl ResendMailer {
    pub fn new(config: MailerConfig) -> MailerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            config: MailerConfig {
                api_key: config.api_key.filter(|k| !k.trim().is_empty()),
                notify: config.notify.filter(|n| !n.trim().is_empty()),
                ..config
            },
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_access_request(&self, request: &AccessRequest) -> MailerResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(MailerError::MissingApiKey)?;
        let notify = self
            .config
            .notify
            .as_ref()
            .ok_or(MailerError::MissingRecipient)?;

        let payload = json!({
            "from": self.config.from,
            "to": [notify],
            "subject": format!("Nuova richiesta di accesso: {}", request.name.trim()),
            "html": render_access_request(request),
            "reply_to": request.email.trim(),
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Email API rejected access request notification: status={}", status);
            return Err(MailerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!("Access request notification sent");
        Ok(())
    }
}

fn render_access_request(request: &AccessRequest) -> String {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string())
    };

    format!(
        "<h2>Nuova richiesta di accesso</h2>\
         <p><strong>Nome:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Azienda:</strong> {}</p>\
         <p><strong>Messaggio:</strong> {}</p>",
        escape_html(request.name.trim()),
        escape_html(request.email.trim()),
        optional(&request.company),
        optional(&request.message),
    )
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str, api_key: Option<&str>) -> MailerConfig {
        MailerConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            from: "Pulse <noreply@pulse.app>".to_string(),
            notify: Some("team@pulse.app".to_string()),
            timeout: DEFAULT_MAILER_TIMEOUT,
        }
    }

    fn request() -> AccessRequest {
        AccessRequest {
            name: "Giulia Bianchi".to_string(),
            email: "giulia@example.com".to_string(),
            company: Some("Bianchi <SRL>".to_string()),
            message: None,
        }
    }

    #[test]
    fn test_html_is_escaped() {
        let html = render_access_request(&request());
        assert!(html.contains("Bianchi &lt;SRL&gt;"));
        assert!(html.contains("<strong>Messaggio:</strong> -"));
    }

    #[tokio::test]
    async fn test_sends_notification() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(bearer_token("re_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "email-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(config(&server.uri(), Some("re_test"))).unwrap();
        mailer.send_access_request(&request()).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["to"], json!(["team@pulse.app"]));
        assert_eq!(body["reply_to"], "giulia@example.com");
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(config(&server.uri(), Some("  "))).unwrap();
        let result = mailer.send_access_request(&request()).await;
        assert!(matches!(result, Err(MailerError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid from"))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(config(&server.uri(), Some("re_test"))).unwrap();
        let result = mailer.send_access_request(&request()).await;
        assert!(matches!(result, Err(MailerError::Status { status: 422, .. })));
    }

    #[tokio::test]
    async fn test_hung_email_api_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(MailerConfig {
            timeout: Duration::from_millis(200),
            ..config(&server.uri(), Some("re_test"))
        })
        .unwrap();
        let result = mailer.send_access_request(&request()).await;
        assert!(matches!(result, Err(MailerError::Transport(e)) if e.is_timeout()));
    }
}
