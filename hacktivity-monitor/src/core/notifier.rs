/*!
Chat-card construction and webhook delivery
*/

use std::time::Duration;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::core::config::WebhookConfig;
use crate::core::report::Report;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CARD_HEADER_TITLE: &str = "Hacktivity Disclosed Report";
const H1_LOGO_URL: &str =
    "https://www.hackerone.com/themes/hacker_one/images/branding/h1-logo.png";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook returned {0}")]
    Status(reqwest::StatusCode),
}

/// Card message for one disclosed report: branded header, bold title text,
/// and a button opening the report.
pub fn card_payload(report: &Report) -> Value {
    json!({
        "cards": [{
            "header": {
                "title": CARD_HEADER_TITLE,
                "imageUrl": H1_LOGO_URL,
                "imageStyle": "IMAGE"
            },
            "sections": [{
                "widgets": [
                    {
                        "textParagraph": {
                            "text": format!("<b><font size=\"15\">{}</font></b>", report.title)
                        }
                    },
                    {
                        "buttons": [{
                            "textButton": {
                                "text": "View Report",
                                "onClick": { "openLink": { "url": report.url } }
                            }
                        }]
                    }
                ]
            }]
        }]
    })
}

pub struct ChatNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl ChatNotifier {
    pub fn new(config: &WebhookConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            webhook_url: config.url.clone(),
            client,
        })
    }

    /// Deliver the card for one report. Without a configured webhook URL this
    /// is a no-op that logs the configuration gap. A failed delivery is an
    /// error for this report only; the caller carries on with the rest.
    pub async fn notify(&self, report: &Report) -> Result<(), NotifyError> {
        let Some(url) = &self.webhook_url else {
            error!("Chat webhook URL is not configured; set GOOGLE_CHAT_WEBHOOK_URL to enable alerts");
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=UTF-8",
            )
            .body(card_payload(report).to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }

        info!("Alert sent for {:?}", report.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn report(title: &str, url: &str) -> Report {
        Report {
            disclosed_at: "2024-02-01T17:03:55.442Z".to_string(),
            title: title.to_string(),
            url: url.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn card_carries_title_and_report_link() {
        let payload = card_payload(&report("IDOR in billing", "https://hackerone.com/reports/42"));

        let card = &payload["cards"][0];
        assert_eq!(card["header"]["title"], "Hacktivity Disclosed Report");
        assert_eq!(card["header"]["imageStyle"], "IMAGE");

        let widgets = &card["sections"][0]["widgets"];
        assert_eq!(
            widgets[0]["textParagraph"]["text"],
            "<b><font size=\"15\">IDOR in billing</font></b>"
        );
        assert_eq!(
            widgets[1]["buttons"][0]["textButton"]["onClick"]["openLink"]["url"],
            "https://hackerone.com/reports/42"
        );
    }

    #[tokio::test]
    async fn posts_the_card_to_the_webhook() {
        let server = MockServer::start().await;
        let expected = card_payload(&report("IDOR in billing", "https://hackerone.com/reports/42"));
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json; charset=UTF-8"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = ChatNotifier::new(&WebhookConfig {
            url: Some(format!("{}/hook", server.uri())),
        })
        .unwrap();

        notifier
            .notify(&report("IDOR in billing", "https://hackerone.com/reports/42"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_2xx_is_a_delivery_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = ChatNotifier::new(&WebhookConfig {
            url: Some(format!("{}/hook", server.uri())),
        })
        .unwrap();

        let err = notifier
            .notify(&report("IDOR in billing", "https://hackerone.com/reports/42"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn unconfigured_webhook_is_a_no_op() {
        let notifier = ChatNotifier::new(&WebhookConfig { url: None }).unwrap();
        notifier
            .notify(&report("IDOR in billing", "https://hackerone.com/reports/42"))
            .await
            .unwrap();
    }
}
