//! Mail adapter - Implements `MailerPort` using integration_mail

use std::sync::Arc;

use application::error::{ApplicationError, NetworkOperation};
use application::ports::{MailerPort, OutgoingEmail};
use async_trait::async_trait;
use integration_mail::{EmailRequest, MailError, MailSender};
use tracing::{instrument, warn};

/// Adapter for transactional mail
pub struct MailAdapter {
    sender: Arc<dyn MailSender>,
}

impl std::fmt::Debug for MailAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailAdapter")
            .field("sender", &"MailSender")
            .finish()
    }
}

impl MailAdapter {
    /// Create a new mail adapter
    pub fn new(sender: Arc<dyn MailSender>) -> Self {
        Self { sender }
    }

    fn to_request(email: &OutgoingEmail) -> EmailRequest {
        EmailRequest {
            from: email.from.clone(),
            to: email.to.clone(),
            reply_to: email.reply_to.clone(),
            subject: email.subject.clone(),
            html: email.html.clone(),
            text: email.text.clone(),
        }
    }
}

#[async_trait]
impl MailerPort for MailAdapter {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<String, ApplicationError> {
        self.sender
            .send(&Self::to_request(email))
            .await
            .map_err(|e| {
                warn!(error = %e, "Mail delivery failed");
                match e {
                    MailError::Configuration(message) => ApplicationError::Configuration(message),
                    other => {
                        ApplicationError::network(NetworkOperation::MailDelivery, other.to_string())
                    },
                }
            })
    }
}
