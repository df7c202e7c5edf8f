//! Contact form relay
//!
//! Validates a contact-form submission and forwards it to the site owner
//! through the mailer port.

use std::{fmt, sync::Arc};

use domain::{ContactMessage, EmailAddress};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{
    error::{ApplicationError, NetworkOperation},
    ports::{MailerPort, OutgoingEmail},
    templates::{MailTemplates, TemplateError},
};

/// Display name used in the `From` header
pub const SENDER_NAME: &str = "SL ta mig hem";

/// Where contact messages go
#[derive(Debug, Clone)]
pub struct ContactSettings {
    /// Recipient of contact messages; relay is disabled without it
    pub recipient: Option<EmailAddress>,
    /// Sender address (must be verified with the mail provider)
    pub from_address: String,
}

/// Confirmation of a relayed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    /// Provider message id
    pub id: String,
}

/// Contact relay service
pub struct ContactService {
    mailer: Option<Arc<dyn MailerPort>>,
    settings: ContactSettings,
    templates: MailTemplates,
}

impl fmt::Debug for ContactService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactService")
            .field("settings", &self.settings)
            .field("mailer_configured", &self.mailer.is_some())
            .finish()
    }
}

impl ContactService {
    /// Create a relay; `mailer` is `None` when no provider is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the mail templates fail to compile.
    pub fn new(
        mailer: Option<Arc<dyn MailerPort>>,
        settings: ContactSettings,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            mailer,
            settings,
            templates: MailTemplates::new()?,
        })
    }

    /// Whether both a recipient and a mail provider are set
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.settings.recipient.is_some() && self.mailer.is_some()
    }

    /// Validate and relay a submission
    #[instrument(skip(self, message))]
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactReceipt, ApplicationError> {
        let contact = ContactMessage::new(name, email, message)?;

        let Some(recipient) = &self.settings.recipient else {
            error!("Contact recipient is not configured");
            return Err(ApplicationError::Configuration(
                "contact recipient is not set".to_string(),
            ));
        };
        let Some(mailer) = &self.mailer else {
            error!("Mail provider is not configured");
            return Err(ApplicationError::Configuration(
                "mail provider API key is not set".to_string(),
            ));
        };

        let outgoing = self.compose(&contact, recipient)?;
        let id = mailer
            .send(&outgoing)
            .await
            .map_err(|e| e.during(NetworkOperation::MailDelivery))?;

        info!(id = %id, "Contact message relayed");
        Ok(ContactReceipt { id })
    }

    fn compose(
        &self,
        contact: &ContactMessage,
        recipient: &EmailAddress,
    ) -> Result<OutgoingEmail, TemplateError> {
        let body = self.templates.render_contact(contact)?;

        Ok(OutgoingEmail {
            from: format!("{SENDER_NAME} <{}>", self.settings.from_address),
            to: vec![recipient.to_string()],
            reply_to: Some(contact.email.to_string()),
            subject: contact.subject(),
            html: body.html,
            text: body.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;
    use proptest::prelude::*;

    use super::*;
    use crate::ports::MockMailerPort;

    fn settings() -> ContactSettings {
        ContactSettings {
            recipient: Some(EmailAddress::new("owner@example.se").unwrap()),
            from_address: "onboarding@resend.dev".to_string(),
        }
    }

    fn service_with(mailer: MockMailerPort) -> ContactService {
        ContactService::new(Some(Arc::new(mailer)), settings()).unwrap()
    }

    #[tokio::test]
    async fn relays_valid_message() {
        let mut mailer = MockMailerPort::new();
        mailer
            .expect_send()
            .withf(|email| {
                email.from == "SL ta mig hem <onboarding@resend.dev>"
                    && email.to == vec!["owner@example.se".to_string()]
                    && email.reply_to.as_deref() == Some("anna@example.se")
                    && email.subject == "Kontaktformulär: Anna"
                    && email.html.contains("rad 1<br>\nrad 2")
                    && email.text.contains("rad 1\nrad 2")
            })
            .times(1)
            .returning(|_| Ok("re_123".to_string()));

        let receipt = service_with(mailer)
            .submit("Anna", "anna@example.se", "rad 1\nrad 2")
            .await
            .unwrap();
        assert_eq!(receipt.id, "re_123");
    }

    #[tokio::test]
    async fn empty_name_never_reaches_mailer() {
        let mut mailer = MockMailerPort::new();
        mailer.expect_send().never();

        let err = service_with(mailer)
            .submit("", "a@b.com", "hi")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MissingField(_))
        ));
        assert_eq!(err.user_message(), "Alla fält är obligatoriska");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let mut mailer = MockMailerPort::new();
        mailer.expect_send().never();

        let err = service_with(mailer)
            .submit("A", "not-an-email", "hi")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Ogiltig e-postadress");
    }

    #[tokio::test]
    async fn missing_recipient_is_configuration_error() {
        let mut mailer = MockMailerPort::new();
        mailer.expect_send().never();
        let service = ContactService::new(
            Some(Arc::new(mailer)),
            ContactSettings {
                recipient: None,
                from_address: "onboarding@resend.dev".to_string(),
            },
        )
        .unwrap();

        let err = service.submit("A", "a@b.com", "hi").await.unwrap_err();
        assert_eq!(err.user_message(), "Serverkonfiguration saknas");
    }

    #[tokio::test]
    async fn validation_runs_before_configuration_check() {
        let service = ContactService::new(
            None,
            ContactSettings {
                recipient: None,
                from_address: "x@y.se".to_string(),
            },
        )
        .unwrap();
        let err = service.submit("A", "bad", "hi").await.unwrap_err();
        assert_eq!(err.user_message(), "Ogiltig e-postadress");
    }

    #[tokio::test]
    async fn missing_mailer_is_configuration_error() {
        let service = ContactService::new(None, settings()).unwrap();
        assert!(!service.is_configured());
        let err = service.submit("A", "a@b.com", "hi").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn configured_with_recipient_and_mailer() {
        assert!(service_with(MockMailerPort::new()).is_configured());
    }

    #[tokio::test]
    async fn mailer_failure_is_delivery_error() {
        let mut mailer = MockMailerPort::new();
        mailer.expect_send().returning(|_| {
            Err(ApplicationError::network(
                NetworkOperation::MailDelivery,
                "422 validation_error",
            ))
        });

        let err = service_with(mailer)
            .submit("A", "a@b.com", "hi")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Kunde inte skicka e-post");
    }

    #[tokio::test]
    async fn reply_to_keeps_local_part_as_typed() {
        let mut mailer = MockMailerPort::new();
        mailer
            .expect_send()
            .withf(|email| email.reply_to.as_deref() == Some("Anna.Svensson@example.se"))
            .times(1)
            .returning(|_| Ok("re_1".to_string()));

        service_with(mailer)
            .submit("Anna", "Anna.Svensson@Example.SE", "Hej")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn markup_in_form_is_escaped_in_html_only() {
        let mut mailer = MockMailerPort::new();
        mailer
            .expect_send()
            .withf(|email| {
                email.html.contains("&lt;b&gt;Eve")
                    && !email.html.contains("<script>")
                    && email.text.contains("<script>x</script>")
            })
            .times(1)
            .returning(|_| Ok("re_2".to_string()));

        service_with(mailer)
            .submit("<b>Eve</b>", "eve@example.se", "<script>x</script>")
            .await
            .unwrap();
    }

    proptest! {
        #[test]
        fn rendered_html_never_contains_raw_markup(input in "[a-z<>&\"' \n]{1,40}") {
            prop_assume!(!input.trim().is_empty());
            let contact = ContactMessage::new("A", "a@b.se", &input).unwrap();
            let mail = MailTemplates::new().unwrap().render_contact(&contact).unwrap();
            let stripped = mail.html.replace("<br>", "");
            let body = stripped
                .split("<p>")
                .last()
                .unwrap_or_default()
                .trim_end()
                .trim_end_matches("</p>");
            prop_assert!(!body.contains('<'));
            prop_assert!(!body.contains('>'));
        }
    }
}
