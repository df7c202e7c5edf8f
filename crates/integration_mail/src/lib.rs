//! Transactional mail integration
//!
//! Sends contact-form messages through the [Resend](https://resend.com)
//! `POST /emails` API.

mod client;
mod config;

pub use client::{EmailRequest, MailError, MailSender, ResendClient};
pub use config::{DEFAULT_FROM_ADDRESS, ResendConfig};
