use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use minijinja::context;

use crate::core::config::MailConfig;
use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::ContactMessageDto;
use crate::shared::templates::render_template;

/// Service relaying contact form submissions over SMTP.
///
/// The transport is built once at startup and injected into the handler
/// state; port 465 gets implicit TLS, anything else STARTTLS.
pub struct ContactService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
    inbox: Mailbox,
}

impl ContactService {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let sender: Address = config
            .username
            .parse()
            .map_err(|e| anyhow::anyhow!("EMAIL_USER is not a valid address: {}", e))?;
        let inbox: Mailbox = config
            .inbox
            .parse()
            .map_err(|e| anyhow::anyhow!("CONTACT_INBOX is not a valid address: {}", e))?;

        Ok(Self {
            transport,
            sender,
            inbox,
        })
    }

    /// Relay a visitor message to the configured inbox.
    ///
    /// The visitor's address goes into Reply-To; From stays on the
    /// authenticated sender so the relay passes SPF/DKIM.
    pub async fn relay(&self, dto: ContactMessageDto) -> Result<()> {
        let name = dto.name.trim();
        let phone = dto.phone.trim();
        let subject = dto.subject.trim();
        let message = dto.message.trim();

        if name.is_empty() || phone.is_empty() || subject.is_empty() || message.is_empty() {
            return Err(AppError::Validation(
                "name, email, phone, subject and message are required".to_string(),
            ));
        }

        let reply_to: Mailbox = dto
            .email
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        let project = dto.project.as_deref().map(str::trim).unwrap_or("-");
        let ctx = context! {
            name => name,
            email => dto.email.trim(),
            phone => phone,
            project => project,
            subject => subject,
            message => message,
        };
        let text_body = render_template("contact_email.txt", ctx.clone())
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let html_body = render_template("contact_email.html", ctx)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let email = Message::builder()
            .from(Mailbox::new(Some(name.to_string()), self.sender.clone()))
            .reply_to(reply_to)
            .to(self.inbox.clone())
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text_body, html_body))
            .map_err(|e| AppError::Internal(format!("Failed to build message: {}", e)))?;

        self.transport.send(email).await.map_err(|e| {
            tracing::error!("Failed to relay contact message: {:?}", e);
            AppError::Internal("Failed to send message".to_string())
        })?;

        tracing::info!("Contact message relayed: reply_to={}", dto.email.trim());

        Ok(())
    }
}
