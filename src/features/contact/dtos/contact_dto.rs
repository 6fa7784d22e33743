use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Request DTO for the contact form.
///
/// Everything except `project` is required; blank-after-trim values are
/// rejected by the service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactMessageDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: String,

    /// Optional project the visitor is asking about
    #[validate(length(max = 255, message = "Project must not exceed 255 characters"))]
    pub project: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use validator::Validate;

    fn valid_dto() -> ContactMessageDto {
        ContactMessageDto {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: "+55 11 91234-5678".to_string(),
            project: None,
            subject: "Orçamento".to_string(),
            message: "Gostaria de um orçamento.".to_string(),
        }
    }

    #[test]
    fn test_valid_message_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_fails() {
        let mut dto = valid_dto();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_invalid_phone_fails() {
        let mut dto = valid_dto();
        dto.phone = "555-CALL-NOW".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_empty_subject_fails() {
        let mut dto = valid_dto();
        dto.subject = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_project_is_optional() {
        let mut dto = valid_dto();
        dto.project = Some("Site institucional".to_string());
        assert!(dto.validate().is_ok());
    }
}
