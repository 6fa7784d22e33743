use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The fixed set of document categories a QR code can be issued for.
///
/// Stored and serialized as the canonical lowercase token; free-text input
/// is mapped onto this set through [`crate::shared::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DocumentType {
    Contratos,
    Orcamentos,
    Propostas,
}

impl DocumentType {
    /// Parse an already-normalized token; anything outside the fixed set is
    /// rejected by the caller.
    pub fn from_normalized(token: &str) -> Option<Self> {
        match token {
            "contratos" => Some(Self::Contratos),
            "orcamentos" => Some(Self::Orcamentos),
            "propostas" => Some(Self::Propostas),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contratos => "contratos",
            Self::Orcamentos => "orcamentos",
            Self::Propostas => "propostas",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for an issued QR code record. Immutable once created.
#[derive(Debug, Clone, FromRow)]
pub struct QrRecord {
    pub id: i64,
    pub doc_type: DocumentType,
    pub description: String,
    pub external_id: String,
    pub public_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalize::normalize_token;

    #[test]
    fn test_from_normalized_accepts_canonical_tokens() {
        assert_eq!(
            DocumentType::from_normalized("contratos"),
            Some(DocumentType::Contratos)
        );
        assert_eq!(
            DocumentType::from_normalized("orcamentos"),
            Some(DocumentType::Orcamentos)
        );
        assert_eq!(
            DocumentType::from_normalized("propostas"),
            Some(DocumentType::Propostas)
        );
    }

    #[test]
    fn test_from_normalized_rejects_everything_else() {
        assert_eq!(DocumentType::from_normalized("invalido"), None);
        assert_eq!(DocumentType::from_normalized(""), None);
        // Raw (un-normalized) input is not accepted directly
        assert_eq!(DocumentType::from_normalized("Orçamentos"), None);
    }

    #[test]
    fn test_accented_input_parses_after_normalization() {
        let token = normalize_token(" Orçamentos ");
        assert_eq!(
            DocumentType::from_normalized(&token),
            Some(DocumentType::Orcamentos)
        );
    }

    #[test]
    fn test_display_matches_canonical_token() {
        assert_eq!(DocumentType::Contratos.to_string(), "contratos");
    }
}
