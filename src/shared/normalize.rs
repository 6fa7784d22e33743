/// Canonicalize a free-text identifier token.
///
/// Trims, lowercases and replaces the accented vowel/cedilla variants that
/// show up in Portuguese document-type input with their unaccented base
/// letter. Pure and deterministic; empty input maps to the empty string and
/// must be rejected by the caller.
pub fn normalize_token(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ê' => 'e',
            'í' | 'ì' | 'î' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'û' => 'u',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_token("  CONTRATOS  "), "contratos");
        assert_eq!(normalize_token("Propostas"), "propostas");
    }

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize_token("Orçamentos"), "orcamentos");
        assert_eq!(normalize_token("validação"), "validacao");
        assert_eq!(normalize_token("àâãéèêíìîóòôõúùû"), "aaaeeeiiioooouuu");
    }

    #[test]
    fn test_accent_variants_normalize_identically() {
        for variant in ["Orçamentos", "ORÇAMENTOS", " orcamentos ", "órcamentos"] {
            assert_eq!(normalize_token(variant), "orcamentos");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(normalize_token("doc-2024_x"), "doc-2024_x");
    }
}
