// src/common/url_utils.rs

/// Prefixa `https://` quando o destino não traz esquema. Idempotente.
pub fn normalize_url(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }
    format!("https://{}", value)
}

/// Converte campos opcionais vindos do formulário: string vazia vira `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_absolute_urls() {
        assert_eq!(normalize_url("https://x"), "https://x");
        assert_eq!(normalize_url("http://example.com/a"), "http://example.com/a");
    }

    #[test]
    fn prefixes_bare_hosts() {
        assert_eq!(normalize_url("x.com"), "https://x.com");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_url("igreja.com.br/ofertas");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(blank_to_none(Some("   ".into())), None);
        assert_eq!(blank_to_none(Some(" #fff ".into())), Some("#fff".into()));
        assert_eq!(blank_to_none(None), None);
    }
}
