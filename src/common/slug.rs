// src/common/slug.rs

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const MAX_SLUG_LEN: usize = 60;

/// Normaliza um texto livre para uso em URLs públicas.
///
/// Minúsculas, acentos removidos (NFD sem marcas combinantes), qualquer sequência fora de
/// `[a-z0-9]` vira um único `-`, sem separadores nas pontas e com no máximo 60 caracteres.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // Só há ASCII aqui, então cortar por bytes é seguro
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Usa o slug informado ou, se vazio, deriva do nome.
pub fn slug_or_name(slug: Option<&str>, name: &str) -> String {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => slugify(s),
        None => slugify(name),
    }
}
