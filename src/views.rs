// src/views.rs
// HTML do micro-site público e das páginas inertes do redirecionamento.

use std::fmt::Write;

use crate::models::public::{PublicLink, PublicPage};

pub const DEFAULT_PRIMARY_COLOR: &str = "#f4f7fb";
pub const DEFAULT_ACCENT_COLOR: &str = "#0ea5a6";
pub const FALLBACK_LOGO: &str = "/tapchurch.png";
pub const DEFAULT_WELCOME_TEXT: &str =
    "Toque. Conecte. Comunique. Ofertas, avisos e links em um só lugar.";

/// Escapa texto livre para uso em conteúdo e atributos HTML.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Cores vêm do painel: só hex CSS válido (#rgb, #rgba, #rrggbb, #rrggbbaa)
fn safe_color<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    let is_hex_color = |c: &str| match c.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
        }
        None => false,
    };

    match value {
        Some(c) if is_hex_color(c) => c,
        _ => fallback,
    }
}

fn layout(title: &str, background: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  body {{ margin: 0; font-family: system-ui, sans-serif; background: {background}; color: #0f172a; }}
  .container {{ max-width: 720px; margin: 0 auto; padding: 24px 16px; display: grid; gap: 12px; }}
  .card {{ background: #ffffff; border: 1px solid #e2e8f0; border-radius: 14px; padding: 14px 16px; }}
  .micro-header {{ text-align: center; }}
  .micro-header img.logo {{ width: 96px; height: 96px; object-fit: contain; border-radius: 50%; }}
  .micro-header-icons {{ display: flex; justify-content: center; gap: 12px; }}
  .micro-header-icon {{ width: 24px; height: 24px; }}
  .micro-link {{ display: flex; gap: 10px; align-items: center; text-decoration: none; color: inherit; }}
  .micro-link-icon {{ width: 28px; height: 28px; }}
  .muted {{ color: #64748b; font-size: 12px; }}
  .featured-badge {{ font-weight: 600; font-size: 13px; text-transform: uppercase; }}
</style>
</head>
<body>
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        background = background,
        body = body,
    )
}

fn link_card(out: &mut String, link: &PublicLink, accent: &str) {
    let _ = write!(
        out,
        r#"<a class="card micro-link" href="/r/{id}" target="_blank" rel="noreferrer" style="border-color: {accent}">"#,
        id = link.id,
        accent = accent,
    );
    if let Some(icon) = &link.icon_url {
        let _ = write!(out, r#"<img class="micro-link-icon" src="{}" alt="">"#, escape(icon));
    }
    let _ = write!(out, "<div><strong>{}</strong>", escape(&link.title));
    if let Some(description) = &link.description {
        let _ = write!(out, r#"<div class="muted">{}</div>"#, escape(description));
    }
    out.push_str("</div></a>\n");
}

fn offer_form(org_slug: &str) -> String {
    format!(
        r#"<div class="card">
<h3>Oferta por cartão / wallet</h3>
<p class="muted">Apple Pay e Google Pay aparecem automaticamente no Checkout, quando disponível no dispositivo.</p>
<form id="offer-form" data-slug="{slug}">
<label>Valor da oferta (R$) <input name="amount" inputmode="decimal" value="50" placeholder="50,00"></label>
<p id="offer-error" class="muted"></p>
<button type="submit">Ofertar com cartão / carteira digital</button>
</form>
<script>
document.getElementById("offer-form").addEventListener("submit", async function (event) {{
  event.preventDefault();
  var form = event.currentTarget;
  var error = document.getElementById("offer-error");
  error.textContent = "";
  try {{
    var response = await fetch("/api/offers/checkout", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify({{ slug: form.dataset.slug, amount: Number(form.amount.value.replace(",", ".")) }})
    }});
    var payload = await response.json();
    if (!response.ok || !payload.url) {{
      error.textContent = payload.error || "Não foi possível iniciar o pagamento.";
      return;
    }}
    window.location.href = payload.url;
  }} catch (e) {{
    error.textContent = "Falha de conexão ao iniciar pagamento.";
  }}
}});
</script>
</div>"#,
        slug = escape(org_slug),
    )
}

/// Micro-site da localidade: cabeçalho, faixa "Destaques", lista normal e formulário de oferta.
pub fn public_page(page: &PublicPage) -> String {
    let org = &page.organization;
    let location = &page.location;

    let primary = safe_color(org.primary_color.as_deref(), DEFAULT_PRIMARY_COLOR);
    let accent = safe_color(org.accent_color.as_deref(), DEFAULT_ACCENT_COLOR);
    let logo = org.logo_url.as_deref().unwrap_or(FALLBACK_LOGO);
    let title = location.welcome_title.as_deref().unwrap_or(&org.name);
    let text = location.welcome_text.as_deref().unwrap_or(DEFAULT_WELCOME_TEXT);

    let mut body = String::new();

    let _ = write!(
        body,
        r#"<section class="micro-header">
<img class="logo" src="{logo}" alt="{name}" onerror="if (!this.src.endsWith('{fallback}')) this.src='{fallback}'">
<h1>{title}</h1>
<p>{text}</p>
"#,
        logo = escape(logo),
        name = escape(&org.name),
        fallback = FALLBACK_LOGO,
        title = escape(title),
        text = escape(text),
    );

    if !page.featured.is_empty() {
        body.push_str(r#"<div class="micro-header-icons">"#);
        for link in &page.featured {
            if let Some(kind) = link.featured_type {
                let _ = write!(
                    body,
                    r#"<a href="/r/{id}" target="_blank" rel="noreferrer"><img class="micro-header-icon" src="{icon}" alt="{label}"></a>"#,
                    id = link.id,
                    icon = kind.icon_url(),
                    label = kind.label(),
                );
            }
        }
        body.push_str("</div>\n");
    }
    body.push_str("</section>\n");

    body.push_str(&offer_form(&org.slug));
    body.push('\n');

    if !page.featured.is_empty() {
        body.push_str("<section>\n<span class=\"featured-badge\">Destaques</span>\n");
        for link in &page.featured {
            link_card(&mut body, link, accent);
        }
        body.push_str("</section>\n");
    }

    if page.featured.is_empty() && page.links.is_empty() {
        body.push_str("<div class=\"card\"><p>Sem links ativos no momento.</p></div>\n");
    } else {
        for link in &page.links {
            link_card(&mut body, link, accent);
        }
    }

    layout(&format!("{} | {}", org.name, location.name), primary, &body)
}

/// Página inerte (sem redirecionamento) com uma mensagem e um detalhe opcional.
pub fn message_page(message: &str, detail: Option<&str>) -> String {
    let mut body = format!("<p>{}</p>", escape(message));
    if let Some(detail) = detail {
        let _ = write!(body, r#"<p class="muted">{}</p>"#, escape(detail));
    }
    layout("TAP Church", DEFAULT_PRIMARY_COLOR, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        link::{FeaturedType, LinkCategory},
        public::{PublicLocation, PublicOrganization},
    };
    use uuid::Uuid;

    fn link(title: &str, featured: Option<FeaturedType>) -> PublicLink {
        PublicLink {
            id: Uuid::new_v4(),
            title: title.into(),
            url: "graca.org".into(),
            description: None,
            icon_url: None,
            category: LinkCategory::Generic,
            method: None,
            featured_type: featured,
        }
    }

    fn page(featured: Vec<PublicLink>, links: Vec<PublicLink>) -> PublicPage {
        PublicPage {
            organization: PublicOrganization {
                id: Uuid::new_v4(),
                name: "Igreja da Graça".into(),
                slug: "graca".into(),
                logo_url: None,
                primary_color: Some("red; background: url(x)".into()),
                accent_color: Some("#123abc".into()),
            },
            location: PublicLocation {
                id: Uuid::new_v4(),
                name: "Sede".into(),
                slug: "sede".into(),
                welcome_title: None,
                welcome_text: None,
            },
            featured,
            links,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn only_complete_hex_colors_are_used() {
        for valid in ["#abc", "#abcd", "#123abc", "#123abc80"] {
            assert_eq!(safe_color(Some(valid), "#000000"), valid);
        }
        for invalid in ["#", "#12", "#12345", "#1234567", "#ggg", "123abc", "red", ""] {
            assert_eq!(safe_color(Some(invalid), "#000000"), "#000000", "cor {:?}", invalid);
        }
        assert_eq!(safe_color(None, "#000000"), "#000000");
    }

    #[test]
    fn empty_page_uses_fallbacks() {
        let html = public_page(&page(vec![], vec![]));
        assert!(html.contains("Sem links ativos no momento."));
        assert!(html.contains("<h1>Igreja da Graça</h1>"));
        assert!(html.contains(DEFAULT_WELCOME_TEXT));
        assert!(html.contains(FALLBACK_LOGO));
        // Cor inválida cai no padrão; a válida é usada
        assert!(html.contains(DEFAULT_PRIMARY_COLOR));
        assert!(!html.contains("url(x)"));
        assert!(!html.contains("Destaques"));
    }

    #[test]
    fn links_are_attributed_through_redirect() {
        let insta = link("Instagram", Some(FeaturedType::Instagram));
        let normal = link("<script>Oferta</script>", None);
        let html = public_page(&page(vec![insta.clone()], vec![normal.clone()]));

        assert!(html.contains("Destaques"));
        assert!(html.contains(&format!("/r/{}", insta.id)));
        assert!(html.contains(&format!("/r/{}", normal.id)));
        assert!(html.contains("&lt;script&gt;Oferta&lt;/script&gt;"));
        assert!(html.contains("border-color: #123abc"));
        assert!(!html.contains("Sem links ativos"));
    }
}
