// src/services/qr_code.rs

use qrcode::{render::svg, QrCode};

use crate::common::error::AppError;

/// URL pública do micro-site de uma localidade.
pub fn public_page_url(site_url: &str, org_slug: &str, location_slug: &str) -> String {
    format!("{}/go/{}/{}", site_url.trim_end_matches('/'), org_slug, location_slug)
}

/// QR Code (SVG) para imprimir ao lado da tag NFC.
pub fn render_svg(content: &str) -> Result<String, AppError> {
    let code = QrCode::new(content.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#0f172a"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(image)
}
