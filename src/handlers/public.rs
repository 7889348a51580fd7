// src/handlers/public.rs
// Superfícies públicas: sem autenticação.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

use crate::{
    common::{error::AppError, extract::AppJson},
    config::AppState,
    models::{
        checkout::{CheckoutPayload, CheckoutResponse},
        public::{PublicPage, SiteConfig},
    },
    services::public_service::RedirectOutcome,
    views,
};

// GET /go/{org}/{location}
pub async fn public_page(
    State(app_state): State<AppState>,
    Path((org_slug, location_slug)): Path<(String, String)>,
) -> Response {
    match app_state
        .public_service
        .resolve_page(&org_slug, &location_slug)
        .await
    {
        Ok(page) => Html(views::public_page(&page)).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Html(views::message_page("Igreja não encontrada.", Some(&e.to_string()))),
        )
            .into_response(),
    }
}

// GET /api/public/{org}/{location}
#[utoipa::path(
    get,
    path = "/api/public/{org}/{location}",
    tag = "Público",
    params(
        ("org" = String, Path, description = "Slug da igreja"),
        ("location" = String, Path, description = "Slug da localidade")
    ),
    responses(
        (status = 200, description = "Micro-site composto", body = PublicPage),
        (status = 404, description = "Igreja ou localidade não encontrada")
    )
)]
pub async fn public_page_json(
    State(app_state): State<AppState>,
    Path((org_slug, location_slug)): Path<(String, String)>,
) -> Result<Json<PublicPage>, AppError> {
    let page = app_state
        .public_service
        .resolve_page(&org_slug, &location_slug)
        .await?;
    Ok(Json(page))
}

// GET /r/{id}
// Link inexistente ou inativo: página inerte com 200, sem redirecionar.
pub async fn redirect_link(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    // O handle do clique é descartado: o registro segue em segundo plano
    let redirection = app_state.public_service.resolve_redirect(&id).await;

    match redirection.outcome {
        RedirectOutcome::Invalid => Html(views::message_page("Link inválido.", None)).into_response(),
        RedirectOutcome::Unavailable => Html(views::message_page(
            "Link não encontrado ou inativo.",
            Some(&format!("ID: {}", id)),
        ))
        .into_response(),
        RedirectOutcome::Redirect(url) => Redirect::temporary(&url).into_response(),
    }
}

// POST /api/offers/checkout
#[utoipa::path(
    post,
    path = "/api/offers/checkout",
    tag = "Público",
    request_body = CheckoutPayload,
    responses(
        (status = 200, description = "URL do checkout hospedado", body = CheckoutResponse),
        (status = 400, description = "Valor inválido, conta não configurada ou erro do processador"),
        (status = 404, description = "Igreja não encontrada"),
        (status = 500, description = "Configuração incompleta")
    )
)]
pub async fn create_checkout(
    State(app_state): State<AppState>,
    payload: Result<AppJson<CheckoutPayload>, AppError>,
) -> Result<Json<CheckoutResponse>, AppError> {
    // Configuração ausente vence corpo inválido
    app_state.checkout_service.ensure_configured()?;
    let AppJson(payload) = payload?;

    let url = app_state.checkout_service.create_checkout(&payload).await?;
    Ok(Json(CheckoutResponse { url }))
}

// GET /api/site-config
#[utoipa::path(
    get,
    path = "/api/site-config",
    tag = "Público",
    responses(
        (status = 200, description = "Configuração pública do site", body = SiteConfig)
    )
)]
pub async fn site_config(State(app_state): State<AppState>) -> Json<SiteConfig> {
    Json(SiteConfig {
        site_url: app_state.config.public_site_url(),
        analytics_id: app_state.config.analytics_id.clone(),
    })
}
