//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod views;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, rbac::super_admin_guard, tenancy::tenant_guard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG sobrescreve o filtro padrão
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Sem DATABASE_URL a aplicação não deve iniciar
    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (micro-site, redirecionamento, checkout)
    let public_routes = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/site-config", get(handlers::public::site_config))
        .route("/api/public/{org}/{location}", get(handlers::public::public_page_json))
        .route("/api/offers/checkout", post(handlers::public::create_checkout))
        .route("/go/{org}/{location}", get(handlers::public::public_page))
        .route("/r/{id}", get(handlers::public::redirect_link));

    // Rotas de usuário logado, ainda sem igreja
    let user_routes = Router::new()
        .route("/api/me", get(handlers::auth::get_me))
        .route("/api/onboarding", post(handlers::onboarding::create_organization))
        .route("/api/onboarding/accept-invite", post(handlers::onboarding::accept_invite))
        // O convite faz a própria checagem de super-admin no serviço
        .route("/api/admin/invite", post(handlers::admin::invite))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Painel da igreja: auth_guard roda antes do tenant_guard
    let tenant_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/locations"
               ,get(handlers::locations::list_locations)
               .post(handlers::locations::create_location)
        )
        .route("/api/locations/{id}"
               ,put(handlers::locations::update_location)
               .delete(handlers::locations::delete_location)
        )
        .route("/api/locations/{id}/qrcode", get(handlers::locations::location_qrcode))
        .route("/api/locations/{id}/welcome", put(handlers::settings::update_welcome))
        .route("/api/tags"
               ,get(handlers::tags::list_tags)
               .post(handlers::tags::create_tag)
        )
        .route("/api/tags/{id}"
               ,put(handlers::tags::update_tag)
               .delete(handlers::tags::delete_tag)
        )
        .route("/api/links"
               ,get(handlers::links::list_links)
               .post(handlers::links::create_link)
        )
        .route("/api/links/{id}"
               ,put(handlers::links::update_link)
               .delete(handlers::links::delete_link)
        )
        .route("/api/links/{id}/toggle", post(handlers::links::toggle_link))
        .route("/api/team"
               ,get(handlers::team::list_members)
               .post(handlers::team::add_member)
        )
        .route("/api/team/{id}"
               ,put(handlers::team::update_member_role)
               .delete(handlers::team::remove_member)
        )
        .route("/api/settings", get(handlers::settings::get_settings))
        .route("/api/settings/branding", put(handlers::settings::update_branding))
        .route("/api/settings/payment-account", put(handlers::settings::update_payment_account))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Console do super-admin
    let admin_routes = Router::new()
        .route("/api/admin/metrics", get(handlers::admin::get_metrics))
        .route("/api/admin/organizations", post(handlers::admin::create_client))
        .route("/api/admin/organizations/{id}", delete(handlers::admin::delete_organization))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            super_admin_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(user_routes)
        .merge(tenant_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
