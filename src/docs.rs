// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::get_me,

        // --- Onboarding ---
        handlers::onboarding::create_organization,
        handlers::onboarding::accept_invite,

        // --- Localidades ---
        handlers::locations::list_locations,
        handlers::locations::create_location,
        handlers::locations::update_location,
        handlers::locations::delete_location,
        handlers::locations::location_qrcode,

        // --- Tags ---
        handlers::tags::list_tags,
        handlers::tags::create_tag,
        handlers::tags::update_tag,
        handlers::tags::delete_tag,

        // --- Links ---
        handlers::links::list_links,
        handlers::links::create_link,
        handlers::links::update_link,
        handlers::links::toggle_link,
        handlers::links::delete_link,

        // --- Equipe ---
        handlers::team::list_members,
        handlers::team::add_member,
        handlers::team::update_member_role,
        handlers::team::remove_member,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_branding,
        handlers::settings::update_payment_account,
        handlers::settings::update_welcome,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Admin ---
        handlers::admin::get_metrics,
        handlers::admin::create_client,
        handlers::admin::delete_organization,
        handlers::admin::invite,

        // --- Público ---
        handlers::public::public_page_json,
        handlers::public::create_checkout,
        handlers::public::site_config,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::MeResponse,

            // --- Organizações ---
            models::organization::Organization,
            models::organization::OrganizationSummary,
            models::organization::Plan,
            models::organization::CreateOrganizationPayload,
            models::organization::CreateClientPayload,
            models::organization::CreateClientResponse,
            models::organization::UpdateBrandingPayload,
            models::organization::UpdatePaymentAccountPayload,

            // --- Localidades / Links / Tags ---
            models::location::Location,
            models::location::LocationPayload,
            models::location::UpdateWelcomePayload,
            models::link::LinkCategory,
            models::link::PaymentMethod,
            models::link::FeaturedType,
            models::link::Link,
            models::link::LinkPayload,
            models::link::CreateLinkPayload,
            models::tag::Tag,
            models::tag::TagPayload,

            // --- Equipe ---
            models::membership::MembershipRole,
            models::membership::InviteStatus,
            models::membership::Membership,
            models::membership::PendingMembership,
            models::membership::AddMemberPayload,
            models::membership::UpdateMemberRolePayload,
            models::membership::InvitePayload,
            models::membership::OkResponse,

            // --- Dashboard ---
            models::dashboard::DashboardMetrics,
            models::dashboard::GlobalCounts,
            models::dashboard::GlobalMetrics,

            // --- Público ---
            models::public::PublicOrganization,
            models::public::PublicLocation,
            models::public::PublicLink,
            models::public::PublicPage,
            models::public::SiteConfig,
            models::checkout::CheckoutPayload,
            models::checkout::CheckoutResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Identidade do usuário logado"),
        (name = "Onboarding", description = "Criação da igreja e aceite de convites"),
        (name = "Localidades", description = "Sedes, filiais e QR Codes"),
        (name = "Tags NFC", description = "Registro das tags físicas"),
        (name = "Links", description = "Links do micro-site de cada localidade"),
        (name = "Equipe", description = "Membros e papéis da igreja"),
        (name = "Configurações", description = "Identidade visual, boas-vindas e conta de pagamento"),
        (name = "Dashboard", description = "Indicadores da igreja"),
        (name = "Admin", description = "Console do super-admin"),
        (name = "Público", description = "Micro-site, checkout de ofertas e configuração do site")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
