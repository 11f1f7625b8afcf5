use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::EntryStatus;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::giveaway::validate_order,
        handlers::giveaway::submit_entry,
        handlers::auth::login,
        handlers::admin::list_entries,
        handlers::admin::export_entries,
    ),
    components(
        schemas(
            ValidateOrderRequest,
            ValidationResponse,
            SubmitEntryRequest,
            SubmissionResponse,
            EntryResponse,
            EntryStatus,
            LoginRequest,
            AuthResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "giveaway", description = "Giveaway entry API"),
        (name = "auth", description = "Admin authentication API"),
        (name = "admin", description = "Giveaway entry reporting API"),
    ),
    info(
        title = "PS5 Giveaway API",
        version = "1.0.0",
        description = "PS5 giveaway entry validation, submission and reporting"
    ),
    servers(
        (url = "/api/ps5-giveaway/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
