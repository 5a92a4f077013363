// src/lib.rs

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    Router,
    routing::{get, post, put},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;
use crate::docs::ApiDoc;

// Monta o router completo. Separado do main para os testes de integração
// dispararem requisições direto no router, sem abrir porta.
pub fn router(app_state: AppState) -> Router {
    let crm_routes = Router::new()
        .route(
            "/customers",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::crm::get_customer).put(handlers::crm::update_customer),
        )
        .route("/customers/{id}/balance", get(handlers::crm::get_customer_balance))
        .route(
            "/subscriptions",
            post(handlers::subscriptions::create_subscription)
                .get(handlers::subscriptions::list_subscriptions),
        )
        .route(
            "/subscriptions/{id}/deactivate",
            post(handlers::subscriptions::deactivate_subscription),
        )
        .route(
            "/subscriptions/{id}/reactivate",
            post(handlers::subscriptions::reactivate_subscription),
        );

    let resource_routes = Router::new()
        .route(
            "/",
            post(handlers::resources::create_resource).get(handlers::resources::list_resources),
        )
        .route(
            "/{id}",
            get(handlers::resources::get_resource).put(handlers::resources::update_resource),
        );

    let inventory_routes = Router::new()
        .route(
            "/items",
            post(handlers::inventory::create_item).get(handlers::inventory::list_items),
        )
        .route("/items/{id}", put(handlers::inventory::update_item))
        .route("/items/{id}/adjust", post(handlers::inventory::adjust_stock))
        .route("/low-stock", get(handlers::inventory::low_stock));

    let session_routes = Router::new()
        .route(
            "/",
            post(handlers::sessions::start_session).get(handlers::sessions::list_sessions),
        )
        .route(
            "/{id}/consumptions",
            post(handlers::sessions::add_consumption),
        )
        .route(
            "/{id}/consumptions/{consumption_id}",
            put(handlers::sessions::update_consumption)
                .delete(handlers::sessions::remove_consumption),
        )
        .route("/{id}/end", post(handlers::sessions::end_session));

    let billing_routes = Router::new()
        .route(
            "/invoices",
            post(handlers::billing::create_invoice).get(handlers::billing::list_invoices),
        )
        .route("/invoices/{id}", get(handlers::billing::get_invoice))
        .route(
            "/invoices/{id}/payments",
            post(handlers::billing::record_payment),
        )
        .route(
            "/payments/bulk",
            post(handlers::billing::record_bulk_payment),
        );

    let dashboard_routes =
        Router::new().route("/activity", get(handlers::dashboard::recent_activity));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/crm", crm_routes)
        .nest("/api/resources", resource_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/sessions", session_routes)
        .nest("/api/billing", billing_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
