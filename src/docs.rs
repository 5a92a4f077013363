// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- CRM ---
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::update_customer,
        handlers::crm::get_customer_balance,
        handlers::subscriptions::create_subscription,
        handlers::subscriptions::list_subscriptions,
        handlers::subscriptions::deactivate_subscription,
        handlers::subscriptions::reactivate_subscription,

        // --- Recursos ---
        handlers::resources::create_resource,
        handlers::resources::list_resources,
        handlers::resources::get_resource,
        handlers::resources::update_resource,

        // --- Estoque ---
        handlers::inventory::create_item,
        handlers::inventory::list_items,
        handlers::inventory::update_item,
        handlers::inventory::adjust_stock,
        handlers::inventory::low_stock,

        // --- Sessões ---
        handlers::sessions::start_session,
        handlers::sessions::list_sessions,
        handlers::sessions::add_consumption,
        handlers::sessions::update_consumption,
        handlers::sessions::remove_consumption,
        handlers::sessions::end_session,

        // --- Faturamento ---
        handlers::billing::create_invoice,
        handlers::billing::list_invoices,
        handlers::billing::get_invoice,
        handlers::billing::record_payment,
        handlers::billing::record_bulk_payment,

        // --- Dashboard ---
        handlers::dashboard::recent_activity,
    ),
    components(
        schemas(
            // --- CRM ---
            models::crm::Customer,
            models::subscriptions::Subscription,

            // --- Recursos ---
            models::resources::ResourceType,
            models::resources::Resource,

            // --- Estoque ---
            models::inventory::InventoryItem,

            // --- Sessões ---
            models::sessions::Consumption,
            models::sessions::Session,

            // --- Faturamento ---
            models::billing::InvoiceStatus,
            models::billing::PaymentMethod,
            models::billing::LineItem,
            models::billing::Payment,
            models::billing::Invoice,

            // --- Dashboard ---
            models::dashboard::ActivityKind,
            models::dashboard::Activity,

            // --- Payloads ---
            handlers::crm::CreateCustomerPayload,
            handlers::crm::UpdateCustomerPayload,
            handlers::crm::CustomerBalanceResponse,
            handlers::subscriptions::CreateSubscriptionPayload,
            handlers::resources::CreateResourcePayload,
            handlers::resources::UpdateResourcePayload,
            handlers::inventory::CreateItemPayload,
            handlers::inventory::UpdateItemPayload,
            handlers::inventory::AdjustStockPayload,
            handlers::sessions::StartSessionPayload,
            handlers::sessions::AddConsumptionPayload,
            handlers::sessions::UpdateConsumptionPayload,
            handlers::billing::InvoiceLinePayload,
            handlers::billing::CreateInvoicePayload,
            handlers::billing::RecordPaymentPayload,
            handlers::billing::BulkPaymentPayload,
        )
    ),
    tags(
        (name = "CRM", description = "Clientes e assinaturas"),
        (name = "Recursos", description = "Assentos, mesas e salas reserváveis"),
        (name = "Estoque", description = "Itens consumíveis e saldo"),
        (name = "Sessões", description = "Ciclo de vida das sessões de uso"),
        (name = "Faturamento", description = "Faturas, pagamentos e saldo devedor"),
        (name = "Dashboard", description = "Feed de atividade recente"),
    ),
    info(
        title = "Backspace - Motor de Sessões e Faturamento",
        description = "Sessões de coworking, consumo de estoque e reconciliação de pagamentos.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
