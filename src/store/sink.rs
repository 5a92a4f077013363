// src/store/sink.rs

use uuid::Uuid;

use crate::models::{
    billing::{Invoice, Payment},
    sessions::Session,
};

// Gancho síncrono de persistência: os serviços chamam depois de cada
// mutação bem-sucedida (e fora do lock). A tecnologia de armazenamento
// fica do lado de fora do motor; faturas e pagamentos são somente
// append/update, nunca removidos.
pub trait PersistenceSink: Send + Sync {
    fn session_opened(&self, session: &Session);
    fn session_closed(&self, session_id: Uuid, invoice: &Invoice);
    fn invoice_created(&self, invoice: &Invoice);
    fn payment_appended(&self, invoice: &Invoice, payment: &Payment);
}

// Sink padrão: só registra no log estruturado.
pub struct LogSink;

impl PersistenceSink for LogSink {
    fn session_opened(&self, session: &Session) {
        tracing::info!(
            session_id = %session.id,
            customer = %session.customer_name,
            resource = %session.resource_name,
            subscribed = session.is_subscribed,
            "sessão aberta"
        );
    }

    fn session_closed(&self, session_id: Uuid, invoice: &Invoice) {
        tracing::info!(
            session_id = %session_id,
            invoice = %invoice.invoice_number,
            total = %invoice.total,
            "sessão encerrada"
        );
    }

    fn invoice_created(&self, invoice: &Invoice) {
        tracing::info!(
            invoice = %invoice.invoice_number,
            customer = %invoice.customer_name,
            total = %invoice.total,
            "fatura emitida"
        );
    }

    fn payment_appended(&self, invoice: &Invoice, payment: &Payment) {
        tracing::info!(
            invoice = %invoice.invoice_number,
            amount = %payment.amount,
            status = ?invoice.status,
            "pagamento registrado"
        );
    }
}
