// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Partial,
    Paid,
}

impl InvoiceStatus {
    // O status é função pura de pago vs. total. Fatura de total zero
    // (sessão de assinante sem consumos) já nasce quitada.
    pub fn from_amounts(paid: Decimal, total: Decimal) -> Self {
        if paid >= total {
            InvoiceStatus::Paid
        } else if paid > Decimal::ZERO {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Unpaid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[schema(example = "Sessão - Sala de Reunião 1 (90 min)")]
    pub description: String,

    #[schema(example = 1)]
    pub quantity: u32,

    #[schema(example = "150.00")]
    pub rate: Decimal,

    #[schema(example = "150.00")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    #[schema(example = "50.00")]
    pub amount: Decimal,

    pub method: PaymentMethod,

    #[schema(value_type = String, format = Date, example = "2026-08-29")]
    pub date: NaiveDate,

    #[schema(example = "Pagamento parcial em dinheiro")]
    pub notes: Option<String>,
}

// --- FATURA ---
// Criada uma única vez por sessão encerrada (ou cobrança manual) e nunca
// apagada; só o registro de pagamentos a muta. Os pagamentos ficam
// embutidos, então a invariante `paid_amount == Σ payments` é local.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,

    #[schema(example = "INV-0001")]
    pub invoice_number: String,

    pub customer_id: Uuid,

    #[schema(example = "Ahmed Hassan")]
    pub customer_name: String,

    pub session_id: Option<Uuid>,

    pub line_items: Vec<LineItem>,

    // amount = Σ das linhas; total = amount - discount
    #[schema(example = "180.00")]
    pub amount: Decimal,

    #[schema(example = "0.00")]
    pub discount: Decimal,

    #[schema(example = "180.00")]
    pub total: Decimal,

    #[schema(example = "50.00")]
    pub paid_amount: Decimal,

    pub status: InvoiceStatus,

    #[schema(value_type = String, format = Date, example = "2026-09-05")]
    pub due_date: NaiveDate,

    #[schema(value_type = Option<String>, format = Date)]
    pub paid_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,

    pub payments: Vec<Payment>,
}

impl Invoice {
    // Saldo devedor desta fatura.
    pub fn remaining(&self) -> Decimal {
        self.total - self.paid_amount
    }

    // Único ponto que muta uma fatura: anexa o pagamento, acumula o valor
    // pago e recalcula o status. O chamador já validou o valor
    // (positivo e dentro do saldo devedor).
    pub fn apply_payment(&mut self, payment: Payment) {
        self.paid_amount += payment.amount;
        let was_paid = self.status == InvoiceStatus::Paid;
        self.status = InvoiceStatus::from_amounts(self.paid_amount, self.total);
        if self.status == InvoiceStatus::Paid && !was_paid {
            self.paid_date = Some(payment.date);
        }
        self.payments.push(payment);
    }
}
