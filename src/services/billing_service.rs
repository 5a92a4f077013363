// src/services/billing_service.rs

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{clock::Clock, error::AppError},
    models::{
        billing::{Invoice, InvoiceStatus, LineItem},
        dashboard::ActivityKind,
        sessions::Session,
    },
    store::{PersistenceSink, Store},
};

const MINUTES_PER_HOUR: i64 = 60;

// =========================================================================
//  CÁLCULO DE COBRANÇA (funções puras)
// =========================================================================

// Duração em minutos inteiros, arredondando o meio pra cima.
// Inteiros do início ao fim: nada de acumular ponto flutuante.
pub fn duration_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> i64 {
    let ms = (ended_at - started_at).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + 30_000) / 60_000
}

/// Custo de tempo da sessão. Assinante não paga tempo; os demais pagam
/// `tarifa × minutos / 60`, arredondado para 2 casas decimais (meio
/// afasta do zero). Esta é a ÚNICA política de arredondamento do motor.
pub fn session_cost(
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    rate_per_hour: Decimal,
    is_subscribed: bool,
) -> Decimal {
    if is_subscribed {
        return Decimal::ZERO;
    }
    let minutes = Decimal::from(duration_minutes(started_at, ended_at));
    (rate_per_hour * minutes / Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Linha de cobrança manual, antes de virar LineItem com valor calculado.
#[derive(Debug, Clone)]
pub struct ManualLine {
    pub description: String,
    pub quantity: u32,
    pub rate: Decimal,
}

// =========================================================================
//  SERVIÇO (fábrica de faturas)
// =========================================================================

#[derive(Clone)]
pub struct BillingService {
    store: Store,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn PersistenceSink>,
    invoice_due_days: u64,
}

impl BillingService {
    pub fn new(
        store: Store,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn PersistenceSink>,
        invoice_due_days: u64,
    ) -> Self {
        Self {
            store,
            clock,
            sink,
            invoice_due_days,
        }
    }

    fn default_due_date(&self, created_at: DateTime<Utc>) -> NaiveDate {
        created_at
            .date_naive()
            .checked_add_days(Days::new(self.invoice_due_days))
            .unwrap_or_else(|| created_at.date_naive())
    }

    // Monta a fatura de uma sessão encerrada. Construção pura: não toca
    // no estado — o chamador (SessionService) insere no livro dentro da
    // mesma transação que remove a sessão.
    //
    // Linha de tempo só entra quando custou algo; cada consumo vira uma
    // linha com o preço congelado no momento do consumo.
    pub fn invoice_from_session(
        &self,
        invoice_number: String,
        session: &Session,
        ended_at: DateTime<Utc>,
    ) -> Invoice {
        let minutes = duration_minutes(session.started_at, ended_at);
        let time_cost = session_cost(
            session.started_at,
            ended_at,
            session.resource_rate,
            session.is_subscribed,
        );

        let mut line_items = Vec::new();
        if time_cost > Decimal::ZERO {
            line_items.push(LineItem {
                description: format!("Sessão - {} ({} min)", session.resource_name, minutes),
                quantity: 1,
                rate: time_cost,
                amount: time_cost,
            });
        }
        for consumption in &session.consumptions {
            line_items.push(LineItem {
                description: consumption.item_name.clone(),
                quantity: consumption.quantity,
                rate: consumption.unit_price,
                amount: consumption.amount(),
            });
        }

        let amount: Decimal = line_items.iter().map(|l| l.amount).sum();
        let discount = Decimal::ZERO;
        let total = amount - discount;

        Invoice {
            id: Uuid::new_v4(),
            invoice_number,
            customer_id: session.customer_id,
            customer_name: session.customer_name.clone(),
            session_id: Some(session.id),
            line_items,
            amount,
            discount,
            total,
            paid_amount: Decimal::ZERO,
            status: InvoiceStatus::from_amounts(Decimal::ZERO, total),
            due_date: self.default_due_date(ended_at),
            paid_date: None,
            created_at: ended_at,
            payments: Vec::new(),
        }
    }

    // Cobrança manual (sem sessão): mesmas invariantes da fatura de
    // sessão, com desconto opcional limitado ao valor bruto.
    pub fn create_manual_invoice(
        &self,
        customer_id: Uuid,
        lines: Vec<ManualLine>,
        discount: Decimal,
        due_date: Option<NaiveDate>,
    ) -> Result<Invoice, AppError> {
        if lines.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("lineItems", ValidationError::new("length"));
            return Err(AppError::ValidationError(errors));
        }

        let line_items: Vec<LineItem> = lines
            .into_iter()
            .map(|l| LineItem {
                amount: l.rate * Decimal::from(l.quantity),
                description: l.description,
                quantity: l.quantity,
                rate: l.rate,
            })
            .collect();

        let amount: Decimal = line_items.iter().map(|l| l.amount).sum();
        if discount < Decimal::ZERO || discount > amount {
            return Err(AppError::InvalidDiscount);
        }
        let total = amount - discount;

        let now = self.clock.now();
        let mut state = self.store.write();
        let customer_name = state.customers.get(customer_id)?.name.clone();

        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number: state.invoices.next_number(),
            customer_id,
            customer_name: customer_name.clone(),
            session_id: None,
            line_items,
            amount,
            discount,
            total,
            paid_amount: Decimal::ZERO,
            status: InvoiceStatus::from_amounts(Decimal::ZERO, total),
            due_date: due_date.unwrap_or_else(|| self.default_due_date(now)),
            paid_date: None,
            created_at: now,
            payments: Vec::new(),
        };

        state.invoices.insert(invoice.clone());
        state.activity.record(
            ActivityKind::InvoiceCreated,
            format!(
                "Fatura {} emitida para {customer_name}",
                invoice.invoice_number
            ),
            now,
        );
        drop(state);

        self.sink.invoice_created(&invoice);
        Ok(invoice)
    }

    pub fn get_invoice(&self, id: Uuid) -> Result<Invoice, AppError> {
        Ok(self.store.read().invoices.get(id)?.clone())
    }

    pub fn list_invoices(&self, customer_id: Option<Uuid>) -> Vec<Invoice> {
        let state = self.store.read();
        match customer_id {
            Some(id) => state.invoices.list_for_customer(id),
            None => state.invoices.list(),
        }
    }
}
