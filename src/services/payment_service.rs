// src/services/payment_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{clock::Clock, error::AppError},
    models::{
        billing::{Invoice, Payment, PaymentMethod},
        dashboard::ActivityKind,
    },
    store::{PersistenceSink, Store},
};

// Reconciliação de pagamentos: aplica pagamentos simples e em lote sobre
// o livro de faturas e expõe a visão de saldo por cliente. Mutação
// financeira nunca é repetida automaticamente — falhou, devolve o erro e
// o chamador decide.
#[derive(Clone)]
pub struct PaymentService {
    store: Store,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn PersistenceSink>,
}

impl PaymentService {
    pub fn new(store: Store, clock: Arc<dyn Clock>, sink: Arc<dyn PersistenceSink>) -> Self {
        Self { store, clock, sink }
    }

    // --- PAGAMENTO SIMPLES ---
    // Pagar acima do saldo devedor é rejeitado: `paid_amount <= total` é
    // invariante dura do livro.
    pub fn record_payment(
        &self,
        invoice_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Invoice, AppError> {
        let now = self.clock.now();
        let date = date.unwrap_or_else(|| now.date_naive());

        let mut state = self.store.write();

        let invoice = state.invoices.get(invoice_id)?;
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }
        if amount > invoice.remaining() {
            return Err(AppError::PaymentExceedsBalance);
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            amount,
            method,
            date,
            notes,
        };
        let invoice = state.invoices.get_mut(invoice_id)?;
        invoice.apply_payment(payment.clone());
        let snapshot = invoice.clone();

        state.activity.record(
            ActivityKind::InvoicePaid,
            format!("Pagamento de {amount} registrado em {}", snapshot.invoice_number),
            now,
        );
        drop(state);

        self.sink.payment_appended(&snapshot, &payment);
        Ok(snapshot)
    }

    // --- PAGAMENTO EM LOTE ---
    // Um valor único distribuído entre várias faturas, da dívida mais
    // antiga (menor vencimento) para a mais nova, quitando cada fatura
    // antes de passar à próxima. Se o valor excede a dívida total das
    // faturas selecionadas, nada é gravado.
    pub fn record_bulk_payment(
        &self,
        invoice_ids: &[Uuid],
        total_amount: Decimal,
        method: PaymentMethod,
        date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<Vec<Invoice>, AppError> {
        if invoice_ids.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("invoiceIds", ValidationError::new("length"));
            return Err(AppError::ValidationError(errors));
        }
        if total_amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }

        let now = self.clock.now();
        let date = date.unwrap_or_else(|| now.date_naive());

        let mut state = self.store.write();

        // Valida TODAS as faturas e soma a dívida antes de tocar em
        // qualquer uma (ids repetidos contam uma vez).
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        let mut outstanding = Decimal::ZERO;
        for id in invoice_ids {
            let invoice = state.invoices.get(*id)?;
            if seen.insert(*id) {
                outstanding += invoice.remaining();
                targets.push((invoice.due_date, invoice.created_at, *id));
            }
        }
        if total_amount > outstanding {
            return Err(AppError::TotalExceedsDebt);
        }

        // Dívida mais antiga primeiro; desempate estável por criação/id.
        targets.sort();

        let mut left = total_amount;
        let mut touched: Vec<(Invoice, Payment)> = Vec::new();
        for (_, _, id) in targets {
            if left <= Decimal::ZERO {
                break;
            }
            let invoice = state.invoices.get_mut(id)?;
            let share = invoice.remaining().min(left);
            if share <= Decimal::ZERO {
                continue;
            }
            let payment = Payment {
                id: Uuid::new_v4(),
                amount: share,
                method,
                date,
                notes: notes.clone(),
            };
            invoice.apply_payment(payment.clone());
            left -= share;
            touched.push((invoice.clone(), payment));
        }

        state.activity.record(
            ActivityKind::InvoicePaid,
            format!(
                "Pagamento em lote de {total_amount} aplicado a {} fatura(s)",
                touched.len()
            ),
            now,
        );
        drop(state);

        for (invoice, payment) in &touched {
            self.sink.payment_appended(invoice, payment);
        }
        Ok(touched.into_iter().map(|(invoice, _)| invoice).collect())
    }

    // --- SALDO DO CLIENTE ---
    // Recalculado sob demanda sobre um snapshot consistente do livro.
    pub fn balance(&self, customer_id: Uuid) -> Result<Decimal, AppError> {
        let state = self.store.read();
        state.customers.get(customer_id)?;
        Ok(state.invoices.balance_for(customer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::billing::InvoiceStatus;
    use crate::services::test_support::TestEngine;
    use chrono::Days;
    use rust_decimal_macros::dec;

    // Três faturas em aberto com saldos 50/30/20, vencimento crescente.
    fn seed_three_invoices(engine: &TestEngine, customer_id: Uuid) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for (i, amount) in [dec!(50), dec!(30), dec!(20)].into_iter().enumerate() {
            let due = engine.clock.now().date_naive() + Days::new(i as u64);
            let invoice = engine
                .billing
                .create_manual_invoice(
                    customer_id,
                    vec![crate::services::billing_service::ManualLine {
                        description: format!("Cobrança {i}"),
                        quantity: 1,
                        rate: amount,
                    }],
                    Decimal::ZERO,
                    Some(due),
                )
                .unwrap();
            ids.push(invoice.id);
        }
        ids
    }

    #[test]
    fn partial_payment_updates_status_and_sum_invariant() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let invoice_id = seed_three_invoices(&engine, customer_id)[0];

        let invoice = engine
            .payments
            .record_payment(invoice_id, dec!(20), PaymentMethod::Cash, None, None)
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Partial);
        assert_eq!(invoice.paid_amount, dec!(20));
        assert!(invoice.paid_date.is_none());

        let invoice = engine
            .payments
            .record_payment(invoice_id, dec!(30), PaymentMethod::Card, None, None)
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.paid_date, Some(engine.clock.now().date_naive()));

        // paid_amount == Σ pagamentos
        let sum: Decimal = invoice.payments.iter().map(|p| p.amount).sum();
        assert_eq!(sum, invoice.paid_amount);
    }

    #[test]
    fn overpayment_and_non_positive_amounts_are_rejected() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let invoice_id = seed_three_invoices(&engine, customer_id)[2]; // total 20

        let err = engine
            .payments
            .record_payment(invoice_id, Decimal::ZERO, PaymentMethod::Cash, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount));

        let err = engine
            .payments
            .record_payment(invoice_id, dec!(25), PaymentMethod::Cash, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::PaymentExceedsBalance));

        // Nada foi gravado.
        let invoice = engine.billing.get_invoice(invoice_id).unwrap();
        assert!(invoice.payments.is_empty());
        assert_eq!(invoice.paid_amount, Decimal::ZERO);
    }

    #[test]
    fn bulk_payment_settles_oldest_debt_first() {
        // Cenário D: saldos 50/30/20, pagamento em lote de 100 zera tudo
        // com três registros de pagamento somando 100.
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let ids = seed_three_invoices(&engine, customer_id);

        let updated = engine
            .payments
            .record_bulk_payment(&ids, dec!(100), PaymentMethod::Cash, None, None)
            .unwrap();
        assert_eq!(updated.len(), 3);
        for invoice in &updated {
            assert_eq!(invoice.remaining(), Decimal::ZERO);
            assert_eq!(invoice.status, InvoiceStatus::Paid);
            assert_eq!(invoice.payments.len(), 1);
        }
        let paid_total: Decimal = updated
            .iter()
            .flat_map(|i| i.payments.iter())
            .map(|p| p.amount)
            .sum();
        assert_eq!(paid_total, dec!(100));
        assert_eq!(engine.payments.balance(customer_id).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn bulk_payment_splits_across_due_dates() {
        // 60 cobre a fatura mais antiga (50) e abate 10 da seguinte.
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let ids = seed_three_invoices(&engine, customer_id);

        let updated = engine
            .payments
            .record_bulk_payment(&ids, dec!(60), PaymentMethod::Cash, None, None)
            .unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].status, InvoiceStatus::Paid);
        assert_eq!(updated[1].status, InvoiceStatus::Partial);
        assert_eq!(updated[1].paid_amount, dec!(10));
        assert_eq!(engine.payments.balance(customer_id).unwrap(), dec!(40));
    }

    #[test]
    fn bulk_payment_exceeding_debt_mutates_nothing() {
        // Cenário E: 200 > 100 de dívida -> TotalExceedsDebt e zero
        // pagamentos criados.
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let ids = seed_three_invoices(&engine, customer_id);

        let err = engine
            .payments
            .record_bulk_payment(&ids, dec!(200), PaymentMethod::Cash, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::TotalExceedsDebt));

        for id in ids {
            let invoice = engine.billing.get_invoice(id).unwrap();
            assert!(invoice.payments.is_empty());
            assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        }
        assert_eq!(engine.payments.balance(customer_id).unwrap(), dec!(100));
    }

    #[test]
    fn bulk_payment_validates_every_invoice_before_mutating() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let mut ids = seed_three_invoices(&engine, customer_id);
        ids.push(Uuid::new_v4()); // intruso

        let err = engine
            .payments
            .record_bulk_payment(&ids, dec!(10), PaymentMethod::Cash, None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::InvoiceNotFound));
        assert_eq!(engine.payments.balance(customer_id).unwrap(), dec!(100));
    }

    #[test]
    fn balance_is_idempotent_without_mutation() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        seed_three_invoices(&engine, customer_id);

        let first = engine.payments.balance(customer_id).unwrap();
        let second = engine.payments.balance(customer_id).unwrap();
        assert_eq!(first, dec!(100));
        assert_eq!(first, second);
    }
}
