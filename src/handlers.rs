// src/handlers.rs

pub mod billing;
pub mod crm;
pub mod dashboard;
pub mod inventory;
pub mod resources;
pub mod sessions;
pub mod subscriptions;

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validação Customizada (compartilhada pelos payloads monetários)
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}
