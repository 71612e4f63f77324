//! A single payment and its computed deduction.

use crate::decimal::Amount;
use crate::model::{Payee, Payer, PaymentType};
use crate::rules::{compute_tds, TdsComputation};
use rust_decimal::Decimal;

/// A payment from a payer to a payee with its TDS already computed.
///
/// Holds its own copies of the payer and payee, so later edits to the
/// master records do not change it. The derived fields are set once in
/// [`Payment::new`] and have no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    payer: Payer,
    payee: Payee,
    kind: PaymentType,

    /// Gross amount; the monthly amount for salary.
    gross: Amount,

    /// Free-form `YYYY-MM-DD`, not validated.
    date: String,

    tds: TdsComputation,
}

impl Payment {
    /// Creates the payment and applies the rate table.
    pub fn new(
        payer: Payer,
        payee: Payee,
        kind: PaymentType,
        gross: Amount,
        date: impl Into<String>,
    ) -> Self {
        let tds = compute_tds(kind, gross, payee.category);
        Payment {
            payer,
            payee,
            kind,
            gross,
            date: date.into(),
            tds,
        }
    }

    pub fn payer(&self) -> &Payer {
        &self.payer
    }

    pub fn payee(&self) -> &Payee {
        &self.payee
    }

    pub fn kind(&self) -> PaymentType {
        self.kind
    }

    pub fn gross(&self) -> Amount {
        self.gross
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn section(&self) -> &'static str {
        self.tds.section
    }

    pub fn rate(&self) -> Decimal {
        self.tds.rate
    }

    pub fn deducted(&self) -> Amount {
        self.tds.deducted
    }

    /// Amount paid out after withholding.
    pub fn net(&self) -> Amount {
        self.gross - self.tds.deducted
    }
}
