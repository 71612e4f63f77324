//! TDS certificates (Form 16, 16A and 16C).
//!
//! A [`Certificate`] is a plain snapshot of a [`Payment`]; its `Display`
//! output is the text block shown on screen and appended to the ledger.

use crate::decimal::Amount;
use crate::error::{EngineError, Result};
use crate::model::{PayeeCategory, PaymentType};
use crate::payment::Payment;
use std::fmt;

/// Divider written after every certificate block.
pub const DIVIDER: &str = "-------------------------";

/// Certificate form, chosen by payment type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    /// Salary.
    Form16,
    /// Professional fees and contractor payments.
    Form16A,
    /// Rent.
    Form16C,
}

impl FormType {
    pub fn for_payment(kind: PaymentType) -> Self {
        match kind {
            PaymentType::Rent => FormType::Form16C,
            PaymentType::Salary => FormType::Form16,
            PaymentType::Professional | PaymentType::Contractor => FormType::Form16A,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormType::Form16 => "FORM 16",
            FormType::Form16A => "FORM 16A",
            FormType::Form16C => "FORM 16C",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Amount lines, which differ between salary and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLines {
    Salary { monthly: Amount, annual: Amount },
    Gross(Amount),
}

/// Certificate issued to the payee for one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub form: FormType,
    pub payer_name: String,
    pub payer_deductor_id: String,
    pub payee_name: String,
    pub payee_tax_id: String,
    pub payee_category: PayeeCategory,
    pub payment_type: PaymentType,
    pub section: &'static str,
    pub amounts: AmountLines,
    pub deducted: Amount,
    pub net: Amount,
    pub date: String,
}

impl Certificate {
    /// Fails with `InvalidAmount` when a monthly salary is too large to
    /// project to a year.
    pub fn from_payment(payment: &Payment) -> Result<Self> {
        let gross = payment.gross();
        let amounts = match payment.kind() {
            PaymentType::Salary => AmountLines::Salary {
                monthly: gross,
                annual: gross
                    .checked_mul(12)
                    .ok_or_else(|| EngineError::InvalidAmount {
                        value: gross.value().to_string(),
                    })?,
            },
            _ => AmountLines::Gross(gross),
        };

        Ok(Certificate {
            form: FormType::for_payment(payment.kind()),
            payer_name: payment.payer().name.clone(),
            payer_deductor_id: payment.payer().deductor_id.clone(),
            payee_name: payment.payee().name.clone(),
            payee_tax_id: payment.payee().tax_id.clone(),
            payee_category: payment.payee().category,
            payment_type: payment.kind(),
            section: payment.section(),
            amounts,
            deducted: payment.deducted(),
            net: payment.net(),
            date: payment.date().to_string(),
        })
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.form)?;
        writeln!(f, "Deductor Name : {}", self.payer_name)?;
        writeln!(f, "Deductor TAN  : {}", self.payer_deductor_id)?;
        writeln!(f, "Payee Name    : {}", self.payee_name)?;
        writeln!(f, "Payee PAN     : {}", self.payee_tax_id)?;
        writeln!(f, "Category      : {}", self.payee_category)?;
        writeln!(f, "Payment Type  : {}", self.payment_type)?;
        writeln!(f, "Section       : {}", self.section)?;
        match self.amounts {
            AmountLines::Salary { monthly, annual } => {
                writeln!(f, "Monthly Salary: {} INR", monthly)?;
                writeln!(f, "Annual Salary : {} INR", annual)?;
            }
            AmountLines::Gross(gross) => writeln!(f, "Gross Amount  : {} INR", gross)?,
        }
        writeln!(f, "TDS Deducted  : {} INR", self.deducted)?;
        writeln!(f, "Net Amount    : {} INR", self.net)?;
        writeln!(f, "Payment Date  : {}", self.date)?;
        writeln!(f, "{}", DIVIDER)
    }
}
