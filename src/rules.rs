//! TDS rate table.
//!
//! Every band is exempt up to and including its threshold. The rate that
//! applies above it multiplies the whole gross amount, not the excess.

use crate::decimal::Amount;
use crate::model::{PayeeCategory, PaymentType};
use log::{debug, warn};
use rust_decimal::Decimal;

/// Section code used when the payment type is not recognised.
pub const UNKNOWN_SECTION: &str = "Unknown";

/// Outcome of applying the rate table to one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TdsComputation {
    /// Statutory section, e.g. `194J`.
    pub section: &'static str,

    pub rate: Decimal,

    /// Tax withheld, at full precision.
    pub deducted: Amount,
}

impl TdsComputation {
    /// Zero-rate result under the `Unknown` section.
    pub fn unknown() -> Self {
        TdsComputation {
            section: UNKNOWN_SECTION,
            rate: Decimal::ZERO,
            deducted: Amount::ZERO,
        }
    }
}

/// Statutory section for a payment type.
pub fn section_for(kind: PaymentType) -> &'static str {
    match kind {
        PaymentType::Professional => "194J",
        PaymentType::Rent => "194IB",
        PaymentType::Contractor => "194C",
        PaymentType::Salary => "192",
    }
}

/// Computes the TDS on `gross` for a payment of `kind` to a payee of `category`.
///
/// For salary, `gross` is the monthly amount; the rate comes from the annual
/// projection (`gross × 12`) and is applied to the monthly amount.
///
/// The Salary-for-Company restriction is not checked here.
pub fn compute_tds(kind: PaymentType, gross: Amount, category: PayeeCategory) -> TdsComputation {
    let rate = match kind {
        PaymentType::Professional => flat_rate(gross, 30_000, Amount::rate(10, 2)),
        PaymentType::Rent => flat_rate(gross, 50_000, Amount::rate(5, 2)),
        PaymentType::Contractor => {
            let above = match category {
                PayeeCategory::Individual => Amount::rate(1, 2),
                PayeeCategory::Company => Amount::rate(2, 2),
            };
            flat_rate(gross, 30_000, above)
        }
        PaymentType::Salary => match gross.checked_mul(12) {
            Some(annual) => salary_rate(annual),
            // past Decimal::MAX, so beyond every slab
            None if gross.is_negative() => Decimal::ZERO,
            None => Amount::rate(30, 2),
        },
    };

    let computation = TdsComputation {
        section: section_for(kind),
        rate,
        deducted: gross.apply_rate(rate),
    };

    debug!(
        "{} payment of {} to {}: section {}, rate {}, deducted {}",
        kind, gross, category, computation.section, rate, computation.deducted
    );

    computation
}

/// Lenient variant of [`compute_tds`] for a raw stored type index.
///
/// An index outside the known payment types yields
/// [`TdsComputation::unknown`] and a warning instead of an error.
pub fn compute_tds_for_index(index: u8, gross: Amount, category: PayeeCategory) -> TdsComputation {
    match PaymentType::try_from(index) {
        Ok(kind) => compute_tds(kind, gross, category),
        Err(e) => {
            warn!("{}; no TDS applied to {}", e, gross);
            TdsComputation::unknown()
        }
    }
}

fn flat_rate(gross: Amount, threshold: i64, above: Decimal) -> Decimal {
    if gross <= Amount::from_rupees(threshold) {
        Decimal::ZERO
    } else {
        above
    }
}

/// Slab rate for a projected annual salary.
pub fn salary_rate(annual: Amount) -> Decimal {
    if annual <= Amount::from_rupees(250_000) {
        Decimal::ZERO
    } else if annual <= Amount::from_rupees(500_000) {
        Amount::rate(5, 2)
    } else if annual <= Amount::from_rupees(1_000_000) {
        Amount::rate(20, 2)
    } else {
        Amount::rate(30, 2)
    }
}
