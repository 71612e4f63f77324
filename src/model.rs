//! Payee and payer master records and the closed enums they use.

use crate::error::{EngineError, Result};
use std::fmt;
use std::str::FromStr;

/// Legal category of a payee. Stored as its 0-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayeeCategory {
    Individual,
    Company,
}

impl PayeeCategory {
    /// Index written to the payee file.
    pub fn index(self) -> u8 {
        match self {
            PayeeCategory::Individual => 0,
            PayeeCategory::Company => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PayeeCategory::Individual => "Individual",
            PayeeCategory::Company => "Company",
        }
    }

    /// Converts a 1-based menu choice (1 = Individual, 2 = Company).
    pub fn from_menu_choice(choice: u32) -> Result<Self> {
        match choice {
            1 => Ok(PayeeCategory::Individual),
            2 => Ok(PayeeCategory::Company),
            other => Err(EngineError::InvalidCategory {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for PayeeCategory {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(PayeeCategory::Individual),
            1 => Ok(PayeeCategory::Company),
            other => Err(EngineError::InvalidCategory {
                value: other.to_string(),
            }),
        }
    }
}

/// Accepts `individual`/`company` in any case, or the menu number.
impl FromStr for PayeeCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(choice) = trimmed.parse::<u32>() {
            return Self::from_menu_choice(choice);
        }
        match trimmed.to_lowercase().as_str() {
            "individual" => Ok(PayeeCategory::Individual),
            "company" => Ok(PayeeCategory::Company),
            _ => Err(EngineError::InvalidCategory {
                value: trimmed.to_string(),
            }),
        }
    }
}

impl fmt::Display for PayeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of payment, which decides the statutory section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Professional,
    Rent,
    Contractor,
    Salary,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        PaymentType::Professional,
        PaymentType::Rent,
        PaymentType::Contractor,
        PaymentType::Salary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Professional => "Professional",
            PaymentType::Rent => "Rent",
            PaymentType::Contractor => "Contractor",
            PaymentType::Salary => "Salary",
        }
    }

    /// Converts a 1-based menu choice.
    pub fn from_menu_choice(choice: u32) -> Result<Self> {
        let index = choice.checked_sub(1).and_then(|i| u8::try_from(i).ok());
        match index.map(Self::try_from) {
            Some(Ok(kind)) => Ok(kind),
            _ => Err(EngineError::InvalidPaymentType {
                value: choice.to_string(),
            }),
        }
    }

    /// Whether a payee of `category` may receive this kind of payment.
    pub fn allowed_for(self, category: PayeeCategory) -> bool {
        !(self == PaymentType::Salary && category == PayeeCategory::Company)
    }
}

impl TryFrom<u8> for PaymentType {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(EngineError::InvalidPaymentType {
                value: index.to_string(),
            })
    }
}

impl FromStr for PaymentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(choice) = trimmed.parse::<u32>() {
            return Self::from_menu_choice(choice);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::InvalidPaymentType {
                value: trimmed.to_string(),
            })
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The income recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payee {
    pub name: String,

    /// PAN of the payee.
    pub tax_id: String,

    pub category: PayeeCategory,
}

impl Payee {
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>, category: PayeeCategory) -> Self {
        Payee {
            name: name.into(),
            tax_id: tax_id.into(),
            category,
        }
    }

    /// Replaces the fields present in `update`.
    pub fn apply(&mut self, update: PayeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(tax_id) = update.tax_id {
            self.tax_id = tax_id;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.name, self.tax_id, self.category)
    }
}

/// The income disburser, who deducts the tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payer {
    pub name: String,

    /// PAN of the payer.
    pub tax_id: String,

    /// TAN of the payer.
    pub deductor_id: String,
}

impl Payer {
    pub fn new(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        deductor_id: impl Into<String>,
    ) -> Self {
        Payer {
            name: name.into(),
            tax_id: tax_id.into(),
            deductor_id: deductor_id.into(),
        }
    }

    /// Replaces the fields present in `update`.
    pub fn apply(&mut self, update: PayerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(tax_id) = update.tax_id {
            self.tax_id = tax_id;
        }
        if let Some(deductor_id) = update.deductor_id {
            self.deductor_id = deductor_id;
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.name, self.tax_id, self.deductor_id)
    }
}

/// Replacement fields for a payee edit. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayeeUpdate {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub category: Option<PayeeCategory>,
}

/// Replacement fields for a payer edit. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerUpdate {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub deductor_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_index() {
        assert_eq!(PayeeCategory::try_from(0).unwrap(), PayeeCategory::Individual);
        assert_eq!(PayeeCategory::try_from(1).unwrap(), PayeeCategory::Company);
        assert!(matches!(
            PayeeCategory::try_from(2),
            Err(EngineError::InvalidCategory { value }) if value == "2"
        ));
    }

    #[test]
    fn test_category_index_round_trips() {
        for category in [PayeeCategory::Individual, PayeeCategory::Company] {
            assert_eq!(PayeeCategory::try_from(category.index()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("company".parse::<PayeeCategory>().unwrap(), PayeeCategory::Company);
        assert_eq!(" Individual ".parse::<PayeeCategory>().unwrap(), PayeeCategory::Individual);
        assert_eq!("2".parse::<PayeeCategory>().unwrap(), PayeeCategory::Company);
        assert!("0".parse::<PayeeCategory>().is_err());
        assert!("trust".parse::<PayeeCategory>().is_err());
    }

    #[test]
    fn test_payment_type_from_index() {
        for (i, kind) in PaymentType::ALL.iter().enumerate() {
            assert_eq!(PaymentType::try_from(i as u8).unwrap(), *kind);
        }
        assert!(matches!(
            PaymentType::try_from(4),
            Err(EngineError::InvalidPaymentType { .. })
        ));
    }

    #[test]
    fn test_payment_type_from_menu_choice() {
        assert_eq!(PaymentType::from_menu_choice(1).unwrap(), PaymentType::Professional);
        assert_eq!(PaymentType::from_menu_choice(4).unwrap(), PaymentType::Salary);
        assert!(PaymentType::from_menu_choice(0).is_err());
        assert!(PaymentType::from_menu_choice(5).is_err());
        assert!(PaymentType::from_menu_choice(u32::MAX).is_err());
    }

    #[test]
    fn test_payment_type_from_str() {
        assert_eq!("RENT".parse::<PaymentType>().unwrap(), PaymentType::Rent);
        assert_eq!("contractor".parse::<PaymentType>().unwrap(), PaymentType::Contractor);
        assert_eq!("3".parse::<PaymentType>().unwrap(), PaymentType::Contractor);
        assert!("bonus".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_salary_not_allowed_for_company() {
        assert!(!PaymentType::Salary.allowed_for(PayeeCategory::Company));
        assert!(PaymentType::Salary.allowed_for(PayeeCategory::Individual));
        assert!(PaymentType::Rent.allowed_for(PayeeCategory::Company));
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut payee = Payee::new("Asha", "ABCDE1234F", PayeeCategory::Individual);
        payee.apply(PayeeUpdate {
            category: Some(PayeeCategory::Company),
            ..Default::default()
        });
        assert_eq!(payee.name, "Asha");
        assert_eq!(payee.tax_id, "ABCDE1234F");
        assert_eq!(payee.category, PayeeCategory::Company);

        let mut payer = Payer::new("Acme", "AAACA1111A", "MUMA12345B");
        payer.apply(PayerUpdate {
            deductor_id: Some("DELA54321C".to_string()),
            ..Default::default()
        });
        assert_eq!(payer.to_string(), "Acme - AAACA1111A - DELA54321C");
    }

    #[test]
    fn test_listing_lines() {
        let payee = Payee::new("Asha", "ABCDE1234F", PayeeCategory::Individual);
        assert_eq!(payee.to_string(), "Asha - ABCDE1234F - Individual");
    }
}
