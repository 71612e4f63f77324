//! Payee/payer management and the payment flow.
//!
//! [`TdsEngine`] owns the in-memory collections and the store behind them.
//! Every mutation rewrites the affected file before returning.

use crate::certificate::Certificate;
use crate::decimal::Amount;
use crate::error::{EngineError, Result};
use crate::model::{Payee, PayeeUpdate, Payer, PayerUpdate, PaymentType};
use crate::payment::Payment;
use crate::store::RecordStore;
use log::{debug, info};

/// Inputs for one payment. Indices are 1-based, as listed to the user.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub payer: usize,
    pub payee: usize,
    pub kind: PaymentType,
    pub gross: Amount,
    pub date: String,
}

/// The TDS engine.
///
/// Positions are 1-based everywhere in the public API. Deleting shifts later
/// records down by one.
///
/// Each collection is loaded from the store the first time an operation
/// needs it, so a damaged payee file does not block payer commands.
/// Mutations are made on a copy and kept only once the file is saved.
pub struct TdsEngine {
    store: RecordStore,
    payees: Option<Vec<Payee>>,
    payers: Option<Vec<Payer>>,
}

impl TdsEngine {
    pub fn new(store: RecordStore) -> Self {
        TdsEngine {
            store,
            payees: None,
            payers: None,
        }
    }

    pub fn payees(&mut self) -> Result<&[Payee]> {
        let payees = self.payee_list()?;
        Ok(payees.as_slice())
    }

    pub fn payers(&mut self) -> Result<&[Payer]> {
        let payers = self.payer_list()?;
        Ok(payers.as_slice())
    }

    pub fn add_payee(&mut self, payee: Payee) -> Result<()> {
        info!("Adding payee {}", payee.name);
        let mut payees = self.payee_list()?.clone();
        payees.push(payee);
        self.commit_payees(payees)?;
        Ok(())
    }

    pub fn add_payer(&mut self, payer: Payer) -> Result<()> {
        info!("Adding payer {}", payer.name);
        let mut payers = self.payer_list()?.clone();
        payers.push(payer);
        self.commit_payers(payers)?;
        Ok(())
    }

    /// Replaces the supplied fields of the payee at `index`.
    ///
    /// Nothing is written when the index is rejected.
    pub fn edit_payee(&mut self, index: usize, update: PayeeUpdate) -> Result<&Payee> {
        let mut payees = self.payee_list()?.clone();
        let slot = position(index, payees.len(), "payee")?;
        payees[slot].apply(update);
        let payees = self.commit_payees(payees)?;
        info!("Updated payee {}", index);
        Ok(&payees[slot])
    }

    /// Replaces the supplied fields of the payer at `index`.
    ///
    /// Nothing is written when the index is rejected.
    pub fn edit_payer(&mut self, index: usize, update: PayerUpdate) -> Result<&Payer> {
        let mut payers = self.payer_list()?.clone();
        let slot = position(index, payers.len(), "payer")?;
        payers[slot].apply(update);
        let payers = self.commit_payers(payers)?;
        info!("Updated payer {}", index);
        Ok(&payers[slot])
    }

    /// Removes and returns the payee at `index`.
    pub fn delete_payee(&mut self, index: usize) -> Result<Payee> {
        let mut payees = self.payee_list()?.clone();
        let slot = position(index, payees.len(), "payee")?;
        let removed = payees.remove(slot);
        self.commit_payees(payees)?;
        info!("Deleted payee {} ({})", index, removed.name);
        Ok(removed)
    }

    /// Removes and returns the payer at `index`.
    pub fn delete_payer(&mut self, index: usize) -> Result<Payer> {
        let mut payers = self.payer_list()?.clone();
        let slot = position(index, payers.len(), "payer")?;
        let removed = payers.remove(slot);
        self.commit_payers(payers)?;
        info!("Deleted payer {} ({})", index, removed.name);
        Ok(removed)
    }

    /// Computes the TDS for a payment, appends its certificate to the ledger
    /// and returns the certificate.
    ///
    /// Rejects salary to a company payee, negative amounts and amounts too
    /// large to project to a year before any computation.
    pub fn make_payment(&mut self, request: PaymentRequest) -> Result<Certificate> {
        let payers = self.payer_list()?;
        let slot = position(request.payer, payers.len(), "payer")?;
        let payer = payers[slot].clone();

        let payees = self.payee_list()?;
        let slot = position(request.payee, payees.len(), "payee")?;
        let payee = payees[slot].clone();

        if !request.kind.allowed_for(payee.category) {
            return Err(EngineError::SalaryForCompany);
        }
        if request.gross.is_negative() || request.gross.checked_mul(12).is_none() {
            return Err(EngineError::InvalidAmount {
                value: request.gross.value().to_string(),
            });
        }

        let payment = Payment::new(payer, payee, request.kind, request.gross, request.date);
        let certificate = Certificate::from_payment(&payment)?;
        self.store.append_certificate(&certificate)?;

        info!(
            "{} issued to {} under section {}: deducted {}",
            certificate.form, certificate.payee_name, certificate.section, certificate.deducted
        );
        Ok(certificate)
    }

    /// The certificate ledger, or `None` when nothing has been recorded.
    pub fn certificates(&self) -> Option<String> {
        self.store.list_certificates()
    }

    fn payee_list(&mut self) -> Result<&mut Vec<Payee>> {
        if self.payees.is_none() {
            let payees = self.store.load_payees()?;
            debug!("Loaded {} payees", payees.len());
            self.payees = Some(payees);
        }
        Ok(self.payees.get_or_insert_with(Vec::new))
    }

    fn payer_list(&mut self) -> Result<&mut Vec<Payer>> {
        if self.payers.is_none() {
            let payers = self.store.load_payers()?;
            debug!("Loaded {} payers", payers.len());
            self.payers = Some(payers);
        }
        Ok(self.payers.get_or_insert_with(Vec::new))
    }

    fn commit_payees(&mut self, payees: Vec<Payee>) -> Result<&Vec<Payee>> {
        self.store.save_payees(&payees)?;
        Ok(&*self.payees.insert(payees))
    }

    fn commit_payers(&mut self, payers: Vec<Payer>) -> Result<&Vec<Payer>> {
        self.store.save_payers(&payers)?;
        Ok(&*self.payers.insert(payers))
    }
}

/// Converts a 1-based index into a vector slot.
fn position(index: usize, len: usize, entity: &'static str) -> Result<usize> {
    if len == 0 {
        return Err(EngineError::EmptyCollection { entity });
    }
    if index < 1 || index > len {
        return Err(EngineError::IndexOutOfRange { entity, index, len });
    }
    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorePaths;
    use crate::model::PayeeCategory;
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn engine(dir: &TempDir) -> TdsEngine {
        TdsEngine::new(RecordStore::new(StorePaths::new(dir.path())))
    }

    fn seeded(dir: &TempDir) -> TdsEngine {
        let mut engine = engine(dir);
        engine
            .add_payer(Payer::new("Acme Ltd", "AAACA1111A", "MUMA12345B"))
            .unwrap();
        engine
            .add_payer(Payer::new("Globex", "AAACG2222B", "DELG54321C"))
            .unwrap();
        engine
            .add_payee(Payee::new("Ravi", "ABCDE1234F", PayeeCategory::Individual))
            .unwrap();
        engine
            .add_payee(Payee::new("Infra Pvt Ltd", "AABCI9876K", PayeeCategory::Company))
            .unwrap();
        engine
            .add_payee(Payee::new("Meera", "FGHIJ5678K", PayeeCategory::Individual))
            .unwrap();
        engine
    }

    fn request(payer: usize, payee: usize, kind: PaymentType, gross: &str) -> PaymentRequest {
        PaymentRequest {
            payer,
            payee,
            kind,
            gross: Amount::from_str(gross).unwrap(),
            date: "2024-04-01".to_string(),
        }
    }

    #[test]
    fn test_added_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let mut before = seeded(&dir);
        let mut after = engine(&dir);
        assert_eq!(after.payees().unwrap(), before.payees().unwrap());
        assert_eq!(after.payers().unwrap(), before.payers().unwrap());
    }

    #[test]
    fn test_delete_shifts_later_payees_down() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        let removed = engine.delete_payee(2).unwrap();
        assert_eq!(removed.name, "Infra Pvt Ltd");

        let names: Vec<_> = engine.payees().unwrap().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ravi", "Meera"]);
        assert_eq!(self::engine(&dir).payees().unwrap(), engine.payees().unwrap());
    }

    #[test]
    fn test_edit_payee_replaces_given_fields() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        let edited = engine
            .edit_payee(
                1,
                PayeeUpdate {
                    name: Some("Ravi Kumar".to_string()),
                    category: Some(PayeeCategory::Company),
                    ..Default::default()
                },
            )
            .unwrap()
            .clone();
        assert_eq!(
            edited,
            Payee::new("Ravi Kumar", "ABCDE1234F", PayeeCategory::Company)
        );
        assert_eq!(self::engine(&dir).payees().unwrap()[0], edited);
    }

    #[test]
    fn test_edit_out_of_range_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);
        let path = dir.path().join("payers.txt");
        let before = fs::read(&path).unwrap();

        for index in [0, 3] {
            let err = engine
                .edit_payer(
                    index,
                    PayerUpdate {
                        name: Some("X".to_string()),
                        ..Default::default()
                    },
                )
                .unwrap_err();
            assert!(matches!(
                err,
                EngineError::IndexOutOfRange { entity: "payer", len: 2, .. }
            ));
        }

        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(engine.payers().unwrap()[0].name, "Acme Ltd");
    }

    #[test]
    fn test_empty_collection_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);

        assert!(matches!(
            engine.delete_payee(1),
            Err(EngineError::EmptyCollection { entity: "payee" })
        ));
        assert!(matches!(
            engine.edit_payer(1, PayerUpdate::default()),
            Err(EngineError::EmptyCollection { entity: "payer" })
        ));
        assert!(!dir.path().join("payees.txt").exists());
    }

    #[test]
    fn test_payment_appends_certificate() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        let cert = engine
            .make_payment(request(1, 1, PaymentType::Salary, "45000"))
            .unwrap();
        assert_eq!(cert.form.title(), "FORM 16");
        assert_eq!(cert.deducted.to_string(), "9000.00");
        assert_eq!(cert.payer_deductor_id, "MUMA12345B");

        assert_eq!(engine.certificates(), Some(cert.to_string()));
    }

    #[test]
    fn test_salary_to_company_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        assert!(matches!(
            engine.make_payment(request(1, 2, PaymentType::Salary, "45000")),
            Err(EngineError::SalaryForCompany)
        ));
        assert_eq!(engine.certificates(), None);
    }

    #[test]
    fn test_payment_validates_selection_and_amount() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        assert!(matches!(
            engine.make_payment(request(3, 1, PaymentType::Rent, "60000")),
            Err(EngineError::IndexOutOfRange { entity: "payer", .. })
        ));
        assert!(matches!(
            engine.make_payment(request(1, 4, PaymentType::Rent, "60000")),
            Err(EngineError::IndexOutOfRange { entity: "payee", .. })
        ));
        assert!(matches!(
            engine.make_payment(request(1, 1, PaymentType::Rent, "-1")),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_unprojectable_salary_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        let err = engine
            .make_payment(request(1, 1, PaymentType::Salary, "10000000000000000000000000000"))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount { .. }));
        assert_eq!(engine.certificates(), None);
    }

    #[test]
    fn test_failed_save_keeps_records() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);
        let before = engine.payees().unwrap().to_vec();
        // the temporary file cannot be created over a directory
        fs::create_dir(dir.path().join("payees.txt.tmp")).unwrap();

        let rename = PayeeUpdate {
            name: Some("Ravi Kumar".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            engine.edit_payee(1, rename),
            Err(EngineError::StoreUnavailable { .. })
        ));
        assert!(matches!(
            engine.delete_payee(2),
            Err(EngineError::StoreUnavailable { .. })
        ));
        assert!(matches!(
            engine.add_payee(Payee::new("Asha", "KLMNO4321P", PayeeCategory::Individual)),
            Err(EngineError::StoreUnavailable { .. })
        ));

        assert_eq!(engine.payees().unwrap(), before.as_slice());
        assert_eq!(self::engine(&dir).payees().unwrap(), before.as_slice());
    }

    #[test]
    fn test_bad_payee_file_does_not_block_payers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("payees.txt"), "Ravi,ABCDE1234F,9\n").unwrap();
        let mut engine = engine(&dir);

        engine
            .add_payer(Payer::new("Acme Ltd", "AAACA1111A", "MUMA12345B"))
            .unwrap();
        assert_eq!(engine.payers().unwrap().len(), 1);
        assert_eq!(engine.certificates(), None);

        assert!(matches!(
            engine.payees(),
            Err(EngineError::InvalidCategory { .. })
        ));
        assert!(matches!(
            engine.make_payment(request(1, 1, PaymentType::Rent, "60000")),
            Err(EngineError::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_payment_needs_payers() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        engine
            .add_payee(Payee::new("Ravi", "ABCDE1234F", PayeeCategory::Individual))
            .unwrap();

        assert!(matches!(
            engine.make_payment(request(1, 1, PaymentType::Rent, "60000")),
            Err(EngineError::EmptyCollection { entity: "payer" })
        ));
    }

    #[test]
    fn test_certificate_keeps_snapshot_after_edit() {
        let dir = TempDir::new().unwrap();
        let mut engine = seeded(&dir);

        let cert = engine
            .make_payment(request(1, 1, PaymentType::Contractor, "40000"))
            .unwrap();
        engine
            .edit_payee(
                1,
                PayeeUpdate {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let ledger = engine.certificates().unwrap();
        assert!(ledger.contains("Payee Name    : Ravi\n"));
        assert_eq!(cert.payee_name, "Ravi");
    }
}
