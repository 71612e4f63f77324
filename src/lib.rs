//! # TDS Engine
//!
//! Computes tax deducted at source (TDS) on payments, issues the matching
//! Form 16 / 16A / 16C certificate, and keeps payee and payer records in
//! plain-text files.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: amounts are `rust_decimal` values, rounded to 2
//!   places only when displayed
//! - **Pure rules**: the rate table and certificate generator do no I/O
//! - **Checked enums**: stored category and type indices are validated
//! - **Owned state**: collections live in [`TdsEngine`], loaded on first use;
//!   every mutation is saved before it is kept
//!
//! ## Example
//!
//! ```no_run
//! use std::str::FromStr;
//! use tds_engine::{
//!     Amount, Payee, PayeeCategory, Payer, PaymentRequest, PaymentType, RecordStore,
//!     StorePaths, TdsEngine,
//! };
//!
//! let store = RecordStore::new(StorePaths::from_env());
//! let mut engine = TdsEngine::new(store);
//! engine.add_payer(Payer::new("Acme Ltd", "AAACA1111A", "MUMA12345B")).unwrap();
//! engine.add_payee(Payee::new("Ravi", "ABCDE1234F", PayeeCategory::Individual)).unwrap();
//!
//! let certificate = engine
//!     .make_payment(PaymentRequest {
//!         payer: 1,
//!         payee: 1,
//!         kind: PaymentType::Professional,
//!         gross: Amount::from_str("50000").unwrap(),
//!         date: "2024-04-01".to_string(),
//!     })
//!     .unwrap();
//! print!("{}", certificate);
//! ```

pub mod certificate;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod model;
pub mod payment;
pub mod rules;
pub mod store;

pub use certificate::{AmountLines, Certificate, FormType};
pub use config::StorePaths;
pub use decimal::Amount;
pub use engine::{PaymentRequest, TdsEngine};
pub use error::{EngineError, Result};
pub use model::{Payee, PayeeCategory, PayeeUpdate, Payer, PayerUpdate, PaymentType};
pub use payment::Payment;
pub use rules::{compute_tds, compute_tds_for_index, TdsComputation};
pub use store::RecordStore;
