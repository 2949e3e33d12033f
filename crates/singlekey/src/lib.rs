//! Blocking client for the SingleKey tenant screening API.
//!
//! Build a [`SingleKeyClient`], submit a screening with landlord and tenant
//! details, then fetch or wait for the report:
//!
//! ```no_run
//! use singlekey::{Landlord, ScreeningOptions, SingleKeyClient, Tenant, TenantDateOfBirth, WaitOptions};
//!
//! # fn main() -> Result<(), singlekey::SingleKeyError> {
//! let client = SingleKeyClient::new("your_api_token")?;
//! let landlord = Landlord::new("John", "Smith", "john@example.com");
//! let tenant = Tenant {
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     email: "jane@example.com".into(),
//!     phone: "5551234567".into(),
//!     date_of_birth: TenantDateOfBirth { year: 1990, month: 6, day: 15 },
//!     address: "123 Main St, Toronto, ON, Canada, M5V 1A1".into(),
//!     national_id_number: "123456789".into(),
//!     external_id: None,
//!     middle_name: None,
//!     employer: None,
//!     job_title: None,
//!     annual_income: None,
//! };
//!
//! let created = client.create_screening(&landlord, &tenant, None, &ScreeningOptions::default())?;
//! if let Some(token) = created.get("purchase_token").and_then(|value| value.as_str()) {
//!     let report = client.wait_for_report(token, WaitOptions::default())?;
//!     println!("score: {}", report["singlekey_score"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod payload;
pub mod polling;
pub mod response;
pub mod telemetry;

pub use client::SingleKeyClient;
pub use config::{ClientConfig, ConfigError, Environment, TelemetryConfig};
pub use domain::{Landlord, Property, Tenant, TenantDateOfBirth};
pub use error::{ErrorKind, Result, SingleKeyError};
pub use payload::{FormRequest, ScreeningOptions};
pub use polling::{ReportSource, WaitOptions};
pub use response::ApiResult;
