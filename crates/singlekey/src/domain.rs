use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Landlord requesting the screening. Validation happens server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landlord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl Landlord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            external_id: None,
        }
    }
}

/// Calendar parts are passed through untouched; no validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDateOfBirth {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for TenantDateOfBirth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: TenantDateOfBirth,
    pub address: String,
    /// SIN in Canada, SSN in the USA.
    pub national_id_number: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub annual_income: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub address: String,
    #[serde(default)]
    pub rent: Option<u64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Property {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            rent: None,
            unit: None,
        }
    }
}
