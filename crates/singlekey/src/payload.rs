//! Flat request bodies for `POST /api/request`.
//!
//! Landlord fields carry an `ll_` prefix, tenant fields `ten_` and property
//! fields `purchase_`. Optional values are only written when truthy, so an
//! empty string or a zero amount is left out the same way `None` is.

use serde_json::{Map, Value};

use crate::domain::{Landlord, Property, Tenant};

pub type Payload = Map<String, Value>;

/// Flags for [`crate::SingleKeyClient::create_screening`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningOptions {
    pub run_now: bool,
    pub tenant_pays: bool,
    pub callback_url: Option<String>,
    pub external_deal_id: Option<String>,
}

impl Default for ScreeningOptions {
    fn default() -> Self {
        Self {
            run_now: true,
            tenant_pays: false,
            callback_url: None,
            external_deal_id: None,
        }
    }
}

/// Lightweight request where the tenant fills in their own details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRequest {
    pub tenant_email: String,
    pub tenant_first_name: Option<String>,
    pub tenant_last_name: Option<String>,
    /// Only sent when `tenant_form` is set.
    pub property_address: Option<String>,
    pub tenant_form: bool,
    pub callback_url: Option<String>,
}

impl FormRequest {
    pub fn new(tenant_email: impl Into<String>) -> Self {
        Self {
            tenant_email: tenant_email.into(),
            ..Self::default()
        }
    }
}

pub fn screening_payload(
    landlord: &Landlord,
    tenant: &Tenant,
    property: Option<&Property>,
    options: &ScreeningOptions,
) -> Payload {
    let mut payload = Payload::new();
    payload.insert(
        "external_customer_id".into(),
        Value::from(customer_id(landlord)),
    );
    payload.insert(
        "external_tenant_id".into(),
        Value::from(match text(&tenant.external_id) {
            Some(id) => id.to_string(),
            None => format!("tn-{}", tenant.email),
        }),
    );
    payload.insert("run_now".into(), Value::Bool(options.run_now));
    payload.insert("tenant_pays".into(), Value::Bool(options.tenant_pays));

    insert_landlord(&mut payload, landlord);

    payload.insert("ten_first_name".into(), Value::from(tenant.first_name.as_str()));
    payload.insert("ten_last_name".into(), Value::from(tenant.last_name.as_str()));
    payload.insert("ten_email".into(), Value::from(tenant.email.as_str()));
    payload.insert("ten_tel".into(), Value::from(tenant.phone.as_str()));
    payload.insert("ten_dob_year".into(), Value::from(tenant.date_of_birth.year));
    payload.insert("ten_dob_month".into(), Value::from(tenant.date_of_birth.month));
    payload.insert("ten_dob_day".into(), Value::from(tenant.date_of_birth.day));
    payload.insert("ten_address".into(), Value::from(tenant.address.as_str()));
    payload.insert("ten_sin".into(), Value::from(tenant.national_id_number.as_str()));

    insert_text(&mut payload, "ten_middle_name", &tenant.middle_name);
    insert_text(&mut payload, "ten_employer", &tenant.employer);
    insert_text(&mut payload, "ten_job_title", &tenant.job_title);
    insert_amount(&mut payload, "ten_annual_income", tenant.annual_income);

    if let Some(property) = property {
        payload.insert(
            "purchase_address".into(),
            Value::from(property.address.as_str()),
        );
        insert_amount(&mut payload, "purchase_rent", property.rent);
        insert_text(&mut payload, "purchase_unit", &property.unit);
    }

    insert_text(&mut payload, "callback_url", &options.callback_url);
    insert_text(&mut payload, "external_deal_id", &options.external_deal_id);

    payload
}

pub fn form_payload(landlord: &Landlord, form: &FormRequest) -> Payload {
    let mut payload = Payload::new();
    payload.insert(
        "external_customer_id".into(),
        Value::from(customer_id(landlord)),
    );
    payload.insert(
        "external_tenant_id".into(),
        Value::from(format!("tn-{}", form.tenant_email)),
    );

    insert_landlord(&mut payload, landlord);
    payload.insert("ten_email".into(), Value::from(form.tenant_email.as_str()));

    insert_text(&mut payload, "ten_first_name", &form.tenant_first_name);
    insert_text(&mut payload, "ten_last_name", &form.tenant_last_name);

    if form.tenant_form {
        payload.insert("tenant_form".into(), Value::Bool(true));
        insert_text(&mut payload, "purchase_address", &form.property_address);
    }

    insert_text(&mut payload, "callback_url", &form.callback_url);

    payload
}

fn customer_id(landlord: &Landlord) -> String {
    match text(&landlord.external_id) {
        Some(id) => id.to_string(),
        None => format!("ll-{}", landlord.email),
    }
}

fn insert_landlord(payload: &mut Payload, landlord: &Landlord) {
    payload.insert("ll_first_name".into(), Value::from(landlord.first_name.as_str()));
    payload.insert("ll_last_name".into(), Value::from(landlord.last_name.as_str()));
    payload.insert("ll_email".into(), Value::from(landlord.email.as_str()));
    insert_text(payload, "ll_tel", &landlord.phone);
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn insert_text(payload: &mut Payload, key: &str, value: &Option<String>) {
    if let Some(value) = text(value) {
        payload.insert(key.to_string(), Value::from(value));
    }
}

fn insert_amount(payload: &mut Payload, key: &str, value: Option<u64>) {
    if let Some(value) = value.filter(|amount| *amount != 0) {
        payload.insert(key.to_string(), Value::from(value));
    }
}
