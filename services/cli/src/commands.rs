use crate::error::AppError;
use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use singlekey::{
    ApiResult, FormRequest, Landlord, Property, ScreeningOptions, SingleKeyClient, Tenant,
    WaitOptions,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// JSON file with `landlord`, `tenant` and optional `property` objects
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Override the tenant date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) tenant_dob: Option<NaiveDate>,
    /// Queue the screening instead of running it immediately
    #[arg(long)]
    pub(crate) defer: bool,
    /// The tenant pays for the screening
    #[arg(long)]
    pub(crate) tenant_pays: bool,
    /// Webhook URL notified when the report changes
    #[arg(long)]
    pub(crate) callback_url: Option<String>,
    /// Deal identifier from your CRM
    #[arg(long)]
    pub(crate) external_deal_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct FormArgs {
    #[arg(long)]
    pub(crate) landlord_first_name: String,
    #[arg(long)]
    pub(crate) landlord_last_name: String,
    #[arg(long)]
    pub(crate) landlord_email: String,
    #[arg(long)]
    pub(crate) landlord_phone: Option<String>,
    #[arg(long)]
    pub(crate) tenant_email: String,
    #[arg(long)]
    pub(crate) tenant_first_name: Option<String>,
    #[arg(long)]
    pub(crate) tenant_last_name: Option<String>,
    /// Property address; only sent together with --tenant-form
    #[arg(long)]
    pub(crate) property_address: Option<String>,
    /// Send the tenant straight to the application form
    #[arg(long)]
    pub(crate) tenant_form: bool,
    #[arg(long)]
    pub(crate) callback_url: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    pub(crate) purchase_token: String,
    /// Poll until the report has a SingleKey score
    #[arg(long)]
    pub(crate) wait: bool,
    /// Give up waiting after this many seconds
    #[arg(long, default_value_t = 300)]
    pub(crate) timeout_secs: u64,
    /// Seconds between polls while waiting
    #[arg(long, default_value_t = 10)]
    pub(crate) poll_secs: u64,
}

#[derive(Args, Debug)]
pub(crate) struct ApplicantArgs {
    pub(crate) purchase_token: String,
    #[arg(long)]
    pub(crate) detailed: bool,
    #[arg(long)]
    pub(crate) show_credit_score: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    pub(crate) screening_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct PdfArgs {
    pub(crate) purchase_token: String,
    #[arg(long, default_value = "screening_report.pdf")]
    pub(crate) output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ScreeningRequestFile {
    landlord: Landlord,
    tenant: Tenant,
    #[serde(default)]
    property: Option<Property>,
}

pub(crate) fn screen(client: &SingleKeyClient, args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        request,
        tenant_dob,
        defer,
        tenant_pays,
        callback_url,
        external_deal_id,
    } = args;

    let mut request = load_request(&request)?;
    if let Some(dob) = tenant_dob {
        request.tenant.date_of_birth = dob.into();
    }

    let options = ScreeningOptions {
        run_now: !defer,
        tenant_pays,
        callback_url,
        external_deal_id,
    };
    let result = client.create_screening(
        &request.landlord,
        &request.tenant,
        request.property.as_ref(),
        &options,
    )?;

    if let Some(token) = result.get("purchase_token").and_then(|value| value.as_str()) {
        info!(purchase_token = token, "screening created");
    }
    print_json(&result)
}

pub(crate) fn form(client: &SingleKeyClient, args: FormArgs) -> Result<(), AppError> {
    let landlord = Landlord {
        phone: args.landlord_phone,
        ..Landlord::new(
            args.landlord_first_name,
            args.landlord_last_name,
            args.landlord_email,
        )
    };
    let form = FormRequest {
        tenant_email: args.tenant_email,
        tenant_first_name: args.tenant_first_name,
        tenant_last_name: args.tenant_last_name,
        property_address: args.property_address,
        tenant_form: args.tenant_form,
        callback_url: args.callback_url,
    };

    let result = client.create_form_request(&landlord, &form)?;
    print_json(&result)
}

pub(crate) fn report(client: &SingleKeyClient, args: ReportArgs) -> Result<(), AppError> {
    let result = if args.wait {
        client.wait_for_report(
            &args.purchase_token,
            WaitOptions {
                timeout: Duration::from_secs(args.timeout_secs),
                poll_interval: Duration::from_secs(args.poll_secs),
            },
        )?
    } else {
        client.get_report(&args.purchase_token)?
    };
    print_json(&result)
}

pub(crate) fn applicant(client: &SingleKeyClient, args: ApplicantArgs) -> Result<(), AppError> {
    let result = client.get_applicant(
        &args.purchase_token,
        args.detailed,
        args.show_credit_score,
    )?;
    print_json(&result)
}

pub(crate) fn validate(client: &SingleKeyClient, args: ValidateArgs) -> Result<(), AppError> {
    let result = client.validate_screening(&args.screening_id)?;
    print_json(&result)
}

pub(crate) fn pdf(client: &SingleKeyClient, args: PdfArgs) -> Result<(), AppError> {
    let written = client.download_pdf(&args.purchase_token, &args.output)?;
    info!(bytes = written, "report PDF saved");
    println!("PDF saved to {}", args.output.display());
    Ok(())
}

fn load_request(path: &Path) -> Result<ScreeningRequestFile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json(result: &ApiResult) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
