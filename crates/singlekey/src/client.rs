use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::domain::{Landlord, Property, Tenant};
use crate::error::{Result, SingleKeyError};
use crate::payload::{self, FormRequest, Payload, ScreeningOptions};
use crate::polling::{self, ReportSource, WaitOptions};
use crate::response::{self, ApiResult};

/// PDF bodies are copied to disk in slices of this size.
pub const PDF_CHUNK_SIZE: usize = 8192;

/// Blocking client for the SingleKey screening API.
///
/// One request is in flight at a time; the underlying connection is reused
/// across sequential calls.
pub struct SingleKeyClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl SingleKeyClient {
    /// Production client with the default 30 second timeout.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_token))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Token {}", config.api_token))
            .map_err(|_| {
                SingleKeyError::Client(
                    "API token contains characters that cannot be sent in a header".to_string(),
                )
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| SingleKeyError::Client(format!("unable to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn create_screening(
        &self,
        landlord: &Landlord,
        tenant: &Tenant,
        property: Option<&Property>,
        options: &ScreeningOptions,
    ) -> Result<ApiResult> {
        let body = payload::screening_payload(landlord, tenant, property, options);
        self.request(Method::POST, "/api/request", Some(&body), &[])
    }

    pub fn create_form_request(&self, landlord: &Landlord, form: &FormRequest) -> Result<ApiResult> {
        let body = payload::form_payload(landlord, form);
        self.request(Method::POST, "/api/request", Some(&body), &[])
    }

    pub fn get_report(&self, purchase_token: &str) -> Result<ApiResult> {
        self.request(
            Method::GET,
            &format!("/api/report/{purchase_token}"),
            None,
            &[],
        )
    }

    pub fn get_applicant(
        &self,
        purchase_token: &str,
        detailed: bool,
        show_credit_score: bool,
    ) -> Result<ApiResult> {
        let mut query = Vec::new();
        if detailed {
            query.push(("detailed", "true"));
        }
        if show_credit_score {
            query.push(("show_credit_score", "true"));
        }

        self.request(
            Method::GET,
            &format!("/api/applicant/{purchase_token}"),
            None,
            &query,
        )
    }

    pub fn validate_screening(&self, screening_id: &str) -> Result<ApiResult> {
        self.request(
            Method::POST,
            &format!("/api/purchase_errors/{screening_id}"),
            None,
            &[],
        )
    }

    /// Streams the report PDF to `output_path` and returns the bytes written.
    ///
    /// Any status other than 200 fails before the file is opened. A stream
    /// failure after that point leaves the partially written file in place.
    pub fn download_pdf(&self, purchase_token: &str, output_path: impl AsRef<Path>) -> Result<u64> {
        let path = output_path.as_ref();
        let url = format!("{}/api/report_pdf/{purchase_token}", self.base_url);
        debug!(purchase_token, "downloading report PDF");

        let mut response = self.http.get(&url).send().map_err(SingleKeyError::from_transport)?;
        match response.status().as_u16() {
            200 => {}
            404 => return Err(SingleKeyError::NotFound("report not found".to_string())),
            status => {
                return Err(SingleKeyError::Client(format!(
                    "failed to download PDF: {status}"
                )))
            }
        }

        let io_error = |source| SingleKeyError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(io_error)?;
        let written = copy_in_chunks(&mut response, &mut file).map_err(|err| {
            warn!(path = %path.display(), "PDF download interrupted; partial file left on disk");
            match err {
                CopyError::Read(source) => {
                    SingleKeyError::Client(format!("PDF stream interrupted: {source}"))
                }
                CopyError::Write(source) => io_error(source),
            }
        })?;
        file.flush().map_err(io_error)?;

        Ok(written)
    }

    pub fn wait_for_report(&self, purchase_token: &str, options: WaitOptions) -> Result<ApiResult> {
        polling::wait_for_report(self, purchase_token, options)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Payload>,
        query: &[(&str, &str)],
    ) -> Result<ApiResult> {
        debug!(%method, path, "dispatching SingleKey request");

        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(body);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().map_err(SingleKeyError::from_transport)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(SingleKeyError::from_transport)?;
        response::classify(status, &bytes)
    }
}

impl std::fmt::Debug for SingleKeyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleKeyClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ReportSource for SingleKeyClient {
    fn fetch_report(&self, purchase_token: &str) -> Result<ApiResult> {
        self.get_report(purchase_token)
    }
}

enum CopyError {
    Read(std::io::Error),
    Write(std::io::Error),
}

fn copy_in_chunks<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> std::result::Result<u64, CopyError> {
    let mut buffer = [0u8; PDF_CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(written),
            Ok(read) => read,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(CopyError::Read(err)),
        };
        writer.write_all(&buffer[..read]).map_err(CopyError::Write)?;
        written += read as u64;
    }
}
