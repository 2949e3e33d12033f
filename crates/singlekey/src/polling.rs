use std::fmt::Debug;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::{Result, SingleKeyError};
use crate::response::{self, ApiResult};

/// Anything that can fetch the current state of a report.
pub trait ReportSource: Debug {
    fn fetch_report(&self, purchase_token: &str) -> Result<ApiResult>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// Polls `source` at a fixed interval until the report carries a score.
///
/// The deadline is checked before each attempt, so the call can overrun
/// `timeout` by up to one `poll_interval`. Fetch errors end the wait at once.
pub fn wait_for_report<S>(source: &S, purchase_token: &str, options: WaitOptions) -> Result<ApiResult>
where
    S: ReportSource + ?Sized,
{
    let started = Instant::now();

    while started.elapsed() < options.timeout {
        let report = source.fetch_report(purchase_token)?;
        if response::report_is_complete(&report) {
            return Ok(report);
        }

        let status = response::detail(&report).unwrap_or_else(|| "Processing...".to_string());
        info!(purchase_token, %status, "report not ready");
        thread::sleep(options.poll_interval);
    }

    Err(SingleKeyError::ReportTimeout {
        waited: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct ScriptedReports {
        responses: Mutex<Vec<Result<ApiResult>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedReports {
        fn new(responses: Vec<Result<ApiResult>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("calls mutex")
        }
    }

    impl ReportSource for ScriptedReports {
        fn fetch_report(&self, _purchase_token: &str) -> Result<ApiResult> {
            *self.calls.lock().expect("calls mutex") += 1;
            let mut responses = self.responses.lock().expect("responses mutex");
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                match responses.first() {
                    Some(Ok(report)) => Ok(report.clone()),
                    _ => Err(SingleKeyError::Client("script exhausted".to_string())),
                }
            }
        }
    }

    fn object(value: Value) -> ApiResult {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn quick(timeout_ms: u64, interval_ms: u64) -> WaitOptions {
        WaitOptions {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(interval_ms),
        }
    }

    #[test]
    fn defaults_match_five_minutes_every_ten_seconds() {
        let options = WaitOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(300));
        assert_eq!(options.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn returns_first_complete_report() {
        let source = ScriptedReports::new(vec![
            Ok(object(json!({"success": false, "detail": "Report is processing"}))),
            Ok(object(json!({"success": true, "singlekey_score": null}))),
            Ok(object(json!({"success": true, "singlekey_score": 742, "report_url": "https://r"}))),
        ]);

        let report = wait_for_report(&source, "tok", quick(2_000, 10)).expect("report completes");
        assert_eq!(report["singlekey_score"], json!(742));
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn times_out_after_one_interval_not_immediately() {
        let source = ScriptedReports::new(vec![Ok(object(json!({"success": true})))]);
        let options = quick(50, 150);

        let started = Instant::now();
        let err = wait_for_report(&source, "tok", options).expect_err("never completes");
        let elapsed = started.elapsed();

        assert_eq!(err.kind(), ErrorKind::Generic);
        assert!(matches!(err, SingleKeyError::ReportTimeout { .. }));
        assert!(elapsed >= options.timeout, "waited {elapsed:?}");
        assert!(elapsed >= options.poll_interval, "slept one interval: {elapsed:?}");
        assert!(
            elapsed < options.timeout + options.poll_interval + Duration::from_secs(1),
            "bounded by one extra interval: {elapsed:?}"
        );
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn fetch_errors_propagate_without_retry() {
        let source = ScriptedReports::new(vec![
            Err(SingleKeyError::NotFound("resource not found".to_string())),
            Ok(object(json!({"success": true, "singlekey_score": 700}))),
        ]);

        let err = wait_for_report(&source, "tok", quick(1_000, 10)).expect_err("not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn zero_timeout_fails_without_fetching() {
        let source = ScriptedReports::new(vec![Ok(object(json!({"success": true})))]);
        let err = wait_for_report(&source, "tok", quick(0, 10)).expect_err("no time to poll");
        assert!(matches!(err, SingleKeyError::ReportTimeout { .. }));
        assert_eq!(source.calls(), 0);
    }
}
