//! Forecast page
//!
//! Collects temperature, hour and date, checks them locally and asks the
//! backend for a single-hour load forecast. The returned figures are kept
//! exactly as the server sent them.

use super::{required, FormError};
use crate::api::{ForecastApi, ForecastRequest, ForecastResult};

/// Shown when the date is not `YYYY-MM-DD`
pub const DATE_FORMAT_MESSAGE: &str = "Please use the date picker or enter date as YYYY-MM-DD.";

const ISO_DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const DAY_FIRST_PATTERN: &str = r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$";

/// Editable inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastField {
    Temperature,
    Hour,
    Date,
}

/// Raw form input, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastForm {
    pub temperature: String,
    pub hour: String,
    pub date: String,
}

impl ForecastForm {
    /// Check the form and build the request
    ///
    /// The date is checked first, so a malformed date is always reported as
    /// such whatever the other fields hold.
    pub fn validate(&self) -> Result<ForecastRequest, FormError> {
        if !is_iso_date(&self.date) {
            return Err(FormError::InvalidDate);
        }

        let temperature = required(&self.temperature, "temperature")?
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or(FormError::InvalidTemperature)?;

        let hour = required(&self.hour, "hour")?
            .parse::<u8>()
            .ok()
            .filter(|h| *h <= 23)
            .ok_or(FormError::InvalidHour)?;

        Ok(ForecastRequest {
            temperature,
            hour,
            date: self.date.clone(),
        })
    }
}

fn is_iso_date(value: &str) -> bool {
    regex::Regex::new(ISO_DATE_PATTERN)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Rewrite `DD-MM-YYYY` as `YYYY-MM-DD`; anything else is returned unchanged
pub fn normalize_date(value: &str) -> String {
    let Ok(re) = regex::Regex::new(DAY_FIRST_PATTERN) else {
        return value.to_string();
    };

    match re.captures(value) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => value.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct ForecastPage {
    form: ForecastForm,
    result: Option<ForecastResult>,
    error: Option<String>,
    submitting: bool,
}

impl ForecastPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ForecastForm {
        &self.form
    }

    /// Update one input; dates typed day-first are reordered
    pub fn set_field(&mut self, field: ForecastField, value: &str) {
        match field {
            ForecastField::Temperature => self.form.temperature = value.to_string(),
            ForecastField::Hour => self.form.hour = value.to_string(),
            ForecastField::Date => self.form.date = normalize_date(value),
        }
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and post the forecast request
    ///
    /// Any previous result or error is cleared first. Invalid input sets a
    /// local message and sends nothing.
    pub async fn submit<A: ForecastApi + ?Sized>(&mut self, api: &A) {
        self.error = None;
        self.result = None;

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.submitting = true;
        let outcome = api.predict(&request).await;
        self.submitting = false;

        match outcome {
            Ok(result) => {
                tracing::debug!(date = %request.date, hour = request.hour, "Forecast received");
                self.result = Some(result);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
