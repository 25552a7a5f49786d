use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use cowin::{CowinError, DATE_FORMAT, LocationMode, Session, VaccineFee};
use notification_services::NotificationError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Age used when a request does not carry one
pub const DEFAULT_AGE: u32 = 18;

/// Eligibility bucket a requested age maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    /// Sessions with `min_age_limit == 18`
    EighteenPlus,
    /// Sessions with `min_age_limit == 45`
    FortyFivePlus,
}

impl AgeGroup {
    /// Bucket an age: anything below 45 is 18+, the rest is 45+.
    pub fn from_age(age: u32) -> Self {
        if age < 45 {
            AgeGroup::EighteenPlus
        } else {
            AgeGroup::FortyFivePlus
        }
    }

    /// The `min_age_limit` a session must carry to belong to this group.
    pub fn min_age_limit(self) -> u32 {
        match self {
            AgeGroup::EighteenPlus => 18,
            AgeGroup::FortyFivePlus => 45,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.min_age_limit())
    }
}

/// Vaccine brands the API reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VaccineBrand {
    /// `COVISHIELD`
    Covishield,
    /// `COVAXIN`
    Covaxin,
    /// `SPUTNIK V`
    SputnikV,
}

impl VaccineBrand {
    /// Name used by the API in `session.vaccine`
    pub fn api_name(self) -> &'static str {
        match self {
            VaccineBrand::Covishield => "COVISHIELD",
            VaccineBrand::Covaxin => "COVAXIN",
            VaccineBrand::SputnikV => "SPUTNIK V",
        }
    }

    /// Whether a session's vaccine field names this brand.
    pub fn matches(self, vaccine: &str) -> bool {
        vaccine.trim().eq_ignore_ascii_case(self.api_name())
    }
}

impl fmt::Display for VaccineBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for VaccineBrand {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COVISHIELD" => Ok(VaccineBrand::Covishield),
            "COVAXIN" => Ok(VaccineBrand::Covaxin),
            "SPUTNIK" | "SPUTNIK V" => Ok(VaccineBrand::SputnikV),
            _ => Err(SlotError::InvalidRequest(format!(
                "unknown vaccine '{}', expected one of covishield, covaxin, sputnik",
                s
            ))),
        }
    }
}

/// Request fields as delivered by a trigger, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RequestParams {
    /// Postal code to search
    #[serde(default)]
    pub pincode: Option<u32>,

    /// District to search
    #[serde(default, alias = "district_id")]
    pub district: Option<u32>,

    /// First day of the calendar week, `dd-mm-yyyy`
    #[serde(default)]
    pub date: Option<String>,

    /// Age of the person looking for a slot
    #[serde(default)]
    pub age: Option<u32>,

    /// Vaccine brand to restrict to
    #[serde(default, alias = "brand")]
    pub vaccine: Option<String>,

    /// Recipient overriding the configured one
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

impl RequestParams {
    /// Validate the fields and resolve defaults against `today`.
    pub fn into_spec(self, today: NaiveDate) -> Result<RequestSpec, SlotError> {
        self.validate()
            .map_err(|e| SlotError::InvalidRequest(e.to_string()))?;

        let location = match (self.pincode, self.district) {
            (Some(pincode), None) => LocationMode::Pincode(pincode),
            (None, Some(district)) => LocationMode::District(district),
            (None, None) => {
                return Err(SlotError::InvalidRequest(
                    "one of pincode or district is required".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(SlotError::InvalidRequest(
                    "pincode and district are mutually exclusive".to_string(),
                ));
            }
        };

        let date = match self.date.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
                SlotError::InvalidRequest(format!("date '{}' is not dd-mm-yyyy", raw))
            })?,
            None => today,
        };

        let vaccine = self
            .vaccine
            .as_deref()
            .map(VaccineBrand::from_str)
            .transpose()?;

        Ok(RequestSpec {
            location,
            date,
            age: self.age.unwrap_or(DEFAULT_AGE),
            vaccine,
            recipient: self.email,
        })
    }
}

impl TryFrom<RequestParams> for RequestSpec {
    type Error = SlotError;

    fn try_from(params: RequestParams) -> Result<Self, Self::Error> {
        params.into_spec(Local::now().date_naive())
    }
}

/// A validated slot check request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Pincode or district to search
    pub location: LocationMode,
    /// First day of the calendar week
    pub date: NaiveDate,
    /// Age of the person looking for a slot
    pub age: u32,
    /// Brand filter, if any
    pub vaccine: Option<VaccineBrand>,
    /// Recipient overriding the configured one
    pub recipient: Option<String>,
}

impl RequestSpec {
    /// Age bucket used to filter sessions.
    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }
}

/// A session that passed the eligibility filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSession {
    /// Session date, `dd-mm-yyyy`
    pub date: String,
    /// Doses still bookable, always positive
    pub available_capacity: f64,
    /// Vaccine administered
    pub vaccine: String,
}

impl From<Session> for FilteredSession {
    fn from(session: Session) -> Self {
        Self {
            date: session.date,
            available_capacity: session.available_capacity,
            vaccine: session.vaccine,
        }
    }
}

/// A center with at least one eligible session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCenter {
    /// Display name
    pub name: String,
    /// Street address, when the API reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Postal code
    pub pincode: Option<u32>,
    /// `Free` or `Paid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_type: Option<String>,
    /// Eligible sessions in API order
    pub sessions: Vec<FilteredSession>,
    /// Map search link for the center
    pub location: String,
    /// Per vaccine fees, empty when not reported
    pub vaccine_fees: Vec<VaccineFee>,
}

/// Custom error type for slot checks
#[derive(thiserror::Error, Debug)]
pub enum SlotError {
    /// The request could not be turned into a query
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The API answered with a non-success status
    #[error("Unable to fetch data: HTTP {status}")]
    Transport {
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response could not be parsed
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// The API returned no centers at all
    #[error("No centers found")]
    EmptySource,

    /// Centers were returned but none has an eligible session
    #[error("Vaccines unavailable")]
    NoEligibleSlots,

    /// Rendering or sending the notification failed
    #[error("Notification failed: {0}")]
    Notify(#[from] NotificationError),
}

impl From<CowinError> for SlotError {
    fn from(error: CowinError) -> Self {
        match error {
            CowinError::Transport { status } => SlotError::Transport { status },
            CowinError::Network(msg) | CowinError::Client(msg) => SlotError::Network(msg),
            CowinError::DataFormat(msg) => SlotError::DataFormat(msg),
        }
    }
}
