use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format expected by the calendar endpoints (`dd-mm-yyyy`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Where to look for vaccination centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMode {
    /// Six digit postal code
    Pincode(u32),
    /// CoWIN district identifier
    District(u32),
}

/// The two calendar endpoints exposed by the public API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `calendarByDistrict`
    ByDistrict,
    /// `calendarByPin`
    ByPincode,
}

impl Endpoint {
    /// Path of the endpoint relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ByDistrict => "/v2/appointment/sessions/public/calendarByDistrict",
            Endpoint::ByPincode => "/v2/appointment/sessions/public/calendarByPin",
        }
    }
}

/// A fully built calendar query: which endpoint to hit and with which parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    /// Endpoint to call
    pub endpoint: Endpoint,
    /// Query string parameters, in the order they are sent
    pub params: Vec<(&'static str, String)>,
}

impl CalendarQuery {
    /// Build the query for a location and the first day of the calendar week.
    pub fn from_location(location: LocationMode, date: NaiveDate) -> Self {
        let date = date.format(DATE_FORMAT).to_string();

        match location {
            LocationMode::District(district_id) => Self {
                endpoint: Endpoint::ByDistrict,
                params: vec![("district_id", district_id.to_string()), ("date", date)],
            },
            LocationMode::Pincode(pincode) => Self {
                endpoint: Endpoint::ByPincode,
                params: vec![("pincode", pincode.to_string()), ("date", date)],
            },
        }
    }

    /// Look up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 9).unwrap()
    }

    #[test]
    fn test_district_query() {
        let query = CalendarQuery::from_location(LocationMode::District(294), date());

        assert_eq!(query.endpoint, Endpoint::ByDistrict);
        assert_eq!(query.param("district_id"), Some("294"));
        assert_eq!(query.param("date"), Some("09-05-2021"));
        assert_eq!(query.param("pincode"), None);
    }

    #[test]
    fn test_pincode_query() {
        let query = CalendarQuery::from_location(LocationMode::Pincode(110001), date());

        assert_eq!(query.endpoint, Endpoint::ByPincode);
        assert_eq!(query.param("pincode"), Some("110001"));
        assert_eq!(query.param("date"), Some("09-05-2021"));
        assert_eq!(query.param("district_id"), None);
    }

    #[test]
    fn test_endpoint_paths() {
        assert!(Endpoint::ByDistrict.path().ends_with("calendarByDistrict"));
        assert!(Endpoint::ByPincode.path().ends_with("calendarByPin"));
    }
}
