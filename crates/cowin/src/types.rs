use serde::{Deserialize, Deserializer, Serialize};

/// Response structure from the calendar endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarResponse {
    /// Centers reporting sessions for the requested week. Absent when the API has no data.
    #[serde(default, deserialize_with = "null_as_default")]
    pub centers: Vec<Center>,
}

/// A vaccination center as reported by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Center {
    /// API identifier of the center
    pub center_id: Option<u64>,

    /// Display name of the center
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Street address
    pub address: Option<String>,

    /// State the center belongs to
    pub state_name: Option<String>,

    /// District the center belongs to
    pub district_name: Option<String>,

    /// Block the center belongs to
    pub block_name: Option<String>,

    /// Postal code of the center
    pub pincode: Option<u32>,

    /// `Free` or `Paid`
    pub fee_type: Option<String>,

    /// Sessions offered by the center; a missing field means none
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<Session>,

    /// Per vaccine fees for paid centers
    #[serde(default, deserialize_with = "null_as_default")]
    pub vaccine_fees: Vec<VaccineFee>,
}

/// A bookable session at a center
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// API identifier of the session
    pub session_id: Option<String>,

    /// Session date, `dd-mm-yyyy`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    /// Minimum age accepted by the session
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_age_limit: u32,

    /// Number of doses still bookable. Kept as sent, fractions included.
    #[serde(default, deserialize_with = "deserialize_capacity")]
    pub available_capacity: f64,

    /// Vaccine administered, e.g. `COVISHIELD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub vaccine: String,

    /// Time slots, e.g. `09:00AM-11:00AM`
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: Vec<String>,
}

/// Fee charged for a vaccine at a paid center
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineFee {
    /// Vaccine name
    #[serde(default, deserialize_with = "null_as_default")]
    pub vaccine: String,

    /// Fee in rupees, as sent by the API
    #[serde(default, deserialize_with = "null_as_default")]
    pub fee: String,
}

// Missing and `null` fields both read as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// The API has sent capacities both as integers and as floats.
fn deserialize_capacity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_response() {
        let body = serde_json::json!({
            "centers": [{
                "center_id": 1234,
                "name": "District General Hospital",
                "address": "45 M G Road",
                "state_name": "Maharashtra",
                "district_name": "Satara",
                "block_name": "Jaoli",
                "pincode": 413608,
                "lat": 28,
                "long": 77,
                "from": "09:00:00",
                "to": "18:00:00",
                "fee_type": "Paid",
                "vaccine_fees": [{"vaccine": "COVISHIELD", "fee": "250"}],
                "sessions": [{
                    "session_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                    "date": "31-05-2021",
                    "available_capacity": 50,
                    "min_age_limit": 18,
                    "vaccine": "COVISHIELD",
                    "slots": ["FORENOON", "AFTERNOON"]
                }]
            }]
        });

        let response: CalendarResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.centers.len(), 1);

        let center = &response.centers[0];
        assert_eq!(center.center_id, Some(1234));
        assert_eq!(center.pincode, Some(413608));
        assert_eq!(center.fee_type.as_deref(), Some("Paid"));
        assert_eq!(center.vaccine_fees[0].fee, "250");
        assert_eq!(center.sessions[0].available_capacity, 50.0);
        assert_eq!(center.sessions[0].slots.len(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let body = serde_json::json!({
            "centers": [{"name": "Bare Clinic", "pincode": 110001}]
        });

        let response: CalendarResponse = serde_json::from_value(body).unwrap();
        let center = &response.centers[0];
        assert!(center.sessions.is_empty());
        assert!(center.vaccine_fees.is_empty());
        assert!(center.address.is_none());
    }

    #[test]
    fn test_missing_centers_is_empty() {
        let response: CalendarResponse = serde_json::from_str("{}").unwrap();
        assert!(response.centers.is_empty());
    }

    #[test]
    fn test_float_capacity() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "date": "01-06-2021",
            "min_age_limit": 45,
            "available_capacity": 12.7,
            "vaccine": "COVAXIN"
        }))
        .unwrap();
        assert_eq!(session.available_capacity, 12.7);

        let session: Session = serde_json::from_value(serde_json::json!({
            "available_capacity": 0.5
        }))
        .unwrap();
        assert_eq!(session.available_capacity, 0.5);

        let session: Session = serde_json::from_value(serde_json::json!({
            "available_capacity": -3
        }))
        .unwrap();
        assert_eq!(session.available_capacity, 0.0);
    }

    #[test]
    fn test_null_fields_keep_other_centers() {
        let body = serde_json::json!({
            "centers": [
                {
                    "name": "Good Clinic",
                    "pincode": 110001,
                    "sessions": [{
                        "date": "10-05-2021",
                        "min_age_limit": 18,
                        "available_capacity": 5,
                        "vaccine": "COVAXIN"
                    }]
                },
                {
                    "name": null,
                    "pincode": null,
                    "vaccine_fees": null,
                    "sessions": [{
                        "date": null,
                        "min_age_limit": null,
                        "available_capacity": null,
                        "vaccine": null,
                        "slots": null
                    }]
                },
                {"name": "No Sessions", "sessions": null}
            ]
        });

        let response: CalendarResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.centers.len(), 3);
        assert_eq!(response.centers[0].sessions[0].min_age_limit, 18);

        let nulls = &response.centers[1];
        assert_eq!(nulls.name, "");
        assert!(nulls.vaccine_fees.is_empty());
        let session = &nulls.sessions[0];
        assert_eq!(session.min_age_limit, 0);
        assert_eq!(session.available_capacity, 0.0);
        assert_eq!(session.vaccine, "");
        assert!(session.slots.is_empty());

        assert!(response.centers[2].sessions.is_empty());

        let response: CalendarResponse =
            serde_json::from_value(serde_json::json!({"centers": null})).unwrap();
        assert!(response.centers.is_empty());
    }
}
