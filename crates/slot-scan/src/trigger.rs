use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tracing::debug;

use crate::scan_types::{RequestParams, SlotError};

/// Decode a trigger event into request parameters.
///
/// The event is either the parameters object itself or a Pub/Sub style envelope whose
/// `data` field holds the base64 encoded JSON of that object.
pub fn params_from_event(event: Value) -> Result<RequestParams, SlotError> {
    let payload = match event.get("data") {
        Some(Value::String(data)) => {
            debug!("Decoding base64 event payload");
            decode_data(data)?
        }
        Some(_) => {
            return Err(SlotError::InvalidRequest(
                "event data must be a base64 string".to_string(),
            ));
        }
        None => event,
    };

    if !payload.is_object() {
        return Err(SlotError::InvalidRequest(
            "event payload must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(payload)
        .map_err(|e| SlotError::InvalidRequest(format!("invalid event payload: {}", e)))
}

/// Parse a raw JSON event, as passed on the command line.
pub fn params_from_event_str(raw: &str) -> Result<RequestParams, SlotError> {
    let event: Value = serde_json::from_str(raw)
        .map_err(|e| SlotError::InvalidRequest(format!("event is not JSON: {}", e)))?;
    params_from_event(event)
}

fn decode_data(data: &str) -> Result<Value, SlotError> {
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| SlotError::InvalidRequest(format!("event data is not base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| SlotError::InvalidRequest(format!("event data is not JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_event() {
        let params = params_from_event(json!({
            "district": 294,
            "age": 30,
            "vaccine": "covaxin"
        }))
        .unwrap();

        assert_eq!(params.district, Some(294));
        assert_eq!(params.age, Some(30));
        assert_eq!(params.vaccine.as_deref(), Some("covaxin"));
        assert_eq!(params.pincode, None);
    }

    #[test]
    fn test_field_aliases() {
        let params = params_from_event(json!({"district_id": 5, "brand": "covishield"})).unwrap();
        assert_eq!(params.district, Some(5));
        assert_eq!(params.vaccine.as_deref(), Some("covishield"));
    }

    #[test]
    fn test_base64_envelope() {
        let inner = json!({"pincode": 110001, "date": "10-05-2021"}).to_string();
        let event = json!({ "data": STANDARD.encode(inner) });

        let params = params_from_event(event).unwrap();
        assert_eq!(params.pincode, Some(110001));
        assert_eq!(params.date.as_deref(), Some("10-05-2021"));
    }

    #[test]
    fn test_invalid_events() {
        assert!(matches!(
            params_from_event(json!({"data": "%%%"})),
            Err(SlotError::InvalidRequest(_))
        ));
        assert!(matches!(
            params_from_event(json!({"data": STANDARD.encode("not json")})),
            Err(SlotError::InvalidRequest(_))
        ));
        assert!(matches!(
            params_from_event(json!({"data": 42})),
            Err(SlotError::InvalidRequest(_))
        ));
        assert!(matches!(
            params_from_event(json!([1, 2])),
            Err(SlotError::InvalidRequest(_))
        ));
        assert!(matches!(
            params_from_event(json!({"pincode": "abc"})),
            Err(SlotError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_event_str() {
        let params = params_from_event_str(r#"{"pincode": 560001}"#).unwrap();
        assert_eq!(params.pincode, Some(560001));

        assert!(matches!(
            params_from_event_str("{not json"),
            Err(SlotError::InvalidRequest(_))
        ));
    }
}
