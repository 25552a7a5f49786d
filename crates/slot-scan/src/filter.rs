use cowin::{Center, Session};
use tracing::debug;
use url::form_urlencoded;

use crate::scan_types::*;

/// Map search endpoint the center query is appended to
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Whether a session can be booked by the given age group and brand.
pub fn is_eligible(session: &Session, age_group: AgeGroup, brand: Option<VaccineBrand>) -> bool {
    session.min_age_limit == age_group.min_age_limit()
        && session.available_capacity > 0.0
        && brand.is_none_or(|brand| brand.matches(&session.vaccine))
}

/// Reduce the API centers to those with eligible sessions, sorted by name.
///
/// Fails with [`SlotError::EmptySource`] when the API returned no centers and with
/// [`SlotError::NoEligibleSlots`] when none of them has an eligible session.
pub fn filter_centers(
    centers: Vec<Center>,
    age_group: AgeGroup,
    brand: Option<VaccineBrand>,
) -> Result<Vec<FilteredCenter>, SlotError> {
    if centers.is_empty() {
        return Err(SlotError::EmptySource);
    }

    let total = centers.len();
    let mut filtered: Vec<FilteredCenter> = centers
        .into_iter()
        .filter_map(|center| project_center(center, age_group, brand))
        .collect();

    debug!(
        "{} of {} centers have {} sessions{}",
        filtered.len(),
        total,
        age_group,
        brand.map(|b| format!(" of {}", b)).unwrap_or_default()
    );

    if filtered.is_empty() {
        return Err(SlotError::NoEligibleSlots);
    }

    // sort_by is stable, so centers sharing a name keep their API order
    filtered.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(filtered)
}

fn project_center(
    center: Center,
    age_group: AgeGroup,
    brand: Option<VaccineBrand>,
) -> Option<FilteredCenter> {
    let sessions: Vec<FilteredSession> = center
        .sessions
        .into_iter()
        .filter(|session| is_eligible(session, age_group, brand))
        .map(FilteredSession::from)
        .collect();

    if sessions.is_empty() {
        return None;
    }

    let location = map_search_url(&center.name, center.address.as_deref(), center.pincode);

    Some(FilteredCenter {
        name: center.name,
        address: center.address,
        pincode: center.pincode,
        fee_type: center.fee_type,
        sessions,
        location,
        vaccine_fees: center.vaccine_fees,
    })
}

/// Build the map search link for a center.
///
/// The query joins the non-empty parts of name, address and pincode with single spaces
/// and is form-urlencoded, so spaces become `+`.
pub fn map_search_url(name: &str, address: Option<&str>, pincode: Option<u32>) -> String {
    let pincode = pincode.map(|p| p.to_string());
    let query = [Some(name), address, pincode.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{}&query={}", MAP_SEARCH_URL, encoded)
}
