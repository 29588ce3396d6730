use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;
use crate::{TripError, TripResult};

fn require(ok: bool, msg: &str) -> TripResult<()> {
    if ok {
        Ok(())
    } else {
        Err(TripError::validation(msg))
    }
}

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero value of Go's `time.Time`.
const GO_ZERO_TIME_SECS: i64 = -62_135_596_800;

/// A timestamp is set when present and not one of the zero sentinels
/// (Go's zero time or the Unix epoch).
fn is_set(t: &Option<DateTime<Utc>>) -> bool {
    match t {
        Some(t) => {
            let secs = t.timestamp();
            t.timestamp_subsec_nanos() != 0 || (secs != 0 && secs != GO_ZERO_TIME_SECS)
        }
        None => false,
    }
}

fn names_valid(names: &[String], empty_list: &str, empty_entry: &str) -> TripResult<()> {
    require(!names.is_empty(), empty_list)?;
    for name in names {
        require(!name.is_empty(), empty_entry)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFlightRequest {
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub passengers: Vec<String>,
}

impl BookFlightRequest {
    pub fn validate(&self) -> TripResult<()> {
        require(!self.airline.is_empty(), "invalid airline")?;
        require(!self.flight_number.is_empty(), "invalid flight number")?;
        require(is_set(&self.time), "invalid flight time")?;
        names_valid(&self.passengers, "invalid passengers", "invalid passenger name")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightConfirmation {
    #[serde(rename = "ref")]
    pub reference: String,
    pub flight: BookFlightRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookHotelRequest {
    #[serde(default)]
    pub hotel: String,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub guests: i32,
}

impl BookHotelRequest {
    pub fn validate(&self) -> TripResult<()> {
        require(!self.hotel.is_empty(), "invalid hotel")?;
        require(is_set(&self.check_in), "invalid check in")?;
        require(is_set(&self.check_out), "invalid check out")?;
        require(!self.name.is_empty(), "invalid name")?;
        require(self.guests > 0, "invalid number of guests")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelConfirmation {
    #[serde(rename = "ref")]
    pub reference: String,
    pub hotel: BookHotelRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCarRentalRequest {
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub pick_up: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pick_up_location: String,
    #[serde(default)]
    pub drop_off: Option<DateTime<Utc>>,
    #[serde(default)]
    pub drop_off_location: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vehicle_class: String,
}

impl BookCarRentalRequest {
    pub fn validate(&self) -> TripResult<()> {
        require(!self.agent.is_empty(), "invalid agent")?;
        require(is_set(&self.pick_up), "invalid pick up")?;
        require(!self.pick_up_location.is_empty(), "invalid pick up location")?;
        require(is_set(&self.drop_off), "invalid drop off")?;
        require(!self.drop_off_location.is_empty(), "invalid drop off location")?;
        require(!self.name.is_empty(), "invalid name")?;
        require(!self.vehicle_class.is_empty(), "invalid vehicle class")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRentalConfirmation {
    #[serde(rename = "ref")]
    pub reference: String,
    pub car_rental: BookCarRentalRequest,
}

/// A composite booking request: trip details plus up to three sub-requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripBookingRequest {
    /// Organizer name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub trip_name: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<BookFlightRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<BookHotelRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<BookCarRentalRequest>,
}

impl TripBookingRequest {
    pub fn validate(&self) -> TripResult<()> {
        require(!self.name.is_empty(), "invalid name")?;
        require(!self.destination.is_empty(), "invalid destination")?;
        require(is_set(&self.start), "invalid start date")?;
        require(is_set(&self.end), "invalid end date")?;
        names_valid(&self.members, "invalid members", "invalid member name")?;

        if let Some(flight) = &self.flight {
            flight.validate()?;
        }
        if let Some(hotel) = &self.hotel {
            hotel.validate()?;
        }
        if let Some(car) = &self.car {
            car.validate()?;
        }
        Ok(())
    }

    /// Copy of the request without its sub-requests. Once the sub-bookings
    /// are committed the downstream references are authoritative.
    pub fn without_sub_requests(&self) -> TripBookingRequest {
        TripBookingRequest {
            flight: None,
            hotel: None,
            car: None,
            ..self.clone()
        }
    }

    pub fn has_sub_requests(&self) -> bool {
        self.flight.is_some() || self.hotel.is_some() || self.car.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBookingRef {
    pub kind: ResourceKind,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// The orchestrator's persisted summary of a trip. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "ref")]
    pub reference: String,
    pub created: DateTime<Utc>,
    pub request: TripBookingRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_ref: Option<String>,
}

impl TripRecord {
    pub fn new(reference: String, request: TripBookingRequest) -> Self {
        Self {
            reference,
            created: Utc::now(),
            request: request.without_sub_requests(),
            flight_ref: None,
            hotel_ref: None,
            car_ref: None,
        }
    }

    /// Stored reference for `kind`, ignoring empty strings.
    pub fn sub_ref(&self, kind: ResourceKind) -> Option<&str> {
        let slot = match kind {
            ResourceKind::Flight => &self.flight_ref,
            ResourceKind::Hotel => &self.hotel_ref,
            ResourceKind::Car => &self.car_ref,
        };
        slot.as_deref().filter(|r| !r.is_empty())
    }

    pub fn set_sub_ref(&mut self, kind: ResourceKind, reference: String) {
        let slot = match kind {
            ResourceKind::Flight => &mut self.flight_ref,
            ResourceKind::Hotel => &mut self.hotel_ref,
            ResourceKind::Car => &mut self.car_ref,
        };
        *slot = Some(reference);
    }

    /// Sub-references in booking order.
    pub fn sub_refs(&self) -> Vec<SubBookingRef> {
        ResourceKind::BOOKING_ORDER
            .iter()
            .filter_map(|kind| {
                self.sub_ref(*kind).map(|r| SubBookingRef {
                    kind: *kind,
                    reference: r.to_string(),
                })
            })
            .collect()
    }
}

/// Response-only view of a trip. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConfirmation {
    #[serde(rename = "ref")]
    pub reference: String,
    pub trip: TripBookingRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_confirmation: Option<FlightConfirmation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_confirmation: Option<HotelConfirmation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_rental_confirmation: Option<CarRentalConfirmation>,
}

impl TripConfirmation {
    pub fn new(reference: String, trip: TripBookingRequest) -> Self {
        Self {
            reference,
            trip,
            flight_confirmation: None,
            hotel_confirmation: None,
            car_rental_confirmation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trip() -> TripBookingRequest {
        TripBookingRequest {
            name: "Ada".to_string(),
            trip_name: "Offsite".to_string(),
            destination: "Lisbon".to_string(),
            start: Some(Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).unwrap()),
            members: vec!["Ada".to_string(), "Grace".to_string()],
            flight: None,
            hotel: None,
            car: None,
        }
    }

    fn flight() -> BookFlightRequest {
        BookFlightRequest {
            airline: "TP".to_string(),
            flight_number: "TP1351".to_string(),
            time: Some(Utc.with_ymd_and_hms(2026, 5, 1, 7, 30, 0).unwrap()),
            passengers: vec!["Ada".to_string()],
        }
    }

    #[test]
    fn test_trip_validation_checks_fields_in_order() {
        assert!(trip().validate().is_ok());

        let mut req = trip();
        req.name.clear();
        req.destination.clear();
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid name");

        let mut req = trip();
        req.end = None;
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid end date");

        let mut req = trip();
        req.members.clear();
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid members");

        let mut req = trip();
        req.members.push(String::new());
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid member name");
    }

    #[test]
    fn test_sub_requests_are_validated() {
        let mut req = trip();
        let mut f = flight();
        f.passengers = vec![String::new()];
        req.flight = Some(f);
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid passenger name");

        let mut req = trip();
        req.hotel = Some(BookHotelRequest {
            hotel: "Palacio".to_string(),
            check_in: req.start,
            check_out: req.end,
            name: "Ada".to_string(),
            guests: 0,
        });
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid number of guests");

        let mut req = trip();
        req.car = Some(BookCarRentalRequest {
            agent: "Hertz".to_string(),
            pick_up: req.start,
            pick_up_location: "LIS".to_string(),
            drop_off: req.end,
            drop_off_location: String::new(),
            name: "Ada".to_string(),
            vehicle_class: "compact".to_string(),
        });
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid drop off location");
    }

    #[test]
    fn test_missing_timestamp_deserializes_as_unset() {
        let json = r#"{"name":"Ada","destination":"Lisbon","members":["Ada"],"end":"2026-05-04T18:00:00Z"}"#;
        let req: TripBookingRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(req.start.is_none());
        assert_eq!(req.validate().unwrap_err().to_string(), "invalid start date");
    }

    const GO_ZERO: &str = "0001-01-01T00:00:00Z";

    fn trip_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Ada",
            "destination": "Lisbon",
            "start": "2026-05-01T09:00:00Z",
            "end": "2026-05-04T18:00:00Z",
            "members": ["Ada"]
        })
    }

    fn validation_message(value: serde_json::Value) -> String {
        let req: TripBookingRequest = serde_json::from_value(value).expect("Failed to deserialize");
        req.validate().unwrap_err().to_string()
    }

    #[test]
    fn test_zero_trip_timestamps_are_unset() {
        let mut value = trip_json();
        value["start"] = GO_ZERO.into();
        assert_eq!(validation_message(value), "invalid start date");

        let mut value = trip_json();
        value["end"] = "1970-01-01T00:00:00Z".into();
        assert_eq!(validation_message(value), "invalid end date");
    }

    #[test]
    fn test_zero_flight_time_is_unset() {
        let mut value = trip_json();
        value["flight"] = serde_json::json!({
            "airline": "TP",
            "flight_number": "TP1351",
            "time": GO_ZERO,
            "passengers": ["Ada"]
        });
        assert_eq!(validation_message(value), "invalid flight time");
    }

    #[test]
    fn test_zero_hotel_dates_are_unset() {
        let hotel = |check_in: &str, check_out: &str| serde_json::json!({
            "hotel": "Palacio",
            "check_in": check_in,
            "check_out": check_out,
            "name": "Ada",
            "guests": 2
        });

        let mut value = trip_json();
        value["hotel"] = hotel(GO_ZERO, "2026-05-04T11:00:00Z");
        assert_eq!(validation_message(value), "invalid check in");

        let mut value = trip_json();
        value["hotel"] = hotel("2026-05-01T15:00:00Z", GO_ZERO);
        assert_eq!(validation_message(value), "invalid check out");
    }

    #[test]
    fn test_zero_car_times_are_unset() {
        let car = |pick_up: &str, drop_off: &str| serde_json::json!({
            "agent": "Hertz",
            "pick_up": pick_up,
            "pick_up_location": "LIS",
            "drop_off": drop_off,
            "drop_off_location": "LIS",
            "name": "Ada",
            "vehicle_class": "compact"
        });

        let mut value = trip_json();
        value["car"] = car(GO_ZERO, "2026-05-04T11:00:00Z");
        assert_eq!(validation_message(value), "invalid pick up");

        let mut value = trip_json();
        value["car"] = car("2026-05-01T10:00:00Z", GO_ZERO);
        assert_eq!(validation_message(value), "invalid drop off");
    }

    #[test]
    fn test_real_timestamps_are_set() {
        assert!(is_set(&Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 1).unwrap())));
        assert!(is_set(&Some(Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap())));
        assert!(!is_set(&Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap())));
        assert!(!is_set(&None));
        assert!(trip().validate().is_ok());
    }

    #[test]
    fn test_record_strips_sub_requests() {
        let mut req = trip();
        req.flight = Some(flight());
        let mut record = TripRecord::new("TRIP1".to_string(), req.clone());
        assert!(!record.request.has_sub_requests());
        assert_eq!(record.request.members, req.members);

        record.set_sub_ref(ResourceKind::Car, "C1".to_string());
        record.set_sub_ref(ResourceKind::Flight, "F1".to_string());
        record.hotel_ref = Some(String::new());

        let refs = record.sub_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], SubBookingRef { kind: ResourceKind::Flight, reference: "F1".to_string() });
        assert_eq!(refs[1].kind, ResourceKind::Car);
        assert_eq!(record.sub_ref(ResourceKind::Hotel), None);
    }

    #[test]
    fn test_confirmation_json_shape() {
        let mut confirmation = TripConfirmation::new("TRIP1".to_string(), trip());
        confirmation.flight_confirmation = Some(FlightConfirmation {
            reference: "F1".to_string(),
            flight: flight(),
        });
        let value = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(value["ref"], "TRIP1");
        assert_eq!(value["flight_confirmation"]["ref"], "F1");
        assert_eq!(value["flight_confirmation"]["flight"]["flight_number"], "TP1351");
        assert!(value.get("hotel_confirmation").is_none());
        assert!(value["trip"].get("flight").is_none());
    }
}
