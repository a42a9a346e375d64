//! Guest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guest {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub attendance: String,
    pub rsvp_status: String,
    pub allergies: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub table_id: Option<i64>,
    pub partner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which part of the day a guest is invited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
    Dinner,
    DinnerAndParty,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Dinner => "dinner",
            Attendance::DinnerAndParty => "dinner_and_party",
        }
    }

    /// Map the two checkboxes on the guest form to a category.
    /// Neither box checked is not a valid category.
    pub fn from_flags(dinner: bool, party: bool) -> Option<Self> {
        match (dinner, party) {
            (false, false) => None,
            (_, true) => Some(Attendance::DinnerAndParty),
            (true, false) => Some(Attendance::Dinner),
        }
    }
}

impl From<&str> for Attendance {
    fn from(value: &str) -> Self {
        match value {
            "dinner_and_party" => Attendance::DinnerAndParty,
            _ => Attendance::Dinner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Pending,
    Accepted,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Accepted => "accepted",
            RsvpStatus::Declined => "declined",
        }
    }
}

impl From<&str> for RsvpStatus {
    fn from(value: &str) -> Self {
        match value {
            "accepted" => RsvpStatus::Accepted,
            "declined" => RsvpStatus::Declined,
            _ => RsvpStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    pub event_id: i64,
    pub name: String,
    pub attendance: Option<Attendance>,
    pub allergies: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub table_id: Option<i64>,
    pub partner_id: Option<i64>,
}

impl CreateGuestRequest {
    /// Minimal request with just a name; everything else defaulted.
    pub fn named(event_id: i64, name: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            attendance: None,
            allergies: None,
            mobile: None,
            address: None,
            email: None,
            role: None,
            table_id: None,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuestRequest {
    pub name: Option<String>,
    pub attendance: Option<Attendance>,
    pub rsvp_status: Option<RsvpStatus>,
    pub allergies: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_from_flags() {
        assert_eq!(Attendance::from_flags(true, false), Some(Attendance::Dinner));
        assert_eq!(
            Attendance::from_flags(true, true),
            Some(Attendance::DinnerAndParty)
        );
        assert_eq!(
            Attendance::from_flags(false, true),
            Some(Attendance::DinnerAndParty)
        );
        assert_eq!(Attendance::from_flags(false, false), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [RsvpStatus::Pending, RsvpStatus::Accepted, RsvpStatus::Declined] {
            assert_eq!(RsvpStatus::from(status.as_str()), status);
        }
        assert_eq!(RsvpStatus::from("garbage"), RsvpStatus::Pending);
    }
}
