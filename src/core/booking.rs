use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::core::parse::parse_session_date;
use crate::models::{Booking, BookingStatus, CampRecord, ContactInfo};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("{email} already has a camp booked on {date}")]
    Conflict { email: String, date: NaiveDate },

    #[error("{camp} has no session starting on {date}")]
    UnknownSession { camp: String, date: NaiveDate },

    #[error("no booking with id {0}")]
    NotFound(Uuid),
}

/// In-memory register of confirmed bookings
///
/// One parent (by email) can hold at most one confirmed booking per session
/// start date.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: HashMap<Uuid, Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ledger from previously persisted bookings
    pub fn from_bookings(bookings: impl IntoIterator<Item = Booking>) -> Self {
        Self {
            bookings: bookings.into_iter().map(|b| (b.booking_id, b)).collect(),
        }
    }

    pub fn has_conflict(&self, email: &str, date: NaiveDate) -> bool {
        let email = email.trim();
        self.bookings.values().any(|b| {
            b.status == BookingStatus::Confirmed
                && b.session_date == date
                && b.contact.email.trim().eq_ignore_ascii_case(email)
        })
    }

    /// Reserve `session_date` of `camp` for `contact`
    pub fn book(
        &mut self,
        camp: &CampRecord,
        session_date: NaiveDate,
        contact: ContactInfo,
    ) -> Result<Booking, BookingError> {
        let offered = camp
            .dates
            .iter()
            .filter_map(|d| parse_session_date(d).ok())
            .any(|d| d == session_date);

        if !offered {
            return Err(BookingError::UnknownSession {
                camp: camp.name.clone(),
                date: session_date,
            });
        }

        if self.has_conflict(&contact.email, session_date) {
            return Err(BookingError::Conflict {
                email: contact.email,
                date: session_date,
            });
        }

        let booking = Booking {
            booking_id: Uuid::new_v4(),
            camp_name: camp.name.clone(),
            session_date,
            contact,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        };

        self.bookings.insert(booking.booking_id, booking.clone());

        tracing::debug!(
            "Booked {} on {} ({})",
            booking.camp_name,
            booking.session_date,
            booking.booking_id
        );

        Ok(booking)
    }

    /// Cancel a booking, freeing its date for the same parent
    ///
    /// Cancelling an already cancelled booking returns it unchanged.
    pub fn cancel(&mut self, booking_id: &Uuid) -> Result<Booking, BookingError> {
        let booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or(BookingError::NotFound(*booking_id))?;

        if booking.status != BookingStatus::Cancelled {
            booking.status = BookingStatus::Cancelled;
            tracing::debug!("Cancelled booking {}", booking_id);
        }

        Ok(booking.clone())
    }

    pub fn get(&self, booking_id: &Uuid) -> Option<&Booking> {
        self.bookings.get(booking_id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
