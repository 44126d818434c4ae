//! Confirmation message rendering.
//!
//! Rendering is pure: the service assembles the message from the entities it
//! already holds and hands it to the notification dispatcher port.

use serde::{Deserialize, Serialize};

use super::hotel::Hotel;
use super::reservation::Reservation;
use super::room::Room;

/// A rendered notification ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Destination email address.
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    /// Render the booking confirmation sent after a reservation is created.
    ///
    /// The subject carries the reservation id so replies and support tickets
    /// can be matched to the booking.
    pub fn confirmation(
        reservation: &Reservation,
        hotel: &Hotel,
        room: &Room,
        recipient: impl Into<String>,
    ) -> Self {
        let subject = format!("Reservation confirmation #{}", reservation.id);
        let body = format!(
            "Dear {first} {last},\n\n\
             Your reservation at {hotel} is confirmed.\n\n\
             Room: {kind}\n\
             Check-in: {check_in}\n\
             Check-out: {check_out}\n\
             Price per night: {price:.2}\n\
             Location: {location}\n\n\
             We look forward to welcoming you.",
            first = reservation.contact.first_name,
            last = reservation.contact.last_name,
            hotel = hotel.name,
            kind = room.kind,
            check_in = reservation.check_in.format("%Y-%m-%d %H:%M"),
            check_out = reservation.check_out.format("%Y-%m-%d %H:%M"),
            price = room.base_cost,
            location = hotel.location,
        );
        Self {
            recipient: recipient.into(),
            subject,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::ContactDraft;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn fixtures() -> (Reservation, Hotel, Room) {
        let hotel = Hotel::try_new(
            Uuid::new_v4(),
            "Seaside Hotel",
            "Cartagena",
            0.12,
            Uuid::new_v4(),
        )
        .expect("valid hotel");
        let room = Room::try_new(
            Uuid::new_v4(),
            "Double",
            120.0,
            19.0,
            "Floor 3, sea view",
            2,
            hotel.id,
        )
        .expect("valid room");
        let contact = ContactDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
        }
        .build()
        .expect("valid contact");
        let check_in = Utc.with_ymd_and_hms(2026, 9, 10, 14, 0, 0).single().expect("valid");
        let check_out = Utc.with_ymd_and_hms(2026, 9, 14, 11, 0, 0).single().expect("valid");
        let reservation = Reservation::try_new(
            Uuid::new_v4(),
            556.0,
            2,
            contact,
            Uuid::new_v4(),
            room.id,
            Utc::now(),
            check_in,
            check_out,
        )
        .expect("valid reservation");
        (reservation, hotel, room)
    }

    #[rstest]
    fn subject_contains_the_reservation_id() {
        let (reservation, hotel, room) = fixtures();
        let message =
            NotificationMessage::confirmation(&reservation, &hotel, &room, "ada@example.com");
        assert!(message.subject.contains(&reservation.id.to_string()));
    }

    #[rstest]
    fn body_carries_the_stay_details() {
        let (reservation, hotel, room) = fixtures();
        let message =
            NotificationMessage::confirmation(&reservation, &hotel, &room, "ada@example.com");
        assert_eq!(message.recipient, "ada@example.com");
        assert!(message.body.contains("Seaside Hotel"));
        assert!(message.body.contains("Double"));
        assert!(message.body.contains("Cartagena"));
        assert!(message.body.contains("120.00"));
        assert!(message.body.contains("2026-09-10 14:00"));
        assert!(message.body.contains("2026-09-14 11:00"));
    }
}
