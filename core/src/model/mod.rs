// pesan/src/model/mod.rs

//! Wire and domain types shared by the checkout components and the API client.

pub mod account;
pub mod booking;
pub mod catalog;
pub mod geocode;
pub mod order;
pub mod ticket;

pub use account::{ActivityLogItem, AvatarUpload, ProfileUpdate, RegisterRequest, Testimonial, UserProfile};
pub use booking::{
  BookingDraft, BookingField, ConfirmedBooking, FieldValue, SubmittedBooking, DEPART_TIMES, MAX_QUANTITY,
  MIN_QUANTITY, RETURN_TIMES,
};
pub use catalog::{Destination, NamedRef, PickupLocation, TeamMember};
pub use geocode::{GeocodeAddress, ReverseGeocodeResponse};
pub use order::{CreateOrderRequest, OrderCreated, PaymentSession};
pub use ticket::{PaymentStatus, TicketDetail, TicketSummary};
