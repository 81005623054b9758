// Reservations: booking a table at a restaurant for a date/time slot

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::ReservationError;
pub use models::{CreateReservationRequest, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
pub use service::ReservationService;
