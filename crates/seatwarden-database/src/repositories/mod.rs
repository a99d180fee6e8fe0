//! Concrete repository implementations.

pub mod device;
pub mod outcome;
pub mod reservation;
pub mod user;

pub use device::DeviceRepository;
pub use outcome::OutcomeRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;
