pub mod ai;
pub mod bookings;
pub mod cars;
pub mod dashboard;
