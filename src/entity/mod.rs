pub mod audit_logs;
pub mod cars;
pub mod test_drive_bookings;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use cars::Entity as Cars;
pub use test_drive_bookings::Entity as TestDriveBookings;
pub use users::Entity as Users;
