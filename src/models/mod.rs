pub mod appointment;
pub mod stage;
pub mod listing;
pub mod dashboard;

pub use appointment::{status_badge, Appointment, AppointmentPayload, AppointmentStatus};
pub use stage::{Course, Stage, StageIcon, StaffOption};
pub use listing::{ListingQuery, ListingResponse, ListingRow, SortDir};
pub use dashboard::{DashboardStats, UpcomingAppointment};
