pub mod balance;
pub mod employee;
pub mod holiday;
pub mod vacation_request;

pub use balance::BalanceSnapshot;
pub use employee::Employee;
pub use holiday::CorporateHoliday;
pub use vacation_request::{RequestKind, RequestStatus, VacationRequest};
