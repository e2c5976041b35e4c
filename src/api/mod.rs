pub mod employee;
pub mod holiday;
pub mod vacation;
