pub mod balance;
pub mod directory;
pub mod holiday;
pub mod request;

pub use balance::BalanceRepository;
pub use directory::{DirectoryRepository, EmployeeContact};
pub use holiday::HolidayRepository;
pub use request::{RequestFilter, RequestRepository};
