pub mod balances;
pub mod holidays;
pub mod requests;
pub mod shared;
