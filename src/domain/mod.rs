pub mod calendar;
pub mod duration;
pub mod models;
pub mod state_machine;
