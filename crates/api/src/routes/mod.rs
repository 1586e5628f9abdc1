pub mod health;
pub mod scheduling;
