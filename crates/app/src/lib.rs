//! Booking submission, backend access and configuration for the Encore client.

pub mod api;
pub mod bookings;
pub mod config;
pub mod coordinator;
pub mod dto;
pub mod forms;
pub mod lists;
pub mod observability;
pub mod session;

#[cfg(test)]
mod test;
