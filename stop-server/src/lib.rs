//! Bus stop directory server.
//!
//! A map of the bus stops around a station. Stops can be filtered by exit
//! side and picked from the map or a list; the details panel counts down to
//! each stop's next departure.

pub mod config;
pub mod departure;
pub mod domain;
pub mod selection;
pub mod stops;
pub mod web;
