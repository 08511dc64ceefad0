pub mod account_service;
pub mod shift_service;
pub mod stats_service;
