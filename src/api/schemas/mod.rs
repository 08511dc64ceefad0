//! Wire DTOs. This layer owns the synonym normalization the two historical
//! frontends require (`employee_id`, `usuario`, `contraseña`, `nombre`,
//! `rol` aliases) so the services only ever see the canonical field names.

pub mod auth;
pub mod health;
pub mod shifts;
pub mod stats;
