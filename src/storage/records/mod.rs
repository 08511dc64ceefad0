pub(crate) mod shift;
pub(crate) mod user;
