//! Router middleware.

pub(crate) mod cors;
