//! Response middleware.

pub(crate) mod headers;
pub(crate) mod panic;
