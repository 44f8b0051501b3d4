pub mod dates;
pub mod decompress;
pub mod defaults;
pub mod diag;
pub mod error;
pub mod numeric;
pub mod session;
pub mod station;
