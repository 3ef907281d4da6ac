//! API route modules.

pub mod analyses;
