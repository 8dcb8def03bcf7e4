pub mod alignment;
pub mod center;
pub mod config;
pub mod consts;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod io;
pub mod session;
pub mod transform;
pub mod viewport;
