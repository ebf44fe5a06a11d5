//! Front-ends that drive a booking session.

pub mod cli;

pub use cli::CliChannel;
