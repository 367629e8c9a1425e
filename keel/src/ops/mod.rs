//! Operations behind the commands; each returns a report.

pub mod check;
pub mod generate;
