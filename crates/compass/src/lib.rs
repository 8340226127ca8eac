//! Core library for the student intake assessment portal.
//!
//! The assessment walks a single respondent through five question sections
//! (one of them timed), converts the collected answers into a score profile,
//! and hands the result to a narrow persistence gateway. Everything that
//! renders pages or draws pattern glyphs lives outside this crate.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
