//! ATS keyword matching and scoring.

pub mod keywords;
pub mod scorer;
