//! College list and grade planning for applicants.
//!
//! Two pure calculators sit at the core: [`classify::classify`] labels a
//! college safety/target/reach for an [`models::AcademicProfile`], and
//! [`grades`] computes weighted GPA "what-if" scenarios over a course list.
//! The remaining modules load records, derive profiles, and render reports.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod grades;
pub mod models;
pub mod profile;
pub mod records;
pub mod report;
pub mod spike;
pub mod telemetry;
