//! Role-based hiring assessment service: a risk-scoring engine wrapped in a
//! thin HTTP and CLI shell. Job openings fan out to a fixed review panel,
//! each reviewer's questionnaire is scored against per-level rule tables, and
//! the aggregate engine turns the panel's verdicts into a hiring
//! recommendation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
