//! Onboarding score rules plus the configuration, authentication, telemetry and error
//! plumbing shared by the HTTP service.

pub mod auth;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
