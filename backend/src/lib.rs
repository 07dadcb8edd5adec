//! # Timetable Rust Backend
//!
//! Academic timetable generation engine.
//!
//! This crate provides a Rust backend for weekly academic timetabling: it fills
//! a fixed Monday-to-Friday grid of teaching periods for every active course,
//! assigning a subject and a qualified staff member to each slot without ever
//! double-booking a staff member. The backend exposes a REST API via Axum for
//! administrative frontends.
//!
//! ## Features
//!
//! - **Constraint checking**: pure slot/staff/subject rules evaluated against the
//!   entries committed so far in a run
//! - **Grid filling**: deterministic single-pass assignment over courses, days,
//!   and periods, with an optional recorded shuffle seed for variety
//! - **Regeneration workflow**: detect existing entries, confirm, clear, and
//!   regenerate with atomic replace-all persistence
//! - **Projection**: reshape flat entries into per-course day-by-period grids
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Typed records for courses, subjects, staff, periods, and entries
//! - [`engine`]: Constraint set and the slot assignment pass
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Regeneration controller and read-side projections
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
