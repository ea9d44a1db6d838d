//! # Recur Core Library
//!
//! A to-do task library whose tasks repeat on compact textual rules, built
//! around a pure recurrence date engine.
//!
//! ## Features
//!
//! - **Repeat Rules**: day intervals (`d 7`), yearly (`y`), weekdays
//!   (`w 1,3,5`) and month days with end-of-month offsets (`m -1 2,8`)
//! - **Deterministic Engine**: the caller supplies "today", so every result
//!   is reproducible and always falls strictly after it
//! - **Task Lifecycle**: create, edit, complete and delete tasks with past
//!   dates moved forward automatically
//! - **SQLite Storage**: async persistence with sqlx and embedded migrations
//!
//! ## Core Modules
//!
//! - [`calendar`]: `YYYYMMDD` calendar date type
//! - [`rule`]: Repeat-rule grammar and parser
//! - [`recurrence`]: Next-occurrence engine and due-date normalization
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`db`]: Database connection and migration management
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use recur_core::calendar::CalendarDate;
//! use recur_core::recurrence::{next_occurrence, NextDate};
//!
//! let now: CalendarDate = "20240301".parse().unwrap();
//! let next = next_occurrence(now, "20240101", "d 30").unwrap();
//! assert_eq!(next, NextDate::Scheduled("20240331".parse().unwrap()));
//!
//! assert_eq!(next_occurrence(now, "20240101", "").unwrap(), NextDate::Terminate);
//! ```

pub mod calendar;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod rule;
