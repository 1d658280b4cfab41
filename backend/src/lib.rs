//! CourseBundler backend - accounts, subscription billing and admin statistics.
//!
//! Hexagonal layout: `domain` holds the rules, `ports` the seams,
//! `adapters` the implementations (HTTP, Postgres, Razorpay, in-memory),
//! `application` the command and query handlers, and `app` wires them.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
