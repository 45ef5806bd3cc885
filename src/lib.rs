//! Payroll engine for shift-based workers
//!
//! This crate calculates shift pay with weekend, public holiday and
//! overtime multipliers, applies a progressive income tax schedule, rolls
//! recurring expenses forward, and summarizes earnings, spending and
//! savings goals. The [`api`] module exposes these calculations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
