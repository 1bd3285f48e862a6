//! Lingua Server Library
//!
//! This library exposes the server's internal modules to the `linguad`
//! binary and to integration tests.

pub mod auth;
pub mod constants;
pub mod db;
pub mod document;
pub mod error;
pub mod i18n;
pub mod session;
pub mod speech;
pub mod translation;
pub mod web;

#[cfg(test)]
mod testing;
