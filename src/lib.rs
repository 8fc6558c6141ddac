//! Assigns media images to car records.
//!
//! Filenames under the media image directory and car names are reduced to a
//! lowercase alphanumeric key; every car whose key matches a file gets its
//! `image` field pointed at `car/images/<filename>` and is saved.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod orm;
pub mod services;

pub use error::AssignError;
