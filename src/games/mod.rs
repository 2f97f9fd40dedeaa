//! Game implementations.

pub mod president;
