//! Game implementations.

pub mod derby;
