//! Utility functions shared by the generator

pub mod logging;
