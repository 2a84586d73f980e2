//! Algorithm implementations for module generation
//!
//! Probability computation, module graph construction, and the driver that
//! assembles and writes every module of a run.

pub mod assembly;
pub mod module;
pub mod probability;
