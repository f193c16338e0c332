//! Repository methods, one module per framework, all as `impl PdhService` blocks.

pub mod canvas;
pub mod csd;
pub mod link;
pub mod okr;
pub mod persona;
pub mod project;
pub mod report;
pub mod rice;
pub mod roadmap;
