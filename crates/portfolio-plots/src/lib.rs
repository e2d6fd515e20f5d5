// File: crates/portfolio-plots/src/lib.rs
// Summary: Library surface for the portfolio report pipeline (CLI and tests link it).

pub mod report;
