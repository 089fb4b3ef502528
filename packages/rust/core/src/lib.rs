//! Core matching pipeline for ordersort.
//!
//! This crate turns a spreadsheet's identifier column and a PDF into a
//! reordered PDF: key normalization, first-occurrence page indexing,
//! sequence assembly, and the end-to-end `sort_pdf` workflow.

pub mod assembler;
pub mod index;
pub mod keys;
pub mod pipeline;
pub mod report;
