//! Core business logic modules.

pub mod dialog;
pub mod report;
pub mod scanner;
pub mod selection;
