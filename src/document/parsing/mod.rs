//! Document parsing utilities
//!
//! This module contains the quick-xml readers for the individual parts of a
//! package and the run-level text extraction built on top of them.

pub(crate) mod body;
pub(crate) mod formatting;
pub mod numbering;
pub mod relationships;
pub mod styles;
pub(crate) mod xml;
