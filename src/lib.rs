//! pomforge turns a spreadsheet of UI test scenarios into a Selenium page
//! object suite.
//!
//! Layers, leaves first: [`scenario`] models one input row, [`generation`]
//! plans and synthesizes classes, [`infrastructure`] reads sources, talks to
//! the text-generation service and writes files, and [`application`] runs
//! the whole pipeline.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod scenario;
