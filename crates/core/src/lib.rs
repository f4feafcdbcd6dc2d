//! Core of the forum index scraper.
//!
//! Turns the HTML of a forum's index page into an ordered list of
//! [`ForumSummary`] records. The network fetch and the output formats live
//! behind the traits in [`ports`] and are provided by the adapter crates.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod ports;
pub mod rules;
pub mod selector;
pub mod utils;

pub use application::{scrape_html, ScrapeReport, ScrapeService};
pub use domain::ForumSummary;
pub use error::{Result, ScrapeError};
