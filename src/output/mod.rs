//! Output formatters for scan results and policy reports.
//!
//! - [`text`]: numbered listing, menu and report for the interactive shell
//! - [`json`]: one machine-readable document for scripting
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::Listing;
//! use dupsweep::duplicates::DuplicateFinder;
//! use dupsweep::output::text::write_listing;
//! use std::path::Path;
//!
//! let result = DuplicateFinder::with_defaults().scan(Path::new(".")).unwrap();
//! let listing = Listing::build(&result.groups);
//! write_listing(&mut std::io::stdout(), &listing).unwrap();
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
