// SPDX-License-Identifier: Apache-2.0 OR MIT
#![forbid(unsafe_code)]
#![warn(
	clippy::perf,
	clippy::complexity,
	clippy::style,
	clippy::correctness,
	clippy::missing_const_for_fn
)]
#![allow(clippy::tabs_in_doc_comments)]

//! This crate works out what kind of tar archive a file is, either from its
//! name or from the magic bytes in its header, and drives the system `tar`
//! with the right flags for it.
//!
//! Four formats are known: plain tar, and tar compressed with gzip, bzip2 or
//! xz. New archives are classified by name, since they don't exist yet;
//! existing archives are classified by content, since their names may lie.
//!
//! # Examples
//!
//! ## Classifying an archive
//! ```rust,no_run
//! use simpletar::{classify_by_header, classify_by_suffix, ArchiveFormat, Result};
//!
//! fn main() -> Result<()> {
//! 	assert_eq!(classify_by_suffix("backup.tar.gz")?, ArchiveFormat::Gzip);
//! 	println!("backup.tar.gz is really {}", classify_by_header("backup.tar.gz")?);
//! 	Ok(())
//! }
//! ```
//!
//! ## Running a request
//! ```rust,no_run
//! use simpletar::{plan, ArchiveRequest, Operation, Result};
//!
//! fn main() -> Result<()> {
//! 	let request = ArchiveRequest::new("backup", Operation::Extract, Vec::new());
//! 	let code = plan(&request)?.run()?;
//! 	std::process::exit(code);
//! }
//! ```
//!
//! # License
//!
//! `simpletar` is licensed under either the [MIT license](LICENSE-MIT) or the
//! [Apache License 2.0](LICENSE-APACHE), at the choice of the user.

/// Turning a request into a single `tar` invocation.
pub mod dispatch;
/// Error handling for classification and validation.
pub mod error;
/// Archive format detection.
pub mod format;
/// Building and running `tar` invocations.
pub mod tar;

pub use dispatch::{plan, ArchiveRequest, Operation};
pub use error::{Error, Result};
pub use format::{classify_by_header, classify_by_suffix, suffixes_for, ArchiveFormat};
pub use tar::TarCommand;
