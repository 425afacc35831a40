// SPDX-License-Identifier: Apache-2.0 OR MIT
use clap::{ArgAction, ArgGroup, Parser};
use simpletar::{ArchiveRequest, Error, Operation, Result};
use std::path::PathBuf;

/// A utility that simplifies archive file manipulation by trying to determine
/// archive type using filenames and/or header "magic bytes".
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(
	ArgGroup::new("operation")
		.required(true)
		.args(&["create", "extract", "list", "delete", "update"])
))]
pub struct AppArgs {
	/// Create an archive file
	#[clap(short, long, help_heading = "OPERATION")]
	pub create: bool,
	/// Extract contents from an archive file
	#[clap(short = 'x', long, help_heading = "OPERATION")]
	pub extract: bool,
	/// List the contents of an archive file
	#[clap(short, long, help_heading = "OPERATION")]
	pub list: bool,
	/// Delete files from an archive file
	#[clap(short, long, help_heading = "OPERATION")]
	pub delete: bool,
	/// Update files in an archive file
	#[clap(short, long, help_heading = "OPERATION")]
	pub update: bool,
	/// A list of file names
	#[clap(short, long, value_parser, multiple_values = true, min_values = 0)]
	pub files: Vec<PathBuf>,
	/// Log more about what is going on (repeat for more detail)
	#[clap(short, long, action = ArgAction::Count)]
	pub verbose: u8,
	/// The name of the archive file
	#[clap(value_parser)]
	pub archive: Option<String>,
}

impl AppArgs {
	/// The operation selected by the mutually exclusive flags.
	pub fn operation(&self) -> Result<Operation> {
		match (
			self.create,
			self.extract,
			self.list,
			self.delete,
			self.update,
		) {
			(true, false, false, false, false) => Ok(Operation::Create),
			(false, true, false, false, false) => Ok(Operation::Extract),
			(false, false, true, false, false) => Ok(Operation::List),
			(false, false, false, true, false) => Ok(Operation::Delete),
			(false, false, false, false, true) => Ok(Operation::Update),
			_ => Err(Error::InvalidArguments(
				"exactly one of --create, --extract, --list, --delete or --update is required".into(),
			)),
		}
	}

	/// Turns the parsed flags into a request.
	///
	/// `--files` takes every value after it, so when no separate archive
	/// argument is left over, the last of those values is the archive.
	pub fn into_request(mut self) -> Result<ArchiveRequest> {
		let operation = self.operation()?;
		let archive = match self.archive.take() {
			Some(archive) => archive,
			None => self
				.files
				.pop()
				.ok_or_else(|| {
					Error::InvalidArguments("the following argument is required: ARCHIVE".into())
				})?
				.into_os_string()
				.into_string()
				.map_err(|name| {
					Error::InvalidArguments(format!(
						"archive name {} is not valid UTF-8",
						name.to_string_lossy()
					))
				})?,
		};
		Ok(ArchiveRequest::new(archive, operation, self.files))
	}
}

#[cfg(test)]
mod test {
	use super::AppArgs;
	use clap::{CommandFactory, Parser};
	use simpletar::{Error, Operation};
	use std::path::PathBuf;

	fn parse(args: &[&str]) -> clap::Result<AppArgs> {
		AppArgs::try_parse_from(std::iter::once("simpletar").chain(args.iter().copied()))
	}

	#[test]
	fn test_command() {
		AppArgs::command().debug_assert();
	}

	#[test]
	fn test_operations() {
		let cases = [
			("-c", Operation::Create),
			("--extract", Operation::Extract),
			("-l", Operation::List),
			("--delete", Operation::Delete),
			("-u", Operation::Update),
		];
		for (flag, operation) in cases {
			let args = parse(&[flag, "archive.tar"]).expect("failed to parse");
			assert_eq!(args.operation(), Ok(operation), "{flag}");
		}
	}

	#[test]
	fn test_operations_exclusive() {
		assert!(parse(&["-c", "-x", "archive.tar"]).is_err());
		assert!(parse(&["--list", "--update", "archive.tar"]).is_err());
		assert!(parse(&["archive.tar"]).is_err());
	}

	#[test]
	fn test_files_before_archive() {
		let request = parse(&["-c", "-f", "foo.txt", "bar.txt", "archive"])
			.expect("failed to parse")
			.into_request()
			.expect("failed to build request");
		assert_eq!(request.archive, "archive");
		assert_eq!(request.operation, Operation::Create);
		assert_eq!(request.files, [PathBuf::from("foo.txt"), PathBuf::from("bar.txt")]);
	}

	#[test]
	fn test_archive_before_files() {
		let request = parse(&["-u", "archive.tar", "-f", "a", "b"])
			.expect("failed to parse")
			.into_request()
			.expect("failed to build request");
		assert_eq!(request.archive, "archive.tar");
		assert_eq!(request.files, [PathBuf::from("a"), PathBuf::from("b")]);
	}

	#[test]
	fn test_missing_archive() {
		let args = parse(&["-l"]).expect("failed to parse");
		assert!(matches!(args.into_request(), Err(Error::InvalidArguments(_))));
		let args = parse(&["-c", "-f"]).expect("failed to parse");
		assert!(matches!(args.into_request(), Err(Error::InvalidArguments(_))));
	}

	#[cfg(unix)]
	#[test]
	fn test_non_utf8_archive_after_files() {
		use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

		let args = AppArgs::try_parse_from([
			OsStr::new("simpletar"),
			OsStr::new("-c"),
			OsStr::new("-f"),
			OsStr::new("foo.txt"),
			OsStr::from_bytes(b"\xff.tar"),
		])
		.expect("failed to parse");
		assert!(matches!(args.into_request(), Err(Error::InvalidArguments(_))));
	}
}
