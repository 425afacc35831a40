// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::io::Error as IoError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
	#[error(
		"Unrecognized file extension. Please specify one of: {{.gz, .gzip}} for gzip files, {{.bz, \
		 .bzip, .bzip2}} for bzip2 files, .xz for XZ files or .tar for simple tar files"
	)]
	UnrecognizedExtension,
	#[error("File {path} not found")]
	FileNotFound { path: String },
	#[error("File {path} is not a file of either tar, gzip, bzip2 or XZ format")]
	UnrecognizedFormat { path: String },
	#[error("Updating or deleting files in archives is not supported for compressed file formats.")]
	UnsupportedOperationForFormat,
	#[error("no files specified, exiting...")]
	MissingFiles,
	#[error("{0}")]
	InvalidArguments(String),
	#[error("I/O error: {0}")]
	Io(#[from] IoError),
}

impl PartialEq for Error {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::UnrecognizedExtension, Self::UnrecognizedExtension)
			| (Self::UnsupportedOperationForFormat, Self::UnsupportedOperationForFormat)
			| (Self::MissingFiles, Self::MissingFiles) => true,
			(Self::FileNotFound { path }, Self::FileNotFound { path: other_path })
			| (Self::UnrecognizedFormat { path }, Self::UnrecognizedFormat { path: other_path }) => {
				path == other_path
			}
			(Self::InvalidArguments(msg), Self::InvalidArguments(other_msg)) => msg == other_msg,
			(Self::Io(io_err), Self::Io(other_io_err)) => {
				io_err.kind() == other_io_err.kind()
					&& io_err.raw_os_error() == other_io_err.raw_os_error()
					&& io_err.to_string() == other_io_err.to_string()
			}
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
