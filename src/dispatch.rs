// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::{
	error::{Error, Result},
	format::{self, ArchiveFormat},
	tar::TarCommand,
};
use std::{fmt, path::PathBuf};
use tracing::debug;

/// The one thing a single invocation does to an archive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
	Create,
	Extract,
	List,
	Delete,
	Update,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Create => "create",
			Self::Extract => "extract",
			Self::List => "list",
			Self::Delete => "delete",
			Self::Update => "update",
		})
	}
}

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
	pub archive: String,
	pub operation: Operation,
	pub files: Vec<PathBuf>,
}

impl ArchiveRequest {
	pub fn new(archive: impl Into<String>, operation: Operation, files: Vec<PathBuf>) -> Self {
		Self {
			archive: archive.into(),
			operation,
			files,
		}
	}
}

/// Validates a request and builds the `tar` invocation that carries it out.
///
/// Nothing is run here; any error means `tar` must not be invoked at all.
pub fn plan(request: &ArchiveRequest) -> Result<TarCommand> {
	let ArchiveRequest {
		archive,
		operation,
		files,
	} = request;

	let command = match operation {
		Operation::List => {
			debug!(%operation, archive = %archive, "dispatching");
			TarCommand::list(archive)
		}
		Operation::Create => {
			let format = format::classify_by_suffix(archive)?;
			debug!(%operation, %format, archive = %archive, "dispatching");
			require_files(files)?;
			TarCommand::create(format, archive, files)
		}
		Operation::Extract => {
			let format = format::classify_by_header(archive)?;
			debug!(%operation, %format, archive = %archive, "dispatching");
			TarCommand::extract(format, archive)
		}
		Operation::Delete | Operation::Update => {
			let format = format::classify_by_header(archive)?;
			// tar can only rewrite members of uncompressed archives
			if format != ArchiveFormat::Tar {
				return Err(Error::UnsupportedOperationForFormat);
			}
			debug!(%operation, %format, archive = %archive, "dispatching");
			require_files(files)?;
			if *operation == Operation::Delete {
				TarCommand::delete(archive, files)
			} else {
				TarCommand::update(archive, files)
			}
		}
	};
	Ok(command)
}

fn require_files(files: &[PathBuf]) -> Result<()> {
	if files.is_empty() {
		Err(Error::MissingFiles)
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::format::TAR_MAGIC_OFFSET;
	use std::{fs, path::Path};
	use tempfile::TempDir;

	fn write_archive(dir: &TempDir, name: &str, format: ArchiveFormat) -> String {
		let mut contents = vec![0_u8; 512];
		match format {
			ArchiveFormat::Tar => {
				contents[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5].copy_from_slice(format.magic())
			}
			_ => contents[..format.magic().len()].copy_from_slice(format.magic()),
		}
		let path = dir.path().join(name);
		fs::write(&path, contents).expect("failed to write archive");
		path.display().to_string()
	}

	fn files(names: &[&str]) -> Vec<PathBuf> {
		names.iter().map(PathBuf::from).collect()
	}

	#[test]
	fn test_create_uses_suffix() {
		let request = ArchiveRequest::new("archive.tar.gz", Operation::Create, files(&["foo.txt"]));
		let command = plan(&request).expect("failed to plan");
		assert_eq!(command, TarCommand::create(ArchiveFormat::Gzip, "archive.tar.gz", &request.files));
		assert_eq!(command.archive(), "archive.tar.gz");
		assert_eq!(command.args()[0], "-cvzf");
	}

	#[test]
	fn test_create_unrecognized_extension() {
		let request = ArchiveRequest::new("archive", Operation::Create, files(&["foo.txt", "bar.txt"]));
		assert_eq!(plan(&request), Err(Error::UnrecognizedExtension));
	}

	#[test]
	fn test_create_without_files() {
		let request = ArchiveRequest::new("archive.tar", Operation::Create, Vec::new());
		assert_eq!(plan(&request), Err(Error::MissingFiles));
	}

	#[test]
	fn test_list_skips_classification() {
		let request = ArchiveRequest::new("does/not/exist.zip", Operation::List, Vec::new());
		assert_eq!(plan(&request), Ok(TarCommand::list("does/not/exist.zip")));
	}

	#[test]
	fn test_extract_uses_header() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		// the name lies; the header is authoritative
		let archive = write_archive(&dir, "archive.tar", ArchiveFormat::Xz);
		let request = ArchiveRequest::new(&*archive, Operation::Extract, files(&["ignored"]));
		assert_eq!(plan(&request), Ok(TarCommand::extract(ArchiveFormat::Xz, &archive)));
	}

	#[test]
	fn test_extract_missing_archive() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		let archive = dir.path().join("gone.tar").display().to_string();
		let request = ArchiveRequest::new(&*archive, Operation::Extract, Vec::new());
		assert_eq!(plan(&request), Err(Error::FileNotFound { path: archive }));
	}

	#[test]
	fn test_modify_compressed_rejected() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		for format in [ArchiveFormat::Gzip, ArchiveFormat::Bzip2, ArchiveFormat::Xz] {
			let archive = write_archive(&dir, format.key(), format);
			for operation in [Operation::Delete, Operation::Update] {
				let request = ArchiveRequest::new(&*archive, operation, files(&["a"]));
				assert_eq!(plan(&request), Err(Error::UnsupportedOperationForFormat));
			}
		}
	}

	#[test]
	fn test_modify_plain_tar() {
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		let archive = write_archive(&dir, "archive", ArchiveFormat::Tar);
		let members = files(&["a", "b"]);

		let delete = ArchiveRequest::new(&*archive, Operation::Delete, members.clone());
		assert_eq!(plan(&delete), Ok(TarCommand::delete(&archive, &members)));
		let update = ArchiveRequest::new(&*archive, Operation::Update, members.clone());
		assert_eq!(plan(&update), Ok(TarCommand::update(&archive, &members)));

		let empty = ArchiveRequest::new(&*archive, Operation::Update, Vec::new());
		assert_eq!(plan(&empty), Err(Error::MissingFiles));
		assert!(Path::new(&archive).exists());
	}
}
