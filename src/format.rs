// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::error::{Error, Result};
use std::{fmt, fs::File, io::Read, path::Path};
use tracing::debug;

/// Offset of the `ustar` magic inside a tar header block.
pub const TAR_MAGIC_OFFSET: usize = 257;

/// Number of bytes read from the start of a file for header classification.
const HEADER_LEN: usize = TAR_MAGIC_OFFSET + ArchiveFormat::Tar.magic().len();

/// An archive format that `tar` can create and extract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
	/// An uncompressed tar archive.
	Tar,
	/// A gzip-compressed tar archive.
	Gzip,
	/// A bzip2-compressed tar archive.
	Bzip2,
	/// An xz-compressed tar archive.
	Xz,
}

impl ArchiveFormat {
	/// Every known format, in lookup order.
	pub const ALL: [Self; 4] = [Self::Tar, Self::Gzip, Self::Bzip2, Self::Xz];

	/// The key used to look this format up with [`suffixes_for`].
	pub const fn key(&self) -> &'static str {
		match self {
			Self::Tar => "tar",
			Self::Gzip => "gzip",
			Self::Bzip2 => "bzip2",
			Self::Xz => "xz",
		}
	}

	/// File name suffixes commonly used for this format.
	pub const fn suffixes(&self) -> &'static [&'static str] {
		match self {
			Self::Tar => &[".tar"],
			Self::Gzip => &[".gz", ".gzip"],
			Self::Bzip2 => &[".bz2", ".bz", ".bzip2"],
			Self::Xz => &[".xz"],
		}
	}

	/// The magic bytes identifying this format.
	///
	/// For [`ArchiveFormat::Tar`] these are found at [`TAR_MAGIC_OFFSET`],
	/// every other format carries them at the start of the file.
	pub const fn magic(&self) -> &'static [u8] {
		match self {
			Self::Tar => b"ustar",
			Self::Gzip => &[0x1F, 0x8B, 0x08],
			Self::Bzip2 => b"BZh",
			Self::Xz => &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00],
		}
	}

	/// The extension appended to new archives that lack one of
	/// [`ArchiveFormat::suffixes`].
	pub const fn canonical_extension(&self) -> &'static str {
		match self {
			Self::Tar => ".tar",
			Self::Gzip => ".tar.gz",
			Self::Bzip2 => ".tar.bz2",
			Self::Xz => ".tar.xz",
		}
	}

	/// The compression flag `tar` expects for this format, if any.
	pub const fn compression_flag(&self) -> Option<char> {
		match self {
			Self::Tar => None,
			Self::Gzip => Some('z'),
			Self::Bzip2 => Some('j'),
			Self::Xz => Some('J'),
		}
	}

	/// Whether `name` already ends with one of this format's suffixes.
	pub fn is_named(&self, name: &str) -> bool {
		self.suffixes().iter().any(|suffix| name.ends_with(suffix))
	}
}

impl fmt::Display for ArchiveFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Returns the suffixes registered for the format with the given key, or
/// `None` if no format uses that key.
pub fn suffixes_for(key: &str) -> Option<&'static [&'static str]> {
	ArchiveFormat::ALL
		.iter()
		.find(|format| format.key() == key)
		.map(ArchiveFormat::suffixes)
}

/// Determines an archive's format from the extension of its file name.
pub fn classify_by_suffix(filename: impl AsRef<Path>) -> Result<ArchiveFormat> {
	let filename = filename.as_ref();
	let extension = filename
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(Error::UnrecognizedExtension)?;
	let format = ArchiveFormat::ALL
		.into_iter()
		.find(|format| {
			format
				.suffixes()
				.iter()
				.any(|suffix| suffix.strip_prefix('.') == Some(extension))
		})
		.ok_or(Error::UnrecognizedExtension)?;
	debug!(file = %filename.display(), %format, "classified by suffix");
	Ok(format)
}

/// Determines an archive's format from the magic bytes in its header.
///
/// A tar signature at [`TAR_MAGIC_OFFSET`] wins over anything found at the
/// start of the file.
pub fn classify_by_header(path: impl AsRef<Path>) -> Result<ArchiveFormat> {
	let path = path.as_ref();
	let header = read_header(path)?;
	let format = detect_magic(&header).ok_or_else(|| Error::UnrecognizedFormat {
		path: path.display().to_string(),
	})?;
	debug!(file = %path.display(), %format, "classified by header");
	Ok(format)
}

/// Matches a header prefix against the known signatures.
pub fn detect_magic(header: &[u8]) -> Option<ArchiveFormat> {
	let tar_magic = ArchiveFormat::Tar.magic();
	if header.get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + tar_magic.len()) == Some(tar_magic) {
		return Some(ArchiveFormat::Tar);
	}
	ArchiveFormat::ALL
		.into_iter()
		.filter(|format| *format != ArchiveFormat::Tar)
		.find(|format| header.starts_with(format.magic()))
}

fn read_header(path: &Path) -> Result<Vec<u8>> {
	let not_found = || Error::FileNotFound {
		path: path.display().to_string(),
	};
	let file = File::open(path).map_err(|_| not_found())?;
	if !file.metadata().map_err(|_| not_found())?.is_file() {
		return Err(not_found());
	}
	let mut header = Vec::with_capacity(HEADER_LEN);
	file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
	Ok(header)
}
