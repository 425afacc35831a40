// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::format::ArchiveFormat;
use std::{
	ffi::{OsStr, OsString},
	io,
	path::PathBuf,
	process::{Command, ExitStatus},
};
use tracing::info;

/// The archiving tool every operation is delegated to.
pub const TAR_PROGRAM: &str = "tar";

/// A single, fully-built invocation of `tar`.
///
/// ```rust,no_run
/// use simpletar::{ArchiveFormat, TarCommand};
///
/// let tar = TarCommand::create(ArchiveFormat::Xz, "backup", &["notes.txt".into()]);
/// assert_eq!(tar.archive(), "backup.tar.xz");
/// let code = tar.run().expect("failed to run tar");
/// std::process::exit(code);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarCommand {
	program: OsString,
	archive: String,
	args: Vec<OsString>,
}

impl TarCommand {
	fn new(flags: &[&str], archive: String, files: &[PathBuf]) -> Self {
		let mut args: Vec<OsString> = flags.iter().map(OsString::from).collect();
		args.push(archive.clone().into());
		args.extend(files.iter().map(|file| file.clone().into_os_string()));
		Self {
			program: TAR_PROGRAM.into(),
			archive,
			args,
		}
	}

	/// `tar --list -f ARCHIVE`; `tar` works out the compression itself.
	pub fn list(archive: &str) -> Self {
		Self::new(&["--list", "-f"], archive.to_owned(), &[])
	}

	/// `tar --delete -f ARCHIVE FILES...`
	pub fn delete(archive: &str, files: &[PathBuf]) -> Self {
		Self::new(&["--delete", "-f"], archive.to_owned(), files)
	}

	/// `tar --update -f ARCHIVE FILES...`
	pub fn update(archive: &str, files: &[PathBuf]) -> Self {
		Self::new(&["--update", "-f"], archive.to_owned(), files)
	}

	/// `tar -cv[z|j|J]f ARCHIVE FILES...`, with the archive name given the
	/// format's canonical extension if it has none of its suffixes.
	pub fn create(format: ArchiveFormat, archive: &str, files: &[PathBuf]) -> Self {
		let flags = mode_flags('c', format);
		Self::new(&[flags.as_str()], normalize_name(format, archive), files)
	}

	/// `tar -xv[z|j|J]f ARCHIVE`, always extracting the whole archive.
	pub fn extract(format: ArchiveFormat, archive: &str) -> Self {
		let flags = mode_flags('x', format);
		Self::new(&[flags.as_str()], archive.to_owned(), &[])
	}

	/// The program that will be run.
	#[inline]
	pub fn program(&self) -> &OsStr {
		&self.program
	}

	/// The archive name passed to `tar`, after any normalization.
	#[inline]
	pub fn archive(&self) -> &str {
		&self.archive
	}

	/// The arguments passed to `tar`.
	#[inline]
	pub fn args(&self) -> &[OsString] {
		&self.args
	}

	/// Runs `tar` with inherited stdio, waits for it, and returns the exit
	/// code to propagate.
	pub fn run(&self) -> io::Result<i32> {
		info!(program = ?self.program, args = ?self.args, "running");
		let status = Command::new(&self.program).args(&self.args).status()?;
		Ok(exit_code(status))
	}
}

/// Appends the canonical extension of `format` unless `name` already ends
/// with one of its suffixes.
pub fn normalize_name(format: ArchiveFormat, name: &str) -> String {
	if format.is_named(name) {
		name.to_owned()
	} else {
		format!("{name}{}", format.canonical_extension())
	}
}

fn mode_flags(mode: char, format: ArchiveFormat) -> String {
	let mut flags = String::from('-');
	flags.push(mode);
	flags.push('v');
	if let Some(compression) = format.compression_flag() {
		flags.push(compression);
	}
	flags.push('f');
	flags
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
	use std::os::unix::process::ExitStatusExt;
	status
		.code()
		.or_else(|| status.signal().map(|signal| 128 + signal))
		.unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
	status.code().unwrap_or(1)
}
