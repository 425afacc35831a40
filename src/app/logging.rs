// SPDX-License-Identifier: Apache-2.0 OR MIT
use color_eyre::{eyre::eyre, Result};
use tracing::Level;

/// Maps the number of `-v` flags to the most detailed level that is logged.
pub const fn level(verbose: u8) -> Level {
	match verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	}
}

/// Logs to stderr so that `tar`'s own output on stdout is left alone.
pub fn init(verbose: u8) -> Result<()> {
	tracing_subscriber::fmt()
		.with_max_level(level(verbose))
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init()
		.map_err(|err| eyre!("failed to install logger: {}", err))
}
