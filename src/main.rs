// SPDX-License-Identifier: Apache-2.0 OR MIT
mod app;

use self::app::args::AppArgs;
use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use std::process::exit;

fn main() -> Result<()> {
	color_eyre::install().wrap_err("failed to install color-eyre handler")?;
	let args = match AppArgs::try_parse() {
		Ok(args) => args,
		Err(err) if err.use_stderr() => {
			err.print().wrap_err("failed to print usage error")?;
			exit(1);
		}
		Err(err) => err.exit(),
	};
	app::logging::init(args.verbose)?;

	let command = match args
		.into_request()
		.and_then(|request| simpletar::plan(&request))
	{
		Ok(command) => command,
		Err(err) => {
			eprintln!("simpletar: {err}");
			exit(1);
		}
	};
	let code = command
		.run()
		.wrap_err_with(|| format!("failed to run {}", command.program().to_string_lossy()))?;
	exit(code)
}
