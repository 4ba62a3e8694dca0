mod cli;
mod commands;

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")] // the utilities assume serial event delivery
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::build_cli();
    let matches = cmd.get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    let version_flag = matches.get_flag("version");

    cli::init_logging(log_level.as_deref());

    if version_flag {
        println!("pollkit {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    commands::dispatch(&matches).await
}
