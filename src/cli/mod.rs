use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, HashCommand, PackCommand, ShiftCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(command) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Pack(cmd) => commands::pack::pack(cmd),
        Command::Shift(cmd) => commands::shift::shift(cmd),
        Command::Hash(cmd) => commands::hash::hash(cmd),
        Command::Init => commands::init::init(),
    }
}
