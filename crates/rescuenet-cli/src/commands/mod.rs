//! Command dispatch: bridges CLI args -> dispatcher operations -> output.

pub mod config_cmd;
pub mod incidents;
pub mod report;
pub mod resources;
pub mod status;
pub mod util;

use rescuenet_core::Dispatcher;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a dispatcher-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dispatcher: &Dispatcher,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Report(args) => report::handle(dispatcher, args, global).await,
        Command::Incidents(args) => incidents::list(dispatcher, args, global),
        Command::Resolve { id } => incidents::resolve(dispatcher, &id, global),
        Command::Check { incident, item } => incidents::check(dispatcher, &incident, &item, global),
        Command::Resources(args) => resources::handle(dispatcher, args, cfg, global).await,
        Command::Status => status::handle(dispatcher, global),
        // Config is handled before dispatch
        Command::Config(_) => unreachable!(),
    }
}
