use crate::commands::helpers::run_session;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionCommand;
use crate::shell::BashExecutor;
use crate::state::StateStore;
use std::io::Write;

pub fn execute<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let store = StateStore::new(config.state_path());
    run_session(SessionCommand::Kill, config, &store, &BashExecutor, out)
}
