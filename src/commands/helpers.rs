use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionCommand, SessionController, SessionOptions};
use crate::shell::{ShellExecutor, Statement};
use crate::state::StateStore;
use std::io::Write;

/// Run one session operation end to end: load the stored state, decide,
/// persist the state if it changed, then print the statements.
///
/// Nothing is printed unless the state was saved first.
pub fn run_session<E, W>(
    command: SessionCommand,
    config: &Config,
    store: &StateStore,
    executor: &E,
    out: &mut W,
) -> Result<()>
where
    E: ShellExecutor + ?Sized,
    W: Write,
{
    let mut state = store.load()?;
    let controller = SessionController::new(executor, SessionOptions::from(config));
    let statements = controller.run(command, &mut state)?;

    if state.changed() {
        store.save(&state)?;
    }

    emit(out, &statements)
}

/// Write statements one per line, in order, for `eval`.
pub fn emit<W: Write>(out: &mut W, statements: &[Statement]) -> Result<()> {
    for statement in statements {
        writeln!(out, "{}", statement)?;
    }
    out.flush()?;
    Ok(())
}
