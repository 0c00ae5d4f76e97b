use console::Term;

use crate::error::{Error, Result};

/// Block until the user presses any key.
pub fn wait_for_key() -> Result<()> {
    let term = Term::stdout();
    term.write_line("Press any key to continue...")
        .map_err(|e| Error::Terminal { source: e })?;
    term.read_key().map_err(|e| Error::Terminal { source: e })?;
    Ok(())
}
