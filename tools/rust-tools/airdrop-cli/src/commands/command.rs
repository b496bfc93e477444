use anyhow::Result;
use std::io::Write;

/// Trait for executable commands; `out` receives the command's JSON output
pub trait Command {
    fn execute(self, out: &mut dyn Write) -> Result<()>;
}
