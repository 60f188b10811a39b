//! Config command implementation

use crate::context::ProjectContext;
use crate::error::Result;

/// Print the effective configuration, defaults included.
pub fn run_config(context: &ProjectContext) -> Result<()> {
    print!("{}", context.config.to_toml()?);
    Ok(())
}
