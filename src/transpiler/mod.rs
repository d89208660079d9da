pub mod ast;
pub mod converter;

use tracing::debug;

use self::ast::ContractModel;
use crate::error::Result;
use crate::{generator, parser};

/// Converts Solidity source into Tact source.
///
/// Extraction errors abort before any output is rendered; emission itself
/// cannot fail. Calls share no state and may run concurrently.
pub fn transpile(source: &str) -> Result<String> {
    let model = parser::parse(source)?;
    Ok(emit(model))
}

/// Renders an already extracted model as Tact source.
pub fn emit(model: ContractModel) -> String {
    let name = model.name.clone();
    let tact_code = generator::generate(model);
    debug!(contract = %name, bytes = tact_code.len(), "generated Tact source");
    tact_code
}
