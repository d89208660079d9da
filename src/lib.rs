//! Solidity to Tact transpiler.
//!
//! The pipeline has two stages: [`parser::parse`] extracts a structural
//! [`ContractModel`](transpiler::ast::ContractModel) from source text, and
//! [`generator::generate`] renders Tact source from it.
//! [`transpile`] runs both.

pub mod error;
pub mod generator;
pub mod parser;
pub mod response;
pub mod transpiler;


pub use error::{ErrorKind, Result, TranspileError};
pub use transpiler::transpile;
