use pest::Parser;
use std::collections::HashSet;
use tracing::warn;

use super::ast::{Param, StateVariable};
use crate::parser::{Rule, SolidityParser, TYPE_QUALIFIERS};

/// Solidity base types with a known Tact counterpart.
const TYPE_MAPPING: [(&str, &str); 9] = [
    ("uint256", "Int as uint256"),
    ("uint", "Int as uint256"),
    ("int", "Int"),
    ("bool", "Bool"),
    ("address", "Address"),
    ("string", "String"),
    ("bytes", "Cell"),
    ("uint8", "Int as uint8"),
    ("uint128", "Int as uint128"),
];

const NUMERIC_TYPES: [&str; 5] = ["uint256", "uint", "int", "uint8", "uint128"];

/// A Solidity type with qualifiers removed, split into its structure.
enum SolidityType<'a> {
    Mapping { key: &'a str, value: &'a str },
    Array { element: &'a str },
    Base(&'a str),
}

fn classify(solidity_type: &str) -> SolidityType<'_> {
    let ty = solidity_type.trim();

    if let Some(inner) = ty
        .strip_prefix("mapping")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        if let Some((key, value)) = inner.split_once("=>") {
            return SolidityType::Mapping {
                key: key.trim(),
                value: value.trim(),
            };
        }
    }

    if ty.ends_with(']') {
        if let Some(open) = ty.rfind('[') {
            return SolidityType::Array {
                element: ty[..open].trim_end(),
            };
        }
    }

    SolidityType::Base(ty)
}

/// Drops data-location qualifiers: `string memory` becomes `string`.
fn strip_qualifiers(solidity_type: &str) -> String {
    solidity_type
        .split_whitespace()
        .filter(|token| !TYPE_QUALIFIERS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a Solidity type to its Tact spelling. Unknown base types pass
/// through unchanged; arrays become `map<Int, T>`.
pub fn convert_solidity_type(solidity_type: &str) -> String {
    let ty = strip_qualifiers(solidity_type);
    match classify(&ty) {
        SolidityType::Mapping { key, value } => format!(
            "map<{}, {}>",
            convert_solidity_type(key),
            convert_solidity_type(value)
        ),
        SolidityType::Array { element } => {
            format!("map<Int, {}>", convert_solidity_type(element))
        }
        SolidityType::Base(base) => TYPE_MAPPING
            .iter()
            .find(|(solidity, _)| *solidity == base)
            .map(|(_, tact)| tact.to_string())
            .unwrap_or_else(|| base.to_string()),
    }
}

/// The value `init()` assigns to a state variable declared without an
/// initializer, or `None` when the type has no default.
pub fn default_value(solidity_type: &str) -> Option<&'static str> {
    let ty = strip_qualifiers(solidity_type);
    match classify(&ty) {
        SolidityType::Mapping { .. } | SolidityType::Array { .. } => Some("emptyMap()"),
        SolidityType::Base(base) if NUMERIC_TYPES.contains(&base) => Some("0"),
        SolidityType::Base("bool") => Some("false"),
        SolidityType::Base("address") => Some("newAddress(0, 0)"),
        SolidityType::Base(_) => None,
    }
}

/// Name of the message type generated for a function: first character
/// upper-cased, the rest lower-cased (`setX` becomes `Setx`).
pub fn message_name(function_name: &str) -> String {
    let mut chars = function_name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Rewrites a Solidity function body into Tact statements.
///
/// `msg.sender` becomes `sender()`, state variables are qualified with
/// `self.` and parameters with `msg.`. String literals and member names
/// after a `.` are left alone. `require(...)` passes through unchanged since
/// Tact has the same built-in.
pub fn convert_function_body(body: &str, state_variables: &[StateVariable], params: &[Param]) -> String {
    let body = body.trim();
    let state_names: HashSet<&str> = state_variables.iter().map(|v| v.name.as_str()).collect();
    let param_names: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();

    let tokens = match SolidityParser::parse(Rule::body_text, body) {
        Ok(mut pairs) => match pairs.next() {
            Some(text) => text.into_inner(),
            None => return body.to_string(),
        },
        Err(err) => {
            warn!(%err, "could not tokenize function body, emitting it unchanged");
            return body.to_string();
        }
    };

    let mut output = String::with_capacity(body.len() + 16);
    for token in tokens {
        match token.as_rule() {
            Rule::caller => output.push_str("sender()"),
            Rule::body_word => {
                let word = token.as_str();
                if state_names.contains(word) {
                    output.push_str("self.");
                } else if param_names.contains(word) {
                    output.push_str("msg.");
                }
                output.push_str(word);
            }
            _ => output.push_str(token.as_str()),
        }
    }
    output
}
