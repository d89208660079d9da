use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::error::{Result, TranspileError};
use crate::transpiler::ast::*;

#[derive(Parser)]
#[grammar = "parser/solidity.pest"]
pub struct SolidityParser;

/// Qualifiers that may follow a type without changing its base type.
pub const TYPE_QUALIFIERS: [&str; 4] = ["memory", "storage", "calldata", "payable"];

/// Extracts the structural model of the first interface in `source`, or of
/// the first contract when the source declares no interface.
pub fn parse(source: &str) -> Result<ContractModel> {
    let code = strip_comments(source);
    let unit = SolidityParser::parse(Rule::source_unit, &code)
        .map_err(|e| TranspileError::Grammar(e.to_string()))?
        .next()
        .ok_or(TranspileError::NoDeclarationFound)?;

    let mut interface = None;
    let mut contract = None;
    for pair in unit.into_inner() {
        match pair.as_rule() {
            Rule::interface_declaration if interface.is_none() => interface = Some(pair),
            Rule::contract_declaration if contract.is_none() => contract = Some(pair),
            _ => {}
        }
    }

    let model = match (interface, contract) {
        (Some(declaration), _) => parse_interface(declaration),
        (None, Some(declaration)) => parse_contract(declaration),
        (None, None) => return Err(TranspileError::NoDeclarationFound),
    };

    debug!(
        name = %model.name,
        kind = ?model.kind,
        state_variables = model.state_variables.len(),
        functions = model.functions.len(),
        "extracted contract model"
    );
    Ok(model)
}

/// Removes the license line, the `pragma solidity` directive, then line
/// comments, then block comments. Later passes must not see text removed by
/// earlier ones, so the order is fixed. Comment markers inside string
/// literals are left alone.
pub fn strip_comments(source: &str) -> String {
    static PASSES: OnceLock<[Regex; 4]> = OnceLock::new();
    let passes = PASSES.get_or_init(|| {
        const QUOTED: &str = r#"(?P<quoted>"(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*')"#;
        [
            Regex::new(r"//[ \t]*SPDX-License-Identifier:[^\n]*\n?").expect("valid regex"),
            Regex::new(r"pragma[ \t]+solidity[^\n]*\n?").expect("valid regex"),
            Regex::new(&format!(r"{}|//[^\n]*", QUOTED)).expect("valid regex"),
            Regex::new(&format!(r"{}|(?s:/\*.*?\*/)", QUOTED)).expect("valid regex"),
        ]
    });

    let mut code = source.to_string();
    for pass in passes {
        code = pass
            .replace_all(&code, |caps: &Captures| {
                caps.name("quoted")
                    .map(|quoted| quoted.as_str().to_string())
                    .unwrap_or_default()
            })
            .into_owned();
    }
    code
}

fn parse_interface(pair: Pair<Rule>) -> ContractModel {
    let mut model = ContractModel::new(String::new(), ContractKind::Interface);

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::identifier => model.name = item.as_str().to_string(),
            Rule::interface_body => {
                for member in item.into_inner() {
                    if member.as_rule() == Rule::function_definition {
                        let mut function = parse_function(member);
                        function.visibility = Visibility::External;
                        function.body = None;
                        function.modifiers.clear();
                        debug!(function = %function.name, "found interface function");
                        model.functions.push(function);
                    }
                }
            }
            _ => {}
        }
    }

    model
}

fn parse_contract(pair: Pair<Rule>) -> ContractModel {
    let mut model = ContractModel::new(String::new(), ContractKind::Contract);

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::identifier => model.name = item.as_str().to_string(),
            Rule::contract_body => {
                for member in item.into_inner() {
                    match member.as_rule() {
                        Rule::state_variable => {
                            let var = parse_state_variable(member);
                            debug!(variable = %var.name, ty = %var.type_name, "found state variable");
                            model.state_variables.push(var);
                        }
                        Rule::function_definition => {
                            let function = parse_function(member);
                            debug!(
                                function = %function.name,
                                visibility = %function.visibility,
                                "found function definition"
                            );
                            model.functions.push(function);
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    model
}

fn parse_state_variable(pair: Pair<Rule>) -> StateVariable {
    let mut var = StateVariable {
        type_name: String::new(),
        name: String::new(),
        initial_value: None,
        visibility: None,
        is_constant: false,
        is_immutable: false,
    };

    for token in pair.into_inner() {
        match token.as_rule() {
            Rule::type_name => var.type_name = render_type(token),
            Rule::state_qualifier => match token.as_str() {
                "constant" => var.is_constant = true,
                "immutable" => var.is_immutable = true,
                keyword => {
                    if var.visibility.is_none() {
                        var.visibility = keyword.parse::<Visibility>().ok();
                    }
                }
            },
            Rule::identifier => var.name = token.as_str().to_string(),
            Rule::initializer => var.initial_value = Some(token.as_str().trim().to_string()),
            _ => {}
        }
    }

    var
}

/// Renders a `type_name` with normalised spacing, so
/// `mapping (address=>uint)` becomes `mapping(address => uint)`.
fn render_type(pair: Pair<Rule>) -> String {
    let Some(inner) = pair.into_inner().next() else {
        return String::new();
    };

    match inner.as_rule() {
        Rule::mapping_type => {
            let types: Vec<String> = inner
                .into_inner()
                .filter(|p| p.as_rule() == Rule::type_name)
                .map(render_type)
                .collect();
            match types.as_slice() {
                [key, value] => format!("mapping({} => {})", key, value),
                _ => String::new(),
            }
        }
        _ => inner.as_str().to_string(),
    }
}

fn parse_function(pair: Pair<Rule>) -> FunctionSig {
    let mut function = FunctionSig {
        name: String::new(),
        params: Vec::new(),
        visibility: Visibility::default(),
        mutability: None,
        return_type: None,
        body: None,
        modifiers: Vec::new(),
    };
    let mut visibility = None;

    for token in pair.into_inner() {
        match token.as_rule() {
            Rule::identifier if function.name.is_empty() => {
                function.name = token.as_str().to_string();
            }
            Rule::parameter_list => {
                function.params = parse_parameters(token.as_str());
            }
            Rule::visibility if visibility.is_none() => {
                visibility = token.as_str().parse::<Visibility>().ok();
            }
            Rule::mutability if function.mutability.is_none() => {
                function.mutability = token.as_str().parse::<Mutability>().ok();
            }
            Rule::returns_clause => {
                if let Some(list) = token.into_inner().find(|p| p.as_rule() == Rule::return_list) {
                    function.return_type = parse_return_type(list.as_str());
                }
            }
            Rule::block => {
                let raw = token
                    .into_inner()
                    .next()
                    .map(|body| body.as_str())
                    .unwrap_or_default();
                function.modifiers = extract_modifiers(raw);
                function.body = Some(raw.trim().to_string());
            }
            _ => {}
        }
    }

    function.visibility = visibility.unwrap_or_default();
    function
}

/// Splits a raw parameter list on commas. Segments without a name are
/// reported and dropped; empty segments are dropped silently.
pub fn parse_parameters(raw: &str) -> Vec<Param> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| match parse_parameter(segment) {
            Ok(param) => Some(param),
            Err(err) => {
                warn!(%err, "skipping parameter");
                None
            }
        })
        .collect()
}

pub fn parse_parameter(segment: &str) -> Result<Param> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    match tokens.split_last() {
        Some((name, type_tokens)) if !type_tokens.is_empty() => Ok(Param {
            type_name: type_tokens.join(" "),
            name: name.to_string(),
        }),
        _ => Err(TranspileError::MalformedParameter {
            segment: segment.to_string(),
        }),
    }
}

/// Reduces a raw returns clause to a single base type name.
///
/// Only the first returned value is kept. Within it, `memory`, `storage`,
/// `calldata` and `payable` are dropped and the first remaining token is the
/// type, so `(string memory)` gives `string` and `(uint256 total)` gives
/// `uint256`. Later values of a tuple return are ignored.
pub fn parse_return_type(raw: &str) -> Option<String> {
    let first = raw.split(',').next()?.trim();
    first
        .split_whitespace()
        .find(|token| !TYPE_QUALIFIERS.contains(token))
        .map(str::to_string)
}

pub fn extract_modifiers(body: &str) -> Vec<String> {
    static MODIFIER: OnceLock<Regex> = OnceLock::new();
    let pattern = MODIFIER.get_or_init(|| Regex::new(r"\bmodifier\s+(\w+)").expect("valid regex"));

    pattern
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}
