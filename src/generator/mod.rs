use crate::transpiler::ast::{ContractKind, ContractModel, FunctionSig, StateVariable};
use crate::transpiler::converter::{
    convert_function_body, convert_solidity_type, default_value, message_name,
};

pub const STDLIB_IMPORT: &str = "import \"@stdlib/deploy\";";

const INDENT: &str = "    ";
const BODY_INDENT: &str = "        ";

/// Renders Tact source for a structural model. Total: every model renders.
pub fn generate(model: ContractModel) -> String {
    let mut output = String::new();
    output.push_str(STDLIB_IMPORT);
    output.push_str("\n\n");

    match model.kind {
        ContractKind::Interface => output.push_str(&generate_interface(&model)),
        ContractKind::Contract => output.push_str(&generate_contract(&model)),
    }

    output
}

fn generate_interface(model: &ContractModel) -> String {
    let mut output = format!("trait {} {{\n", model.name);

    for (index, func) in model.functions.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&generate_interface_function(func));
    }

    output.push_str("}\n");
    output
}

fn generate_interface_function(func: &FunctionSig) -> String {
    let return_type = func
        .return_type
        .as_deref()
        .map(convert_solidity_type)
        .unwrap_or_else(|| "Bool".to_string());

    format!(
        "{}fun {}({}): {};\n",
        INDENT,
        func.name,
        generate_parameters(func),
        return_type
    )
}

fn generate_parameters(func: &FunctionSig) -> String {
    func.params
        .iter()
        .map(|p| format!("{}: {}", p.name, convert_solidity_type(&p.type_name)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn generate_contract(model: &ContractModel) -> String {
    let mut output = String::new();

    // Message types first: one per function that takes parameters
    for func in model.functions.iter().filter(|f| f.has_params()) {
        output.push_str(&generate_message_type(func));
        output.push('\n');
    }

    output.push_str(&format!("contract {} with Deployable {{\n", model.name));

    for var in &model.state_variables {
        output.push_str(&generate_state_variable(var));
    }
    if !model.state_variables.is_empty() {
        output.push('\n');
    }

    output.push_str(&generate_init(&model.state_variables));

    for func in &model.functions {
        output.push('\n');
        output.push_str(&generate_contract_function(func, &model.state_variables));
    }

    output.push_str("}\n");
    output
}

fn generate_message_type(func: &FunctionSig) -> String {
    let mut output = format!("message {} {{\n", message_name(&func.name));
    for param in &func.params {
        output.push_str(&format!(
            "{}{}: {};\n",
            INDENT,
            param.name,
            convert_solidity_type(&param.type_name)
        ));
    }
    output.push_str("}\n");
    output
}

fn generate_state_variable(var: &StateVariable) -> String {
    let initializer = var
        .initial_value
        .as_deref()
        .map(|value| format!(" = {}", value))
        .unwrap_or_default();

    format!(
        "{}{}: {}{};\n",
        INDENT,
        var.name,
        convert_solidity_type(&var.type_name),
        initializer
    )
}

/// `init()` assigns defaults only to variables without an initializer.
fn generate_init(state_variables: &[StateVariable]) -> String {
    let mut output = format!("{}init() {{\n", INDENT);

    for var in state_variables.iter().filter(|v| v.initial_value.is_none()) {
        if let Some(value) = default_value(&var.type_name) {
            output.push_str(&format!("{}self.{} = {};\n", BODY_INDENT, var.name, value));
        }
    }

    output.push_str(&format!("{}}}\n", INDENT));
    output
}

fn generate_contract_function(func: &FunctionSig, state_variables: &[StateVariable]) -> String {
    let body = func.body.as_deref().filter(|b| !b.trim().is_empty());
    let mut output = String::new();

    if func.has_params() {
        output.push_str(&format!(
            "{}receive(msg: {}) {{\n",
            INDENT,
            message_name(&func.name)
        ));
        if let Some(body) = body {
            let converted = convert_function_body(body, state_variables, &func.params);
            output.push_str(&indent_lines(&converted, BODY_INDENT));
        }
    } else {
        let return_type = func
            .return_type
            .as_deref()
            .map(convert_solidity_type)
            .unwrap_or_else(|| "Int".to_string());
        output.push_str(&format!(
            "{}get fun {}(): {} {{\n",
            INDENT, func.name, return_type
        ));
        match body {
            Some(body) => {
                let converted = convert_function_body(body, state_variables, &[]);
                output.push_str(&indent_lines(&converted, BODY_INDENT));
            }
            None => {
                output.push_str(&format!("{}return 0; // Implementation needed\n", BODY_INDENT));
            }
        }
    }

    output.push_str(&format!("{}}}\n", INDENT));
    output
}

/// Re-indents a body: the common indentation of the continuation lines is
/// removed and every non-blank line is prefixed with `indent`.
fn indent_lines(body: &str, indent: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let common = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut output = String::new();
    for (index, line) in lines.iter().enumerate() {
        let line = if index == 0 {
            line.trim_start()
        } else {
            line.get(common..).unwrap_or_else(|| line.trim_start())
        };
        let line = line.trim_end();
        if !line.is_empty() {
            output.push_str(indent);
            output.push_str(line);
        }
        output.push('\n');
    }
    output
}
