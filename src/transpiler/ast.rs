use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Structural model of one Solidity interface or contract.
///
/// Expressions and bodies are kept as raw source text; nothing below the
/// declaration level is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractModel {
    pub name: String,
    pub kind: ContractKind,
    pub state_variables: Vec<StateVariable>,
    pub functions: Vec<FunctionSig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractKind {
    Interface,
    Contract,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateVariable {
    /// Raw Solidity type, e.g. `uint256`, `address[]` or `mapping(address => uint256)`.
    pub type_name: String,
    pub name: String,
    pub initial_value: Option<String>,
    /// First visibility keyword of the declaration, if any.
    pub visibility: Option<Visibility>,
    pub is_constant: bool,
    pub is_immutable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSig {
    pub name: String,
    pub params: Vec<Param>,
    pub visibility: Visibility,
    pub mutability: Option<Mutability>,
    pub return_type: Option<String>,
    /// Text between the function's braces; `None` for bodiless declarations.
    pub body: Option<String>,
    /// Names following a `modifier` keyword inside the body.
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub type_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    External,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Pure,
    View,
    Payable,
}

impl ContractModel {
    pub fn new(name: impl Into<String>, kind: ContractKind) -> Self {
        ContractModel {
            name: name.into(),
            kind,
            state_variables: Vec::new(),
            functions: Vec::new(),
        }
    }
}

impl FunctionSig {
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "external" => Ok(Visibility::External),
            "internal" => Ok(Visibility::Internal),
            other => Err(format!("unknown visibility `{}`", other)),
        }
    }
}

impl FromStr for Mutability {
    type Err = String;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "pure" => Ok(Mutability::Pure),
            "view" => Ok(Mutability::View),
            "payable" => Ok(Mutability::Payable),
            other => Err(format!("unknown state mutability `{}`", other)),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::External => "external",
            Visibility::Internal => "internal",
        };
        write!(f, "{}", keyword)
    }
}
