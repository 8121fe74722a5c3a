//! Naming policy for declarations and the identifiers derived from them.

use quote::format_ident;
use syn::Ident;

use crate::error::{CompileError, ErrorKind, Location, Result};

/// Suffix every declaration type name must carry.
pub const DECLARATION_SUFFIX: &str = "Declaration";

/// Shortest accepted declaration type name: the suffix plus a one-character machine name.
pub const MIN_TYPE_NAME_LEN: usize = DECLARATION_SUFFIX.len() + 1;

/// Checks a requested declaration type name against the naming policy.
pub fn verify_type_name(name: &str, location: &Location) -> Result<()> {
    if !name.ends_with(DECLARATION_SUFFIX) || name.len() < MIN_TYPE_NAME_LEN {
        return Err(CompileError::new(
            ErrorKind::NamingPolicy {
                name: name.to_owned(),
                min: MIN_TYPE_NAME_LEN,
            },
            location.clone(),
        ));
    }
    Ok(())
}

/// Derives the machine name from a declaration type name.
///
/// `CbmDeclaration` becomes `Cbm`.
pub fn machine_name(type_name: &str, location: &Location) -> Result<String> {
    verify_type_name(type_name, location)?;
    Ok(type_name
        .strip_suffix(DECLARATION_SUFFIX)
        .unwrap_or(type_name)
        .to_owned())
}

/// File name of the generated artifact: `lowercase(machine) + ".fsm.rs"`.
pub fn file_name(machine: &str) -> String {
    format!("{}.fsm.rs", machine.to_lowercase())
}

/// Convert PascalCase or camelCase to snake_case.
///
/// `HalfOpened` becomes `half_opened`, `HTTPRequest` becomes `http_request`.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let prev_is_lowercase = prev.is_some_and(|c| c.is_lowercase() || c.is_ascii_digit());
            let prev_is_upper = prev.is_some_and(|c| c.is_uppercase());
            let prev_is_underscore = prev == Some(&'_');
            let next_is_lowercase = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            // Boundary after a lowercase run, or at the last capital of an acronym.
            if i > 0 && !prev_is_underscore && (prev_is_lowercase || (prev_is_upper && next_is_lowercase)) {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// `[Machine]State`
pub fn state_enum_ident(machine: &Ident) -> Ident {
    format_ident!("{}State", machine)
}

/// `[Machine][State]Event`
pub fn event_enum_ident(machine: &Ident, state: &Ident) -> Ident {
    format_ident!("{}{}Event", machine, state)
}

/// `[Machine]Operator`
pub fn operator_ident(machine: &Ident) -> Ident {
    format_ident!("{}Operator", machine)
}

/// `[Machine]AsyncOperator`
pub fn async_operator_ident(machine: &Ident) -> Ident {
    format_ident!("{}AsyncOperator", machine)
}

/// Associated items of the generated state enum. A state variant with one of
/// these names would shadow or be shadowed by the item.
pub const RESERVED_STATE_NAMES: &[&str] = &["ALL", "as_str", "is_terminal"];

/// Associated items of the generated event enums.
pub const RESERVED_EVENT_NAMES: &[&str] = &["as_str", "target"];

/// Handler method name for a state: `operate_[snake_case(state)]`.
pub fn handler_name(state: &str) -> String {
    format!("operate_{}", to_snake_case(state))
}
