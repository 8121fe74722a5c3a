//! Declaration extractor: one state skeleton per declared field.

use syn::Ident;

use crate::error::{CompileError, ErrorKind, Location, Result};
use crate::source::Declaration;

/// A state before its annotation has been parsed.
#[derive(Debug, Clone)]
pub struct StateSkeleton {
    pub name: Ident,
    /// Raw annotation text; `None` when the field carries no annotation.
    pub annotation: Option<String>,
    /// Where the annotation (or the field, if there is none) was declared.
    pub location: Location,
}

/// Walks the field list of a declaration in order.
///
/// Fails when the declaration has no fields, when a field does not declare
/// exactly one plain (non-raw) name, or when a field's annotation is not a
/// single string literal.
pub fn extract(decl: &Declaration) -> Result<Vec<StateSkeleton>> {
    if decl.fields.is_empty() {
        return Err(CompileError::new(
            ErrorKind::NoFields {
                name: decl.name.to_string(),
            },
            decl.location.clone(),
        ));
    }

    decl.fields
        .iter()
        .map(|field| {
            let [name] = field.names.as_slice() else {
                return Err(CompileError::new(
                    ErrorKind::MalformedField {
                        names: field.names.iter().map(ToString::to_string).collect(),
                    },
                    field.location.clone(),
                ));
            };
            if let Some(plain) = name.to_string().strip_prefix("r#") {
                return Err(CompileError::new(
                    ErrorKind::RawStateName {
                        state: plain.to_owned(),
                    },
                    field.location.clone(),
                ));
            }

            match field.annotations.as_slice() {
                [] => Ok(StateSkeleton {
                    name: name.clone(),
                    annotation: None,
                    location: field.location.clone(),
                }),
                [annotation] => {
                    let text = annotation.value.clone().ok_or_else(|| {
                        malformed(name, "annotation must be a string literal", &annotation.location)
                    })?;
                    Ok(StateSkeleton {
                        name: name.clone(),
                        annotation: Some(text),
                        location: annotation.location.clone(),
                    })
                }
                [_, second, ..] => Err(malformed(
                    name,
                    "state carries more than one `on` annotation",
                    &second.location,
                )),
            }
        })
        .collect()
}

fn malformed(state: &Ident, reason: &'static str, location: &Location) -> CompileError {
    CompileError::new(
        ErrorKind::MalformedAnnotation {
            state: state.to_string(),
            entry: String::new(),
            reason,
        },
        location.clone(),
    )
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;

    use super::*;
    use crate::source::{DeclaredField, Introspect};

    fn declaration(item: syn::ItemStruct) -> Declaration {
        item.introspect().unwrap()
    }

    #[test]
    fn one_skeleton_per_field() {
        let decl = declaration(syn::parse_quote! {
            struct CbmDeclaration {
                #[on = r#"Try:"Closed""#]
                Opened: (),
                Closed: (),
            }
        });
        let states = extract(&decl).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].name, "Opened");
        assert_eq!(states[0].annotation.as_deref(), Some(r#"Try:"Closed""#));
        assert_eq!(states[1].name, "Closed");
        assert!(states[1].annotation.is_none());
    }

    #[test]
    fn zero_fields_is_fatal() {
        let decl = declaration(syn::parse_quote! { struct EmptyDeclaration {} });
        let err = extract(&decl).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::NoFields {
                name: "EmptyDeclaration".into()
            }
        );

        let decl = declaration(syn::parse_quote! { struct UnitDeclaration; });
        assert!(matches!(extract(&decl).unwrap_err().kind(), ErrorKind::NoFields { .. }));
    }

    #[test]
    fn unnamed_field_is_fatal() {
        let decl = declaration(syn::parse_quote! { struct PairDeclaration(()); });
        let err = extract(&decl).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedField { names: vec![] });
    }

    #[test]
    fn field_with_several_names_is_fatal() {
        let decl = Declaration {
            name: Ident::new("PairDeclaration", Span::call_site()),
            fields: vec![DeclaredField {
                names: vec![
                    Ident::new("Left", Span::call_site()),
                    Ident::new("Right", Span::call_site()),
                ],
                annotations: Vec::new(),
                location: Location::call_site(),
            }],
            location: Location::call_site(),
        };
        let err = extract(&decl).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::MalformedField {
                names: vec!["Left".into(), "Right".into()]
            }
        );
    }

    #[test]
    fn raw_state_name_is_rejected() {
        let decl = declaration(syn::parse_quote! {
            struct KwDeclaration {
                #[on = r#"Go:"Done""#]
                r#type: (),
                Done: (),
            }
        });
        let err = extract(&decl).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::RawStateName {
                state: "type".into()
            }
        );
    }

    #[test]
    fn annotation_must_be_single_string_literal() {
        let decl = declaration(syn::parse_quote! {
            struct XDeclaration {
                #[on = r#"Go:"B""#]
                #[on = r#"Back:"A""#]
                A: (),
                B: (),
            }
        });
        assert!(matches!(
            extract(&decl).unwrap_err().kind(),
            ErrorKind::MalformedAnnotation { state, .. } if state == "A"
        ));

        let decl = declaration(syn::parse_quote! {
            struct XDeclaration {
                #[on = 42]
                A: (),
            }
        });
        assert!(matches!(
            extract(&decl).unwrap_err().kind(),
            ErrorKind::MalformedAnnotation { reason, .. } if reason.contains("string literal")
        ));
    }
}
