//! Declaration introspection.
//!
//! The pipeline never looks at Rust syntax directly. A front-end turns whatever
//! it parsed into a [`Declaration`]: the type name plus, per field, its names,
//! its raw `on` annotations and a source location. `syn` items implement
//! [`Introspect`] out of the box.

use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Fields, Ident, Item, Lit, Meta};

use crate::error::{CompileError, ErrorKind, Location, Result};

/// Field attribute carrying the transition annotation.
pub const ANNOTATION_ATTR: &str = "on";

/// A declaration as seen by the pipeline.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: Ident,
    pub fields: Vec<DeclaredField>,
    pub location: Location,
}

/// One field of a declaration, in declaration order.
#[derive(Debug, Clone)]
pub struct DeclaredField {
    /// Identifiers the field declares. Exactly one is valid.
    pub names: Vec<Ident>,
    /// Every `on` attribute found on the field.
    pub annotations: Vec<Annotation>,
    pub location: Location,
}

/// Raw annotation text of a field.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// `None` when the attribute value is not a string literal.
    pub value: Option<String>,
    pub location: Location,
}

/// Source of declarations.
pub trait Introspect {
    fn introspect(&self) -> Result<Declaration>;
}

impl Introspect for Declaration {
    fn introspect(&self) -> Result<Declaration> {
        Ok(self.clone())
    }
}

impl Introspect for syn::ItemStruct {
    fn introspect(&self) -> Result<Declaration> {
        Ok(Declaration {
            name: self.ident.clone(),
            fields: declared_fields(&self.fields),
            location: Location::new(self.ident.span()),
        })
    }
}

impl Introspect for syn::DeriveInput {
    fn introspect(&self) -> Result<Declaration> {
        let kind = match &self.data {
            syn::Data::Struct(data) => {
                return Ok(Declaration {
                    name: self.ident.clone(),
                    fields: declared_fields(&data.fields),
                    location: Location::new(self.ident.span()),
                });
            }
            syn::Data::Enum(_) => "an enum",
            syn::Data::Union(_) => "a union",
        };
        Err(unsupported(&self.ident, kind))
    }
}

impl Introspect for Item {
    fn introspect(&self) -> Result<Declaration> {
        let (ident, kind) = match self {
            Item::Struct(item) => return item.introspect(),
            Item::Enum(item) => (&item.ident, "an enum"),
            Item::Union(item) => (&item.ident, "a union"),
            Item::Type(item) => (&item.ident, "a type alias"),
            Item::Trait(item) => (&item.ident, "a trait"),
            Item::Fn(item) => (&item.sig.ident, "a function"),
            Item::Const(item) => (&item.ident, "a constant"),
            Item::Static(item) => (&item.ident, "a static"),
            Item::Mod(item) => (&item.ident, "a module"),
            other => {
                return Err(CompileError::new(
                    ErrorKind::UnsupportedKind {
                        name: "<unnamed>".to_owned(),
                        kind: "an unnamed item",
                    },
                    Location::new(other.span()),
                ));
            }
        };
        Err(unsupported(ident, kind))
    }
}

fn unsupported(ident: &Ident, kind: &'static str) -> CompileError {
    CompileError::new(
        ErrorKind::UnsupportedKind {
            name: ident.to_string(),
            kind,
        },
        Location::new(ident.span()),
    )
}

fn declared_fields(fields: &Fields) -> Vec<DeclaredField> {
    fields
        .iter()
        .map(|field| DeclaredField {
            names: field.ident.iter().cloned().collect(),
            annotations: field
                .attrs
                .iter()
                .filter(|attr| is_annotation(attr))
                .map(annotation)
                .collect(),
            location: Location::new(field.span()),
        })
        .collect()
}

/// Returns `true` for `#[on ...]` attributes.
pub fn is_annotation(attr: &Attribute) -> bool {
    attr.path().is_ident(ANNOTATION_ATTR)
}

fn annotation(attr: &Attribute) -> Annotation {
    let value = match &attr.meta {
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        Meta::List(list) => syn::parse2::<syn::LitStr>(list.tokens.clone())
            .ok()
            .map(|lit| lit.value()),
        Meta::Path(_) => None,
    };
    Annotation {
        value,
        location: Location::new(attr.span()),
    }
}

/// Finds a named item in a parsed file, descending into inline modules.
pub fn find_item<'a>(items: &'a [Item], name: &str) -> Option<&'a Item> {
    items.iter().find_map(|item| {
        let ident = match item {
            Item::Struct(item) => Some(&item.ident),
            Item::Enum(item) => Some(&item.ident),
            Item::Union(item) => Some(&item.ident),
            Item::Type(item) => Some(&item.ident),
            Item::Mod(module) => {
                return module
                    .content
                    .as_ref()
                    .and_then(|(_, nested)| find_item(nested, name));
            }
            _ => None,
        };
        ident.filter(|ident| *ident == name).map(|_| item)
    })
}
