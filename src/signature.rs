//! Type-signature compilation.
//!
//! A column header declares its field type as a compact signature string:
//!
//! - base scalars: `int`, `float`, `double`, `string`, `bool`, `comment`
//! - lists: a trailing `[]`, nestable (`int[]`, `int[][]`, `t<Vector>[]`)
//! - tuples: comma-separated parts (`string,int,bool[]`)
//! - custom types: `t<Name>`, enums: `e<Name>`, resolved against a [`Registry`]
//! - optionality: a trailing `?` on any of the above
//!
//! [`compile_signature`] turns a signature into an immutable [`TypeNode`]
//! tree, compiled once per column and then reused for every data row.
//!
//! ## Grammar precedence
//!
//! The rules are tried in strict order, first match wins: tuple, list,
//! enum/custom nest, base scalar. The tuple split is a flat single-level
//! split on `,`; the signature grammar keeps list nesting unambiguous with
//! trailing `[]` markers, so tuple parts never contain commas themselves.
//!
//! One tuple special case: when the split yields exactly two parts and the
//! last is `?`, the signature is not a tuple at all but a single optional
//! type (`string,?` is an optional `string`).
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{compile_signature, Registry, TypeKind};
//!
//! let node = compile_signature("int[]?", &Registry::new()).unwrap();
//! assert_eq!(node.kind, TypeKind::List);
//! assert!(node.optional);
//! assert_eq!(node.children[0].kind, TypeKind::Int);
//! ```

use serde::Serialize;
use std::collections::HashSet;

use crate::{Error, Result};

/// The closed set of type kinds a signature can compile to.
///
/// `Custom` and `Enum` carry the registered name extracted from the
/// signature (`t<Vector>` compiles to `Custom("Vector")`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Int,
    Float,
    Double,
    String,
    Bool,
    Comment,
    List,
    Tuple,
    Custom(String),
    Enum(String),
}

/// The compiled representation of one type signature.
///
/// Trees are immutable once built: compile a column's signature once, then
/// convert arbitrarily many rows (or share across threads) without
/// synchronization.
///
/// Structural invariants upheld by [`compile_signature`]: a `List` node has
/// exactly one child (the element type), a `Tuple` node has at least one
/// order-significant child, scalar and `Enum`/`Custom` nodes have none.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeNode {
    pub kind: TypeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TypeNode>,
    pub optional: bool,
}

impl TypeNode {
    /// Creates a required leaf node of the given kind.
    #[must_use]
    pub fn leaf(kind: TypeKind) -> Self {
        TypeNode {
            kind,
            children: Vec::new(),
            optional: false,
        }
    }

    /// Creates a required list node over the given element type.
    #[must_use]
    pub fn list_of(element: TypeNode) -> Self {
        TypeNode {
            kind: TypeKind::List,
            children: vec![element],
            optional: false,
        }
    }

    /// Creates a required tuple node over the given slot types.
    #[must_use]
    pub fn tuple_of(slots: Vec<TypeNode>) -> Self {
        TypeNode {
            kind: TypeKind::Tuple,
            children: slots,
            optional: false,
        }
    }

    /// Marks this node optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Known enum and custom-type names, consulted while compiling `e<...>` and
/// `t<...>` signatures.
///
/// Each set is independent and independently optional: when a set is absent
/// the corresponding registration check is skipped entirely, when present a
/// name missing from it is a hard [`Error::UnregisteredType`].
///
/// # Examples
///
/// ```rust
/// use gridcast::{compile_signature, Registry};
///
/// let registry = Registry::new().with_enums(["Rarity"]);
/// assert!(compile_signature("e<Rarity>", &registry).is_ok());
/// assert!(compile_signature("e<Quality>", &registry).is_err());
/// // No custom-type set supplied, so any name passes.
/// assert!(compile_signature("t<Vector>", &registry).is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    enums: Option<HashSet<String>>,
    custom_types: Option<HashSet<String>>,
}

impl Registry {
    /// Creates a registry with no sets; all registration checks are skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the set of registered enum names.
    #[must_use]
    pub fn with_enums<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Supplies the set of registered custom-type names.
    #[must_use]
    pub fn with_custom_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_types = Some(names.into_iter().map(Into::into).collect());
        self
    }

    fn enum_registered(&self, name: &str) -> bool {
        self.enums.as_ref().map_or(true, |set| set.contains(name))
    }

    fn custom_registered(&self, name: &str) -> bool {
        self.custom_types
            .as_ref()
            .map_or(true, |set| set.contains(name))
    }
}

const NAME_FORBIDDEN: &[char] = &[',', '[', ']', '<', '>', ';'];

/// Compiles a signature string into a [`TypeNode`] tree.
///
/// Pure function of the signature text and the registry; surrounding
/// whitespace is trimmed before matching, and tuple parts are trimmed as
/// they are extracted.
///
/// # Examples
///
/// ```rust
/// use gridcast::{compile_signature, Registry, TypeKind};
///
/// let registry = Registry::new();
///
/// let node = compile_signature("string,?", &registry).unwrap();
/// // Two parts where the last is `?` collapse to a single optional type.
/// assert_eq!(node.kind, TypeKind::String);
/// assert!(node.optional);
///
/// let node = compile_signature("string,int,bool[]", &registry).unwrap();
/// assert_eq!(node.kind, TypeKind::Tuple);
/// assert_eq!(node.children.len(), 3);
/// ```
///
/// # Errors
///
/// - [`Error::InvalidSignature`] when no grammar rule matches, an `e<>`/`t<>`
///   name is empty or contains one of `, [ ] < > ;`, or a tuple has no parts.
/// - [`Error::UnregisteredType`] when a name is absent from a supplied
///   registry set.
pub fn compile_signature(signature: &str, registry: &Registry) -> Result<TypeNode> {
    compile(signature, false, registry)
}

fn compile(signature: &str, pre_optional: bool, registry: &Registry) -> Result<TypeNode> {
    let signature = signature.trim();

    // Tuple syntax has the highest precedence.
    if signature.contains(',') {
        let parts: Vec<&str> = signature.split(',').filter(|p| !p.is_empty()).collect();
        let optional = parts.last().map(|p| p.trim()) == Some("?");
        // `x,?` is a single optional type, not a tuple.
        if parts.len() == 2 && optional {
            return compile(parts[0], true, registry);
        }
        let mut children = Vec::new();
        for part in &parts {
            if part.trim() == "?" {
                continue;
            }
            children.push(compile(part, false, registry)?);
        }
        if children.is_empty() {
            return Err(Error::invalid_signature(signature));
        }
        return Ok(TypeNode {
            kind: TypeKind::Tuple,
            children,
            optional: pre_optional || optional,
        });
    }

    // List syntax: trailing `[]` or `[]?`.
    if signature.ends_with("[]") || signature.ends_with("[]?") {
        let optional = signature.ends_with('?');
        let inner = &signature[..signature.len() - if optional { 3 } else { 2 }];
        let element = compile(inner, false, registry)?;
        return Ok(TypeNode {
            kind: TypeKind::List,
            children: vec![element],
            optional: pre_optional || optional,
        });
    }

    // Enum/custom nest: `e<Name>` or `t<Name>`, optionally suffixed `?`.
    if signature.ends_with('>') || signature.ends_with(">?") {
        let optional = signature.ends_with('?');
        let body = signature.strip_suffix('?').unwrap_or(signature);
        let (is_enum, name) = if let Some(rest) = body.strip_prefix("e<") {
            (true, rest.strip_suffix('>').unwrap_or(""))
        } else if let Some(rest) = body.strip_prefix("t<") {
            (false, rest.strip_suffix('>').unwrap_or(""))
        } else {
            return Err(Error::invalid_signature(signature));
        };

        if name.is_empty() || name.contains(NAME_FORBIDDEN) {
            return Err(Error::invalid_signature(signature));
        }

        let kind = if is_enum {
            if !registry.enum_registered(name) {
                return Err(Error::unregistered("enum", name));
            }
            TypeKind::Enum(name.to_string())
        } else {
            if !registry.custom_registered(name) {
                return Err(Error::unregistered("custom", name));
            }
            TypeKind::Custom(name.to_string())
        };
        return Ok(TypeNode {
            kind,
            children: Vec::new(),
            optional: pre_optional || optional,
        });
    }

    // Base scalars, with an optional `?` suffix.
    let (base, optional) = match signature.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (signature, false),
    };
    let kind = match base {
        "int" => Some(TypeKind::Int),
        "float" => Some(TypeKind::Float),
        "double" => Some(TypeKind::Double),
        "string" => Some(TypeKind::String),
        "bool" => Some(TypeKind::Bool),
        "comment" => Some(TypeKind::Comment),
        _ => None,
    };
    match kind {
        Some(kind) => Ok(TypeNode {
            kind,
            children: Vec::new(),
            optional: pre_optional || optional,
        }),
        None => Err(Error::invalid_signature(signature)),
    }
}
