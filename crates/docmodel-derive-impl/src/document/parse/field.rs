// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[id]` | identifier, wire name `_id` unless renamed |
//! | `#[field(rename = "x")]` | explicit wire name |
//! | `#[field(default)]` | `Default::default()` when absent |
//! | `#[field(default = "path")]` | `path()` when absent |
//! | `#[field(skip)]` | not stored |
//! | `#[field(flatten)]` | base document spliced in |
//!
//! Several `#[field(...)]` attributes on one field are merged.

use syn::{Attribute, Field, Ident, LitStr, Type, Visibility, ext::IdentExt};

use super::RenameRule;
use crate::utils::{docs::extract_doc_comments, types::option_inner};

/// Wire name of identifier fields.
pub const ID_FIELD: &str = "_id";

/// Value used for a field missing from the input document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// Required, unless the type itself has an absent value (`Option`).
    None,
    /// `Default::default()`.
    Trait,
    /// Call the named function.
    Path(syn::Path)
}

/// Options collected from `#[field(...)]`.
#[derive(Debug, Default)]
struct FieldOptions {
    rename:  Option<String>,
    default: Option<FieldDefault>,
    skip:    bool,
    flatten: bool
}

impl FieldOptions {
    fn merge(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                self.rename = Some(value.value());
            } else if meta.path.is_ident("default") {
                if meta.input.peek(syn::Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    self.default = Some(FieldDefault::Path(value.parse()?));
                } else {
                    self.default = Some(FieldDefault::Trait);
                }
            } else if meta.path.is_ident("skip") {
                self.skip = true;
            } else if meta.path.is_ident("flatten") {
                self.flatten = true;
            } else {
                return Err(meta.error("expected `rename`, `default`, `skip` or `flatten`"));
            }
            Ok(())
        })
    }
}

/// One named struct field.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier, possibly raw (`r#type`).
    pub ident: Ident,

    /// Field visibility, inherited by the path accessor.
    pub vis: Visibility,

    /// Declared type.
    pub ty: Type,

    /// Member name without the raw prefix.
    pub member: String,

    /// Key in the stored document.
    pub wire: String,

    /// Marked with `#[id]`.
    pub is_id: bool,

    /// Missing-value policy.
    pub default: FieldDefault,

    /// Not stored.
    pub skip: bool,

    /// Base document spliced into this one.
    pub flatten: bool,

    /// Doc comment, copied to the path accessor.
    pub doc: Option<String>
}

impl FieldDef {
    /// Parse a named field.
    ///
    /// # Errors
    ///
    /// - malformed `#[field(...)]` or `#[id]`
    /// - `#[id]` combined with `skip` or `flatten`
    /// - `flatten` combined with `rename`, `default` or `skip`
    pub fn from_field(field: &Field, rule: Option<RenameRule>) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("document fields must be named").with_span(field)
        })?;

        let mut errors = darling::Error::accumulator();
        let mut options = FieldOptions::default();
        let mut id_attr: Option<&Attribute> = None;

        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                if let Err(error) = attr.meta.require_path_only() {
                    errors.push(error.into());
                }
                id_attr = Some(attr);
            } else if attr.path().is_ident("field")
                && let Err(error) = options.merge(attr)
            {
                errors.push(error.into());
            }
        }

        if let Some(attr) = id_attr {
            if options.skip {
                errors.push(
                    darling::Error::custom("`#[id]` cannot be combined with `skip`").with_span(attr)
                );
            }
            if options.flatten {
                errors.push(
                    darling::Error::custom("`#[id]` cannot be combined with `flatten`")
                        .with_span(attr)
                );
            }
        }
        if options.flatten
            && (options.rename.is_some() || options.default.is_some() || options.skip)
        {
            errors.push(
                darling::Error::custom(
                    "`flatten` cannot be combined with `rename`, `default` or `skip`"
                )
                .with_span(&ident)
            );
        }

        let member = ident.unraw().to_string();
        let is_id = id_attr.is_some();
        let wire = match (&options.rename, is_id, rule) {
            (Some(rename), _, _) => rename.clone(),
            (None, true, _) => ID_FIELD.to_owned(),
            (None, false, Some(rule)) => rule.apply(&member),
            (None, false, None) => member.clone()
        };

        errors.finish_with(Self {
            vis: field.vis.clone(),
            ty: field.ty.clone(),
            doc: extract_doc_comments(&field.attrs),
            ident,
            member,
            wire,
            is_id,
            default: options.default.unwrap_or(FieldDefault::None),
            skip: options.skip,
            flatten: options.flatten
        })
    }

    /// Stored under `_id`, by annotation or by name.
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        !self.skip && !self.flatten && (self.is_id || self.wire == ID_FIELD)
    }

    /// Identifier type of an `Option<I>` identifier field.
    ///
    /// Only these fields are generated on encode and assigned back; a
    /// non-optional identifier is always present.
    #[must_use]
    pub fn generated_identifier(&self) -> Option<&Type> {
        if self.is_identifier() {
            option_inner(&self.ty)
        } else {
            None
        }
    }

    /// Part of the stored document, directly or through a base.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        !self.skip
    }

    /// Own stored field, with a wire name and a path accessor.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.skip && !self.flatten
    }
}
