// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enum variant parsing.
//!
//! A variant is either a unit variant or a single-field tuple variant
//! wrapping a derived document:
//!
//! ```rust,ignore
//! enum Status { Active, #[variant(rename = "gone")] Archived }
//! enum Payment { Card(CardPayment), BankTransfer(BankPayment) }
//! ```

use syn::{Fields, Ident, LitStr, Type, Variant};

use super::RenameRule;

/// One enum variant.
#[derive(Debug)]
pub struct VariantDef {
    /// Variant identifier.
    pub ident: Ident,

    /// Wire name, or discriminator value for tagged enums.
    pub wire: String,

    /// Wrapped document type; `None` for unit variants.
    pub inner: Option<Type>
}

impl VariantDef {
    /// Parse a variant.
    ///
    /// # Errors
    ///
    /// - malformed `#[variant(...)]`
    /// - named fields, or more than one unnamed field
    pub fn from_variant(variant: &Variant, rule: Option<RenameRule>) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();

        let mut rename = None;
        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("variant")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `rename`"))
                }
            });
            if let Err(error) = parsed {
                errors.push(error.into());
            }
        }

        let inner = match &variant.fields {
            Fields::Unit => None,
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                fields.unnamed.first().map(|field| field.ty.clone())
            }
            _ => {
                errors.push(
                    darling::Error::custom(
                        "variants must be unit variants or wrap exactly one document"
                    )
                    .with_span(variant)
                );
                None
            }
        };

        let name = variant.ident.to_string();
        let wire = match (rename, rule) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&name),
            (None, None) => name
        };

        errors.finish_with(Self {
            ident: variant.ident.clone(),
            wire,
            inner
        })
    }

    /// Unit variant.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        self.inner.is_none()
    }
}
