// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! Doc comments on fields are carried over to the generated path accessors,
//! so `fields::<Shop>().name()` shows the same documentation as
//! `Shop::name` in the IDE.
//!
//! # Doc Comment Format
//!
//! Doc comments (`///` and `/** */`) are stored as `#[doc = "..."]`
//! attributes. This module joins and trims them.

use syn::Attribute;

/// Extract doc comments from attributes.
///
/// Combines all `#[doc = "..."]` attributes into a single string,
/// trimming each line.
///
/// # Returns
///
/// Combined doc string, or `None` if no doc comments present.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .collect();

    let combined = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = combined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn joins_lines() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[doc = " Display name."]),
            parse_quote!(#[doc = ""]),
            parse_quote!(#[doc = " Unique per city."]),
        ];
        assert_eq!(
            extract_doc_comments(&attrs).as_deref(),
            Some("Display name.\n\nUnique per city.")
        );
    }

    #[test]
    fn ignores_other_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[field(rename = "n")])];
        assert_eq!(extract_doc_comments(&attrs), None);
    }

    #[test]
    fn blank_docs_are_none() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "   "])];
        assert_eq!(extract_doc_comments(&attrs), None);
    }
}
