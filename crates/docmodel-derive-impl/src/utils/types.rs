// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type inspection helpers.

use syn::{GenericArgument, PathArguments, Type};

/// Inner type of `Option<T>`.
///
/// Matches on the last path segment, so `Option<T>`,
/// `std::option::Option<T>` and `core::option::Option<T>` are all
/// recognized. A type alias hiding `Option` is not.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first() {
        Some(GenericArgument::Type(inner)) if arguments.args.len() == 1 => Some(inner),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn finds_option_inner() {
        let ty: Type = parse_quote!(Option<Id<Shop>>);
        let inner: Type = parse_quote!(Id<Shop>);
        assert_eq!(option_inner(&ty), Some(&inner));
    }

    #[test]
    fn qualified_option() {
        let ty: Type = parse_quote!(::std::option::Option<String>);
        let inner: Type = parse_quote!(String);
        assert_eq!(option_inner(&ty), Some(&inner));
    }

    #[test]
    fn non_option() {
        assert!(option_inner(&parse_quote!(String)).is_none());
        assert!(option_inner(&parse_quote!(Vec<Option<String>>)).is_none());
        assert!(option_inner(&parse_quote!(&'static str)).is_none());
    }
}
