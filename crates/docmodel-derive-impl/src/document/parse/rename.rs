// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Wire naming rules for `#[document(rename_all = "...")]`.
//!
//! | Value | `shop_id` becomes | `BankTransfer` becomes |
//! |-------|-------------------|------------------------|
//! | `camelCase` | `shopId` | `bankTransfer` |
//! | `snake_case` | `shop_id` | `bank_transfer` |
//! | `PascalCase` | `ShopId` | `BankTransfer` |
//! | `SCREAMING_SNAKE_CASE` | `SHOP_ID` | `BANK_TRANSFER` |
//! | `kebab-case` | `shop-id` | `bank-transfer` |
//! | `lowercase` | `shop_id` | `banktransfer` |
//! | `UPPERCASE` | `SHOP_ID` | `BANKTRANSFER` |

use convert_case::{Case, Casing};
use darling::FromMeta;

/// Rule applied to member and variant names without an explicit rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `shopId`
    Camel,
    /// `shop_id`
    Snake,
    /// `ShopId`
    Pascal,
    /// `SHOP_ID`
    ScreamingSnake,
    /// `shop-id`
    Kebab,
    /// Plain lowercase, separators kept.
    Lower,
    /// Plain uppercase, separators kept.
    Upper
}

impl RenameRule {
    /// Apply the rule to a member or variant name.
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Camel => name.to_case(Case::Camel),
            Self::Snake => name.to_case(Case::Snake),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::ScreamingSnake => name.to_case(Case::Constant),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    /// Parse the rule from its serde-style spelling.
    ///
    /// Spellings are case-sensitive, so `camelcase` is rejected rather than
    /// guessed.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "PascalCase" => Ok(Self::Pascal),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
