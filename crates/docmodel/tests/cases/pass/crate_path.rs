// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod runtime {
    pub use docmodel::*;
}

use docmodel::Document;

#[derive(Debug, Clone, PartialEq, Document)]
#[document(crate = "crate::runtime", rename_all = "kebab-case")]
pub struct Setting {
    pub key_name: String,
    pub enabled: bool
}

fn main() {
    let value = Setting {
        key_name: "dark-mode".to_owned(),
        enabled:  true
    };
    let document = runtime::encode(&value).unwrap().into_document();
    assert_eq!(document.get_str("key-name").unwrap(), "dark-mode");
    assert_eq!(runtime::decode::<Setting>(&document).unwrap(), value);
}
