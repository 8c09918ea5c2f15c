//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Translation stores
//!
//! [`Dictionary`] is what the .po reader feeds: it takes singular and plural
//! translations and carries the charset the translations are stored in.
//! [`MessageCatalog`] is the in-memory implementation.

use std::collections::BTreeMap;

/// Receiver of parsed translations
pub trait Dictionary {
    /// Charset translations are stored in; empty when not chosen yet
    fn charset(&self) -> &str;

    fn set_charset(&mut self, charset: &str);

    fn add_translation(&mut self, msgid: Vec<u8>, msgstr: Vec<u8>);

    fn add_plural_translation(
        &mut self,
        msgid: Vec<u8>,
        msgid_plural: Vec<u8>,
        msgstrs: BTreeMap<usize, Vec<u8>>,
    );
}

impl<D: Dictionary + ?Sized> Dictionary for &mut D {
    fn charset(&self) -> &str {
        (**self).charset()
    }

    fn set_charset(&mut self, charset: &str) {
        (**self).set_charset(charset)
    }

    fn add_translation(&mut self, msgid: Vec<u8>, msgstr: Vec<u8>) {
        (**self).add_translation(msgid, msgstr)
    }

    fn add_plural_translation(
        &mut self,
        msgid: Vec<u8>,
        msgid_plural: Vec<u8>,
        msgstrs: BTreeMap<usize, Vec<u8>>,
    ) {
        (**self).add_plural_translation(msgid, msgid_plural, msgstrs)
    }
}

/// In-memory message catalog
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    /// Character set
    pub charset: String,
    /// Map from msgid to msgstr (singular messages)
    pub messages: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Map from (msgid, msgid_plural) to the plural forms by index
    pub plural_messages: BTreeMap<(Vec<u8>, Vec<u8>), BTreeMap<usize, Vec<u8>>>,
}

impl MessageCatalog {
    /// Create a new empty message catalog with no charset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog whose translations are converted to `charset`
    pub fn with_charset(charset: &str) -> Self {
        MessageCatalog {
            charset: charset.to_string(),
            ..Self::default()
        }
    }

    /// Look up a singular message
    pub fn gettext(&self, msgid: &[u8]) -> Option<&[u8]> {
        self.messages.get(msgid).map(|s| s.as_slice())
    }

    /// Look up plural form `index` of a plural message
    pub fn ngettext(&self, msgid: &[u8], msgid_plural: &[u8], index: usize) -> Option<&[u8]> {
        let key = (msgid.to_vec(), msgid_plural.to_vec());
        self.plural_messages
            .get(&key)
            .and_then(|forms| forms.get(&index))
            .map(|s| s.as_slice())
    }

    /// Number of entries, singular and plural
    pub fn len(&self) -> usize {
        self.messages.len() + self.plural_messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.plural_messages.is_empty()
    }
}

impl Dictionary for MessageCatalog {
    fn charset(&self) -> &str {
        &self.charset
    }

    fn set_charset(&mut self, charset: &str) {
        self.charset = charset.to_string();
    }

    fn add_translation(&mut self, msgid: Vec<u8>, msgstr: Vec<u8>) {
        self.messages.insert(msgid, msgstr);
    }

    fn add_plural_translation(
        &mut self,
        msgid: Vec<u8>,
        msgid_plural: Vec<u8>,
        msgstrs: BTreeMap<usize, Vec<u8>>,
    ) {
        self.plural_messages.insert((msgid, msgid_plural), msgstrs);
    }
}
