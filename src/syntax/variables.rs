//! Variables table elements
//!
//! The variable type is decided by the declaration sigil alone:
//! `$` scalar, `@` list, `&` dictionary, anything else is invalid. A scalar
//! with several values becomes a ScalarAsList depending on the
//! [`ScalarValuePolicy`] in effect.

use super::file::{ElementId, RobotFile, TokenId};
use super::table::ModelElement;
use crate::parser::recognizer::declaration_type_of;
use crate::parser::{RobotTokenType as T, ScalarValuePolicy};

/// Classification of a Variables table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Scalar,
    ScalarAsList,
    List,
    Dictionary,
    /// Declaration without a recognized sigil-and-brace shape
    Invalid,
}

impl VariableType {
    /// Classify a declaration cell by its sigil
    pub fn from_declaration(text: &str) -> Self {
        match declaration_type_of(text) {
            Some(T::VARIABLES_SCALAR_DECLARATION) => Self::Scalar,
            Some(T::VARIABLES_LIST_DECLARATION) => Self::List,
            Some(T::VARIABLES_DICTIONARY_DECLARATION) => Self::Dictionary,
            _ => Self::Invalid,
        }
    }

    pub fn declaration_type(self) -> T {
        match self {
            Self::Scalar => T::VARIABLES_SCALAR_DECLARATION,
            Self::ScalarAsList => T::VARIABLES_SCALAR_AS_LIST_DECLARATION,
            Self::List => T::VARIABLES_LIST_DECLARATION,
            Self::Dictionary => T::VARIABLES_DICTIONARY_DECLARATION,
            Self::Invalid => T::VARIABLES_UNKNOWN_DECLARATION,
        }
    }

    pub fn sigil(self) -> Option<char> {
        match self {
            Self::Scalar | Self::ScalarAsList => Some('$'),
            Self::List => Some('@'),
            Self::Dictionary => Some('&'),
            Self::Invalid => None,
        }
    }
}

/// Scalar vs ScalarAsList for a `$` declaration with `value_count` values
pub fn classify_scalar(value_count: usize, policy: ScalarValuePolicy) -> VariableType {
    match policy {
        ScalarValuePolicy::MultipleValuesAsList if value_count > 1 => VariableType::ScalarAsList,
        _ => VariableType::Scalar,
    }
}

/// A `key=value` item of a dictionary variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryItem<'a> {
    pub raw: TokenId,
    pub key: &'a str,
    /// `None` when the item has no `=`
    pub value: Option<&'a str>,
}

/// Split a dictionary item at the first `=` not escaped with a backslash
pub fn split_key_value(text: &str) -> (&str, Option<&str>) {
    let bytes = text.as_bytes();
    let mut escaped = false;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'\\' => escaped = !escaped,
            b'=' if !escaped => return (&text[..i], Some(&text[i + 1..])),
            _ => escaped = false,
        }
    }
    (text, None)
}

/// One entry of the Variables table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    id: ElementId,
    kind: VariableType,
    declaration: TokenId,
    values: Vec<TokenId>,
    comment: Vec<TokenId>,
}

impl Variable {
    pub fn new(id: ElementId, kind: VariableType, declaration: TokenId) -> Self {
        Self {
            id,
            kind,
            declaration,
            values: Vec::new(),
            comment: Vec::new(),
        }
    }

    pub fn kind(&self) -> VariableType {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: VariableType) {
        self.kind = kind;
    }

    pub fn declaration(&self) -> TokenId {
        self.declaration
    }

    /// Values in source order; dictionary items are kept unsplit
    pub fn values(&self) -> &[TokenId] {
        &self.values
    }

    pub fn comment(&self) -> &[TokenId] {
        &self.comment
    }

    pub fn add_value(&mut self, token: TokenId) {
        self.values.push(token);
    }

    pub fn insert_value(&mut self, index: usize, token: TokenId) {
        let index = index.min(self.values.len());
        self.values.insert(index, token);
    }

    pub fn remove_value(&mut self, token: TokenId) -> bool {
        let before = self.values.len();
        self.values.retain(|t| *t != token);
        before != self.values.len()
    }

    pub fn add_comment_part(&mut self, token: TokenId) {
        self.comment.push(token);
    }

    /// Whether the variable exists in source.
    ///
    /// Invalid variables are always present so they survive round trips.
    pub fn is_present(&self, file: &RobotFile) -> bool {
        match self.kind {
            VariableType::Invalid => true,
            _ => !file.token(self.declaration).raw().is_empty(),
        }
    }

    /// Name without sigil and braces (`${a b}=` → `a b`)
    pub fn name<'f>(&self, file: &'f RobotFile) -> &'f str {
        let text = file.text(self.declaration).trim();
        if self.kind == VariableType::Invalid {
            return text;
        }
        let text = text.trim_end_matches('=').trim_end();
        text.get(1..)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('{'))
            .map(|rest| rest.strip_suffix('}').unwrap_or(rest))
            .unwrap_or(text)
    }

    /// Key/value items of a dictionary variable
    pub fn items<'f>(&self, file: &'f RobotFile) -> Vec<DictionaryItem<'f>> {
        if self.kind != VariableType::Dictionary {
            return Vec::new();
        }
        self.values
            .iter()
            .map(|id| {
                let (key, value) = split_key_value(file.text(*id));
                DictionaryItem {
                    raw: *id,
                    key,
                    value,
                }
            })
            .collect()
    }
}

impl ModelElement for Variable {
    fn id(&self) -> ElementId {
        self.id
    }

    fn collect_tokens(&self, out: &mut Vec<TokenId>) {
        out.push(self.declaration);
        out.extend(&self.values);
        out.extend(&self.comment);
    }
}
