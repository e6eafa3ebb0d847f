//! Tables and the element trait shared by all table entries

use super::file::{ElementId, TableKind, TokenId};

/// Behaviour shared by every top-level table element
pub trait ModelElement {
    fn id(&self) -> ElementId;

    /// Push every token the element owns, sub-elements included
    fn collect_tokens(&self, out: &mut Vec<TokenId>);

    /// Whether `id` names one of this element's sub-elements
    fn contains_child(&self, _id: ElementId) -> bool {
        false
    }
}

/// A `*** ... ***` section header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub kind: TableKind,
    pub declaration: TokenId,
    /// Extra header cells (column names)
    pub columns: Vec<TokenId>,
    pub comment: Vec<TokenId>,
    /// Index of the header line in the file
    pub line: usize,
}

/// An ordered list of elements plus the headers that opened the section
#[derive(Debug, Clone)]
pub struct Table<E> {
    headers: Vec<TableHeader>,
    elements: Vec<E>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            elements: Vec::new(),
        }
    }
}

impl<E: ModelElement> Table<E> {
    /// A table is present once its header appeared
    pub fn is_present(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn headers(&self) -> &[TableHeader] {
        &self.headers
    }

    pub(crate) fn add_header(&mut self, header: TableHeader) {
        self.headers.push(header);
    }

    pub(crate) fn last_header_mut(&mut self) -> Option<&mut TableHeader> {
        self.headers.last_mut()
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&E> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut E> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn last(&self) -> Option<&E> {
        self.elements.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut E> {
        self.elements.last_mut()
    }

    pub fn push(&mut self, element: E) {
        self.elements.push(element);
    }

    pub fn insert(&mut self, index: usize, element: E) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<E> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Swap an element with its predecessor
    pub fn move_up(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.elements.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swap an element with its successor
    pub fn move_down(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }
}

impl<'a, E: ModelElement> IntoIterator for &'a Table<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
