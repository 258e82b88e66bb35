//! The stack of open elements.
//!
//! A plain vector of tag-name slices borrowed from the input. The top of the
//! stack is the most recently opened element that has not been closed yet.
//! Lookups search from the top and compare names ASCII case-insensitively;
//! popped names keep the case they were written with.

/// Stack of open elements, most recently opened last.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpenElementStack<'a> {
    names: Vec<&'a str>,
}

impl<'a> OpenElementStack<'a> {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// The current node: the most recently opened element still open.
    #[must_use]
    pub fn current(&self) -> Option<&'a str> {
        self.names.last().copied()
    }

    /// Whether the current node has the given name.
    #[must_use]
    pub fn current_is(&self, name: &str) -> bool {
        self.current()
            .is_some_and(|current| current.eq_ignore_ascii_case(name))
    }

    /// Push a newly opened element.
    pub fn push(&mut self, name: &'a str) {
        self.names.push(name);
    }

    /// Pop the current node.
    pub fn pop(&mut self) -> Option<&'a str> {
        self.names.pop()
    }

    /// Depth of the nearest open element named `name`, counted from the top
    /// (0 is the current node). `None` if no such element is open.
    #[must_use]
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .rev()
            .position(|open| open.eq_ignore_ascii_case(name))
    }

    /// Pop every element down to and including the nearest one named `name`,
    /// returning the popped names top first. Returns an empty vector, and
    /// leaves the stack alone, if no such element is open.
    pub fn pop_until_tag(&mut self, name: &str) -> Vec<&'a str> {
        self.depth_of(name)
            .map_or_else(Vec::new, |depth| self.pop_many(depth + 1))
    }

    /// Pop every element, top first.
    pub fn pop_all(&mut self) -> Vec<&'a str> {
        self.pop_many(self.names.len())
    }

    fn pop_many(&mut self, count: usize) -> Vec<&'a str> {
        let keep = self.names.len().saturating_sub(count);
        let mut popped = self.names.split_off(keep);
        popped.reverse();
        popped
    }

    /// Number of open elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no element is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Open element names, bottom first.
    #[must_use]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(names: &[&'static str]) -> OpenElementStack<'static> {
        let mut stack = OpenElementStack::new();
        for name in names {
            stack.push(name);
        }
        stack
    }

    #[test]
    fn test_pop_until_tag_closes_intervening_elements() {
        let mut stack = stack_of(&["html", "body", "div", "span", "b"]);
        let popped = stack.pop_until_tag("DIV");
        assert_eq!(popped, vec!["b", "span", "div"]);
        assert_eq!(stack.as_slice(), &["html", "body"]);
    }

    #[test]
    fn test_pop_until_missing_tag_is_noop() {
        let mut stack = stack_of(&["div", "p"]);
        assert!(stack.pop_until_tag("table").is_empty());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_depth_finds_nearest() {
        let stack = stack_of(&["div", "p", "div", "em"]);
        assert_eq!(stack.depth_of("div"), Some(1));
        assert_eq!(stack.depth_of("em"), Some(0));
        assert_eq!(stack.depth_of("ul"), None);
    }

    #[test]
    fn test_pop_all_is_top_first() {
        let mut stack = stack_of(&["a", "b", "c"]);
        assert_eq!(stack.pop_all(), vec!["c", "b", "a"]);
        assert!(stack.is_empty());
    }
}
