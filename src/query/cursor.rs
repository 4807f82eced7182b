//! Clause accumulation shared by the query builders.

use crate::error::ValidationError;

/// Accumulated clauses plus the single clause currently being edited.
///
/// Opening a new clause flushes the open one into `filters`, or into
/// `must_not` when it was negated. Flushing moves the clause, so it can never
/// be recorded twice.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClauseCursor<C> {
    pub(crate) filters: Vec<C>,
    pub(crate) must_not: Vec<C>,
    current: Option<C>,
    negate_current: bool,
}

impl<C> Default for ClauseCursor<C> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            must_not: Vec::new(),
            current: None,
            negate_current: false,
        }
    }
}

impl<C> ClauseCursor<C> {
    /// Flushes the open clause and opens `clause` in its place.
    pub(crate) fn open(&mut self, clause: C) {
        self.flush();
        self.current = Some(clause);
    }

    /// Moves the open clause, if any, into its list.
    pub(crate) fn flush(&mut self) {
        if let Some(clause) = self.current.take() {
            if self.negate_current {
                self.must_not.push(clause);
            } else {
                self.filters.push(clause);
            }
        }
        self.negate_current = false;
    }

    /// Negates the open clause. Without an open clause this does nothing.
    pub(crate) fn negate(&mut self) {
        if self.current.is_some() {
            self.negate_current = true;
        }
    }

    /// Returns the open clause.
    ///
    /// # Panics
    ///
    /// Panics if no clause is open; `operator` names the offending call.
    pub(crate) fn current_mut(&mut self, operator: &'static str) -> &mut C {
        match self.current.as_mut() {
            Some(clause) => clause,
            None => panic!("{}", ValidationError::ClauseNotOpen { operator }),
        }
    }
}

/// Trims `field`.
///
/// # Panics
///
/// Panics if `field` is blank.
pub(crate) fn require_field(field: &str) -> String {
    let field = field.trim();
    assert!(!field.is_empty(), "{}", ValidationError::BlankField);
    field.to_string()
}
