use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use eventcheck::error::LookupError;
use eventcheck::reconcile::{IdentityInfo, IdentityLookup, IdentityMatches, Reachability};

/// In-memory identity source. Matches case-insensitively, like the real one.
pub struct FakeLookup {
    known: Vec<IdentityInfo>,
    fail_first: Cell<usize>,
    failure: fn() -> LookupError,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl FakeLookup {
    pub fn new(known: &[(&str, &str)]) -> Self {
        Self {
            known: known
                .iter()
                .map(|(handle, name)| IdentityInfo {
                    handle: handle.to_string(),
                    display_name: name.to_string(),
                })
                .collect(),
            fail_first: Cell::new(0),
            failure: || LookupError::Transport("connection reset".to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Fail the next `n` calls with `failure`.
    pub fn failing(mut self, n: usize, failure: fn() -> LookupError) -> Self {
        self.fail_first = Cell::new(n);
        self.failure = failure;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl IdentityLookup for FakeLookup {
    fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError> {
        self.calls.borrow_mut().push(handles.to_vec());

        if self.fail_first.get() > 0 {
            self.fail_first.set(self.fail_first.get() - 1);
            return Err((self.failure)());
        }

        Ok(self
            .known
            .iter()
            .filter(|k| handles.iter().any(|h| h.eq_ignore_ascii_case(&k.handle)))
            .cloned()
            .collect())
    }
}

pub struct FakeReachability {
    reachable: HashSet<String>,
}

impl FakeReachability {
    pub fn new(reachable: &[&str]) -> Self {
        Self {
            reachable: reachable.iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl Reachability for FakeReachability {
    fn is_reachable(&self, url: &str) -> bool {
        self.reachable.contains(url)
    }
}
