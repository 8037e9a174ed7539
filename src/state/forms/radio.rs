//! Radio groups: options sharing a name, at most one checked

/// Direction of a keyboard step inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// A single radio input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioOption {
    /// Input id, e.g. `sexo-M`
    pub id: String,
    pub value: String,
    pub label: String,
}

impl RadioOption {
    pub fn new(id: &str, value: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Set of radio inputs sharing a group name.
///
/// Invariant: `checked` is `None` or a valid index into `options`.
#[derive(Debug, Clone)]
pub struct RadioGroup {
    pub name: String,
    pub options: Vec<RadioOption>,
    focused: usize,
    checked: Option<usize>,
}

impl RadioGroup {
    pub fn new(name: &str, options: Vec<RadioOption>) -> Self {
        Self {
            name: name.to_string(),
            options,
            focused: 0,
            checked: None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn checked(&self) -> Option<usize> {
        self.checked
    }

    pub fn checked_option(&self) -> Option<&RadioOption> {
        self.checked.and_then(|i| self.options.get(i))
    }

    pub fn checked_value(&self) -> Option<&str> {
        self.checked_option().map(|o| o.value.as_str())
    }

    /// Move focus to `index` without checking it
    #[cfg(test)]
    pub fn focus(&mut self, index: usize) {
        if index < self.options.len() {
            self.focused = index;
        }
    }

    /// Check the option at `index`, unchecking any other
    pub fn check(&mut self, index: usize) {
        if index < self.options.len() {
            self.checked = Some(index);
        }
    }

    /// Check the option holding `value`; returns false when no option matches
    pub fn check_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(index) => {
                self.check(index);
                self.focused = index;
                true
            }
            None => false,
        }
    }

    /// Move focus one option in `direction` (wrapping) and check it.
    ///
    /// Returns the newly focused index, or `None` for an empty group.
    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        let count = self.options.len();
        if count == 0 {
            return None;
        }
        let next = match direction {
            Direction::Next => (self.focused + 1) % count,
            Direction::Previous => (self.focused + count - 1) % count,
        };
        self.focused = next;
        self.checked = Some(next);
        Some(next)
    }

    /// Uncheck every option and put focus back on the first one
    pub fn reset(&mut self) {
        self.focused = 0;
        self.checked = None;
    }
}
