/// Room membership as seen by one client

/// Ordered, duplicate-free list of usernames
///
/// Order is arrival order and only matters for display.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole roster, keeping the given order
    ///
    /// Repeated names are kept at their first position only.
    pub fn apply_snapshot<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.clear();
        for name in names {
            self.apply_join(name);
        }
    }

    /// Appends `name` unless already present, returning whether it was added
    pub fn apply_join(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            false
        } else {
            self.names.push(name);
            true
        }
    }

    /// Removes `name` if present, returning whether it was removed
    pub fn apply_part(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
