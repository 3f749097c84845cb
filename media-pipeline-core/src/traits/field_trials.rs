use std::collections::HashMap;

/// Read access to experiment flags ("field trials").
pub trait FieldTrialsView: Send + Sync {
    /// Group name configured for `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;

    fn is_enabled(&self, key: &str) -> bool {
        self.lookup(key)
            .is_some_and(|group| group.starts_with("Enabled"))
    }

    fn is_disabled(&self, key: &str) -> bool {
        self.lookup(key)
            .is_some_and(|group| group.starts_with("Disabled"))
    }
}

/// Field trials parsed from a `Name/Group/Name/Group/` string.
#[derive(Debug, Clone, Default)]
pub struct FieldTrials {
    groups: HashMap<String, String>,
}

impl FieldTrials {
    /// Parse a trial string. Malformed trailing entries are ignored.
    pub fn parse(trials: &str) -> Self {
        let mut groups = HashMap::new();
        let mut parts = trials.split('/');
        while let (Some(name), Some(group)) = (parts.next(), parts.next()) {
            if name.is_empty() {
                continue;
            }
            groups.insert(name.to_string(), group.to_string());
        }
        Self { groups }
    }
}

impl FieldTrialsView for FieldTrials {
    fn lookup(&self, key: &str) -> Option<String> {
        self.groups.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_trials() {
        let trials = FieldTrials::parse("A/Enabled/B/Disabled/C/Enabled-100/");
        assert!(trials.is_enabled("A"));
        assert!(trials.is_disabled("B"));
        assert!(trials.is_enabled("C"));
        assert_eq!(trials.lookup("C").as_deref(), Some("Enabled-100"));
        assert!(!trials.is_enabled("D"));
    }

    #[test]
    fn empty_and_dangling_input() {
        assert!(FieldTrials::parse("").lookup("A").is_none());
        assert!(FieldTrials::parse("A").lookup("A").is_none());
    }
}
