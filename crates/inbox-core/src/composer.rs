//! Shared composer buffer.
//!
//! The copilot panel writes into it ("add to composer"); the message box
//! reads it and it is cleared whenever a message is appended.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    content: String,
}

impl Composer {
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the buffer.
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// True when the buffer holds nothing worth sending.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_content() {
        let mut composer = Composer::default();
        composer.set("draft one");
        composer.set("draft two");
        assert_eq!(composer.content(), "draft two");
    }

    #[test]
    fn test_blank_detection() {
        let mut composer = Composer::default();
        assert!(composer.is_blank());
        composer.set("  \n ");
        assert!(composer.is_blank());
        composer.set("hi");
        assert!(!composer.is_blank());
        composer.clear();
        assert_eq!(composer.content(), "");
    }
}
