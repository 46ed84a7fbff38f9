use rand::seq::SliceRandom;
use rand::Rng;

const INITIAL_MESSAGES: [&str; 7] = [
    "Initial commit",
    "Initialize project structure",
    "Setup project boilerplate",
    "First commit",
    "Create basic project structure",
    "Start new project",
    "Set up repository",
];

const DOC_MESSAGES: [&str; 10] = [
    "Update documentation",
    "Improve README clarity",
    "Add installation instructions",
    "Update usage examples",
    "Fix typo in documentation",
    "Add section on advanced usage",
    "Document new feature",
    "Update API documentation",
    "Add contributing guidelines",
    "Update changelog",
];

const FINAL_MESSAGES: [&str; 7] = [
    "Final adjustments",
    "Clean up code before pushing",
    "Fix minor issues",
    "Apply code review feedback",
    "Prepare for deployment",
    "Ready for release",
    "Final tweaks before merge",
];

const CODE_MESSAGES: [&str; 25] = [
    "Update functionality",
    "Refactor code for better readability",
    "Optimize performance",
    "Fix bug in error handling",
    "Improve code structure",
    "Add new feature",
    "Fix edge case",
    "Implement requested changes",
    "Clean up code formatting",
    "Improve error messages",
    "Add better comments",
    "Refactor utility functions",
    "Remove deprecated code",
    "Add unit tests",
    "Fix linting issues",
    "Improve logging",
    "Update dependencies",
    "Add error handling",
    "Implement feedback from code review",
    "Fix security vulnerability",
    "Update API endpoint",
    "Add new helper method",
    "Make code more maintainable",
    "Simplify complex logic",
    "Fix regression",
];

/// Category a commit message is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Initial,
    Docs,
    Final,
    Code,
}

impl MessageKind {
    /// Pick the category for commit `index` (0-based) of `total` touching `path`.
    ///
    /// First-of-many wins over documentation, which wins over last-of-many.
    pub fn classify(path: &str, index: usize, total: usize) -> Self {
        if index == 0 && total > 1 {
            MessageKind::Initial
        } else if is_documentation(path) {
            MessageKind::Docs
        } else if total > 1 && index == total - 1 {
            MessageKind::Final
        } else {
            MessageKind::Code
        }
    }

    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            MessageKind::Initial => &INITIAL_MESSAGES,
            MessageKind::Docs => &DOC_MESSAGES,
            MessageKind::Final => &FINAL_MESSAGES,
            MessageKind::Code => &CODE_MESSAGES,
        }
    }

    pub fn choose<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.phrases().choose(rng).copied().unwrap_or("Update")
    }
}

pub fn is_documentation(path: &str) -> bool {
    path.contains("README") || path.contains("docs/") || path.contains(".md")
}

/// Draw a commit message for commit `index` of `total` touching `path`.
pub fn commit_message<R: Rng + ?Sized>(path: &str, index: usize, total: usize, rng: &mut R) -> &'static str {
    MessageKind::classify(path, index, total).choose(rng)
}
