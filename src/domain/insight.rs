/// Markdown summary generated from a single analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub markdown: String,
}

impl Insight {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }
}
