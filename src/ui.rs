//! Score display sink

/// Receives the score text whenever it changes
pub trait ScoreDisplay {
    fn set_text(&mut self, value: &str);
}

/// Keeps the last text it was given
#[derive(Debug, Clone)]
pub struct ScoreText {
    text: String,
    updates: u32,
}

impl Default for ScoreText {
    fn default() -> Self {
        Self {
            text: "0".to_string(),
            updates: 0,
        }
    }
}

impl ScoreText {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of times the text was set
    pub fn updates(&self) -> u32 {
        self.updates
    }
}

impl ScoreDisplay for ScoreText {
    fn set_text(&mut self, value: &str) {
        self.text.clear();
        self.text.push_str(value);
        self.updates += 1;
    }
}
