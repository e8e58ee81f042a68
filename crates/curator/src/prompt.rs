//! Prompt rendering for the curated (LLM) recommendation path.
//!
//! The wording is configuration, not logic: any template text may be used as
//! long as it contains the placeholders it needs. Recognized placeholders:
//!
//! - `{age}`: listener age
//! - `{genre}`: requested genre or artist, or [`DEFAULT_GENRE`] when blank
//! - `{count}`: number of songs to ask for
//! - `{language_instruction}`: what language to write `reason` in

use crate::error::PromptError;
use encoder::{MAX_AGE, MIN_AGE};
use std::fs;
use std::path::Path;

/// Genre used when the listener leaves the field blank.
pub const DEFAULT_GENRE: &str = "the most popular music worldwide right now";

/// Songs requested per prompt unless configured otherwise.
pub const DEFAULT_SONG_COUNT: usize = 3;

/// Built-in template asking for a bare JSON object.
pub const DEFAULT_TEMPLATE: &str = r#"You are a professional music curator. Recommend {count} songs in the '{genre}' genre for a {age}-year-old listener.
Try to suggest different songs every time you are asked.

Your reply must be a single JSON object that follows the schema below.
Do not include any other text; return only the JSON.

JSON schema:
{
  "recommendations": [
    {
      "title": "song title",
      "artist": "artist name",
      "reason": "{language_instruction}"
    }
  ]
}"#;

/// What the listener asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub age: u32,
    /// Genre or artist; blank means "no preference".
    pub genre: String,
    /// Output language for `reason`; `None` lets the model choose.
    pub language: Option<String>,
}

impl PromptRequest {
    /// Build a request; blank languages collapse to `None`.
    pub fn new(age: u32, genre: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            age,
            genre: genre.into(),
            language: language
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        }
    }

    fn genre_text(&self) -> &str {
        let genre = self.genre.trim();
        if genre.is_empty() { DEFAULT_GENRE } else { genre }
    }

    fn language_instruction(&self) -> String {
        match &self.language {
            Some(language) => format!("Write the reason in detail in {language}."),
            None => "Write the reason in whichever language fits best.".to_string(),
        }
    }
}

/// A prompt template with a configured song count.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
    count: usize,
}

impl PromptTemplate {
    /// Use the given template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            count: DEFAULT_SONG_COUNT,
        }
    }

    /// Read template text from a file.
    pub fn from_file(path: &Path) -> Result<Self, PromptError> {
        let text = fs::read_to_string(path).map_err(|source| PromptError::TemplateIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(text))
    }

    /// Configure how many songs to request (default: 3)
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Fill in the placeholders for one request.
    pub fn render(&self, request: &PromptRequest) -> Result<String, PromptError> {
        if !(MIN_AGE..=MAX_AGE).contains(&request.age) {
            return Err(PromptError::AgeOutOfRange {
                age: request.age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        if self.count == 0 {
            return Err(PromptError::InvalidCount);
        }

        Ok(self
            .text
            .replace("{age}", &request.age.to_string())
            .replace("{genre}", request.genre_text())
            .replace("{count}", &self.count.to_string())
            .replace("{language_instruction}", &request.language_instruction()))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
