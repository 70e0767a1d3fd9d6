//! @ai:module:intent Define the paired opener/closer delimiters that may wrap an annotation
//! @ai:module:layer domain
//! @ai:module:public_api Wrapper
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Delimiter pair that can bracket an annotation message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Wrapper {
    /// CriticMarkup comment: `{>> ... <<}`
    Critic,
    /// `( ... )`
    Paren,
    /// `[ ... ]`, not enabled by default
    Bracket,
}

impl Wrapper {
    pub const ALL: [Wrapper; 3] = [Wrapper::Critic, Wrapper::Paren, Wrapper::Bracket];

    /// @ai:effects pure
    pub fn opener(&self) -> &'static str {
        match self {
            Wrapper::Critic => "{>>",
            Wrapper::Paren => "(",
            Wrapper::Bracket => "[",
        }
    }

    /// @ai:effects pure
    pub fn closer(&self) -> &'static str {
        match self {
            Wrapper::Critic => "<<}",
            Wrapper::Paren => ")",
            Wrapper::Bracket => "]",
        }
    }

    /// @ai:intent Regex fragment matching the opener and any whitespace after it
    /// @ai:effects pure
    pub fn opener_pattern(&self) -> String {
        format!(r"{}\s*", regex::escape(self.opener()))
    }

    /// @ai:intent Resolve the wrapper from captured opener text
    /// @ai:example ("{>> ") -> Some(Critic)
    /// @ai:example ("") -> None
    /// @ai:effects pure
    pub fn from_opener(text: &str) -> Option<Wrapper> {
        Self::ALL.into_iter().find(|w| text.starts_with(w.opener()))
    }
}
