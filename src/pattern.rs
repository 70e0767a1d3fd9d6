//! @ai:module:intent Compile marker categories into ordered line matchers
//! @ai:module:layer domain
//! @ai:module:public_api PatternTable, LineMatch
//! @ai:module:depends_on category, wrapper, error
//! @ai:module:stateless true

use crate::category::{default_categories, MarkerCategory};
use crate::error::{Error, Result};
use crate::wrapper::Wrapper;
use regex::Regex;

/// @ai:intent A category together with its compiled matcher
#[derive(Debug, Clone)]
struct CompiledCategory {
    category: MarkerCategory,
    regex: Regex,
}

/// @ai:intent Priority-ordered, immutable set of compiled marker categories
#[derive(Debug, Clone)]
pub struct PatternTable {
    categories: Vec<CompiledCategory>,
    wrappers: Vec<Wrapper>,
}

/// @ai:intent The first category that matched a line, with its captured parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'t, 'l> {
    pub category: &'t MarkerCategory,
    /// Opener text including trailing whitespace, empty when absent
    pub opener: &'l str,
    /// Keyword exactly as written in the line
    pub keyword: &'l str,
    /// Text after the colon and its following whitespace
    pub remainder: &'l str,
    /// Byte offset of the keyword within the line
    pub keyword_start: usize,
}

impl LineMatch<'_, '_> {
    /// @ai:intent Wrapper whose opener was captured, if any
    /// @ai:effects pure
    pub fn wrapper(&self) -> Option<Wrapper> {
        Wrapper::from_opener(self.opener)
    }
}

impl PatternTable {
    /// @ai:intent Compile a table from categories and the wrappers allowed before a keyword
    /// @ai:pre every category has at least one non-empty keyword
    /// @ai:post categories keep the given priority order
    /// @ai:effects pure
    pub fn new(categories: Vec<MarkerCategory>, wrappers: Vec<Wrapper>) -> Result<Self> {
        let opener = opener_group(&wrappers);

        let categories = categories
            .into_iter()
            .map(|category| {
                let regex = compile_category(&category, &opener)?;
                Ok(CompiledCategory { category, regex })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            categories,
            wrappers,
        })
    }

    /// @ai:intent Categories in priority order
    pub fn categories(&self) -> impl Iterator<Item = &MarkerCategory> {
        self.categories.iter().map(|c| &c.category)
    }

    /// @ai:intent Wrappers recognized as openers
    pub fn wrappers(&self) -> &[Wrapper] {
        &self.wrappers
    }

    /// @ai:intent Find the highest-priority category matching a single line
    /// @ai:pre line contains no line terminator
    /// @ai:post at most one category is reported
    /// @ai:effects pure
    pub fn match_line<'t, 'l>(&'t self, line: &'l str) -> Option<LineMatch<'t, 'l>> {
        self.categories.iter().find_map(|compiled| {
            let captures = compiled.regex.captures(line)?;
            let whole = captures.get(0)?;
            let keyword = captures.name("keyword")?;
            let opener = captures.name("opener").map(|m| m.as_str()).unwrap_or("");

            Some(LineMatch {
                category: &compiled.category,
                opener,
                keyword: keyword.as_str(),
                remainder: captures.name("rest").map(|m| m.as_str()).unwrap_or(""),
                keyword_start: whole.start() + opener.len(),
            })
        })
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new(default_categories(), default_wrappers())
            .expect("built-in pattern table must compile")
    }
}

/// @ai:intent Wrappers enabled when none are configured
/// @ai:effects pure
pub fn default_wrappers() -> Vec<Wrapper> {
    vec![Wrapper::Critic, Wrapper::Paren]
}

/// @ai:intent Build the optional opener group shared by every category
/// @ai:example ([Critic, Paren]) -> r"(?P<opener>\{>>\s*|\(\s*)?"
/// @ai:example ([]) -> ""
/// @ai:effects pure
fn opener_group(wrappers: &[Wrapper]) -> String {
    if wrappers.is_empty() {
        return String::new();
    }

    let alternatives: Vec<String> = wrappers.iter().map(Wrapper::opener_pattern).collect();
    format!("(?P<opener>{})?", alternatives.join("|"))
}

/// @ai:intent Compile the matcher for one category
/// @ai:effects pure
fn compile_category(category: &MarkerCategory, opener: &str) -> Result<Regex> {
    if category.keywords.is_empty() {
        return Err(Error::InvalidPattern(format!(
            "category {} has no keywords",
            category.code
        )));
    }

    if category.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(Error::InvalidPattern(format!(
            "category {} has an empty keyword",
            category.code
        )));
    }

    let keywords: Vec<String> = category
        .keywords
        .iter()
        .map(|k| keyword_pattern(k.trim()))
        .collect();

    // Boundary and case folding are ASCII-only; the remainder stops at any line terminator.
    let pattern = format!(
        r"{}(?-u:\b)(?P<keyword>{}):\s*(?P<rest>[^\r\n\x{{2028}}\x{{2029}}]*)$",
        opener,
        keywords.join("|")
    );

    Ok(Regex::new(&pattern)?)
}

/// @ai:intent Case-insensitive fragment for one keyword, folding ASCII letters only
/// @ai:example ("TODO") -> "(?i-u:TODO)"
/// @ai:effects pure
fn keyword_pattern(keyword: &str) -> String {
    let escaped = regex::escape(keyword);
    if keyword.is_ascii() {
        format!("(?i-u:{})", escaped)
    } else {
        format!("(?i:{})", escaped)
    }
}
