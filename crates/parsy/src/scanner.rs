//! Long-option extraction over a mutable token vector.
//!
//! Recognized value forms for a long key `name`:
//! - `--name value` (the value token is taken only if it does not start with `-`)
//! - `--name=value`
//! - `--name` with no usable value (nothing is extracted or removed)
//!
//! Known gaps: in [`MatchMode::Prefix`] the key is matched as a literal prefix,
//! so `name` also matches `--namespace` (and then extracts nothing, since the
//! glued `--namevalue` form is reserved). Grouped short options (`-abc`) and a
//! short option glued to its value (`-ofoo`) are not recognized; short keys are
//! never scanned.

/// How a long key is matched against the text after `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The key only has to be a prefix of the token text.
    #[default]
    Prefix,
    /// The key must be followed by end-of-token or `=`.
    Exact,
}

/// What a matched long-option token supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// `--key value`; both tokens were removed.
    Separate(String),
    /// `--key=value`; the key token was removed.
    Inline(String),
    /// `--key` with no qualifying value token; nothing was removed.
    Bare,
    /// `--keyrest`; reserved form, nothing was removed.
    Glued,
}

impl Extraction {
    /// The captured value, if this form supplies one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Separate(v) | Self::Inline(v) => Some(v.as_str()),
            Self::Bare | Self::Glued => None,
        }
    }

    fn form(&self) -> &'static str {
        match self {
            Self::Separate(_) => "separate",
            Self::Inline(_) => "inline",
            Self::Bare => "bare",
            Self::Glued => "glued",
        }
    }
}

/// Whether `token` looks like an option (starts with `-`).
pub fn is_option(token: &str) -> bool {
    token.starts_with('-')
}

/// Whether `name` is a valid short option name: one ASCII alphanumeric char.
pub fn is_option_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
}

/// Holds the working token vector while long keys are extracted from it.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    tokens: Vec<String>,
    mode: MatchMode,
}

impl Scanner {
    /// Build a scanner over `tokens`, dropping empty tokens.
    pub fn new<I, S>(tokens: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.is_empty())
            .collect();
        Self { tokens, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The tokens not consumed so far, in their original relative order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// Locate the first token matching `key`, returning its index and the
    /// text following the key.
    pub fn find_long(&self, key: &str) -> Option<(usize, &str)> {
        if key.is_empty() {
            return None;
        }
        self.tokens
            .iter()
            .enumerate()
            .find_map(|(idx, token)| long_rest(token, key, self.mode).map(|rest| (idx, rest)))
    }

    /// Extract the value for `key`, removing the consumed tokens.
    ///
    /// Returns `None` when no token matches.
    pub fn extract_long(&mut self, key: &str) -> Option<Extraction> {
        let (idx, rest) = self.find_long(key)?;

        let extraction = if rest.is_empty() {
            let takes_next = self.tokens.get(idx + 1).is_some_and(|next| !is_option(next));
            if takes_next {
                let value = self.tokens.remove(idx + 1);
                self.tokens.remove(idx);
                Extraction::Separate(value)
            } else {
                Extraction::Bare
            }
        } else if let Some(value) = rest.strip_prefix('=') {
            let value = value.to_string();
            self.tokens.remove(idx);
            Extraction::Inline(value)
        } else {
            Extraction::Glued
        };

        tracing::trace!(key, index = idx, form = extraction.form(), "matched long option");
        Some(extraction)
    }
}

/// The text after `--key` if `token` matches `key` under `mode`.
fn long_rest<'t>(token: &'t str, key: &str, mode: MatchMode) -> Option<&'t str> {
    let body = token.strip_prefix("--")?;
    if !body.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let rest = body.strip_prefix(key)?;
    match mode {
        MatchMode::Prefix => Some(rest),
        MatchMode::Exact if rest.is_empty() || rest.starts_with('=') => Some(rest),
        MatchMode::Exact => None,
    }
}
