/*!
 * Glob pattern matching for include/exclude filters
 *
 * Patterns follow shell `fnmatch` semantics and are matched case-sensitively
 * against the whole root-relative path: `*` matches any run of characters
 * (including `/`), `?` matches one character, and `[...]` / `[!...]` are
 * character classes. `**` is not special. Each pattern set is compiled once
 * into a [`RegexSet`] and reused for every path.
 */

use regex::{Regex, RegexSet};
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::{RepoDumpError, Result};

/// A compiled, ordered set of glob patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// Original glob strings, in the order they were given
    patterns: Vec<String>,
    /// Compiled regex for each pattern, same order
    set: RegexSet,
}

impl PatternSet {
    /// Compile a list of glob patterns
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        let mut translated = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            let regex = translate(pattern);
            // Compile one at a time so the error names the offending glob
            Regex::new(&regex).map_err(|e| {
                RepoDumpError::Pattern(format!("invalid glob '{}': {}", pattern, e))
            })?;
            translated.push(regex);
        }

        let set = RegexSet::new(&translated)
            .map_err(|e| RepoDumpError::Pattern(e.to_string()))?;

        Ok(Self { patterns, set })
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check whether a path matches any pattern
    pub fn matches(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    /// Return the first pattern (in declaration order) matching the path
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.set
            .matches(path)
            .iter()
            .next()
            .map(|idx| self.patterns[idx].as_str())
    }
}

/// Include/exclude filter built once per scan configuration
#[derive(Debug, Clone)]
pub struct PathFilter {
    exclude: PatternSet,
    include: PatternSet,
    verbose: bool,
}

impl PathFilter {
    /// Compile the exclude and include patterns of a scan configuration
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            exclude: PatternSet::new(&config.exclude_patterns)?,
            include: PatternSet::new(&config.include_patterns)?,
            verbose: config.verbose,
        })
    }

    /// Same patterns, with per-path decision logging turned off
    pub fn quiet(&self) -> Self {
        Self {
            verbose: false,
            ..self.clone()
        }
    }

    /// True if the root-relative path matches any exclude pattern
    pub fn should_exclude(&self, rel_path: &str) -> bool {
        match self.exclude.first_match(rel_path) {
            Some(pattern) => {
                if self.verbose {
                    debug!("Excluded: {} (matches pattern '{}')", rel_path, pattern);
                }
                true
            }
            None => false,
        }
    }

    /// True if there are no include patterns, or the path matches one of them
    pub fn should_include(&self, rel_path: &str) -> bool {
        if self.include.is_empty() {
            return true;
        }

        match self.include.first_match(rel_path) {
            Some(pattern) => {
                if self.verbose {
                    debug!("Included: {} (matches pattern '{}')", rel_path, pattern);
                }
                true
            }
            None => false,
        }
    }

    /// Combined check: exclusion wins over inclusion
    pub fn accepts(&self, rel_path: &str) -> bool {
        !self.should_exclude(rel_path) && self.should_include(rel_path)
    }
}

/// Translate a glob into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let len = chars.len();
    let mut out = String::from(r"(?s)\A");
    let mut buf = [0u8; 4];
    let mut i = 0;

    while i < len {
        let c = chars[i];
        i += 1;

        match c {
            '*' => {
                // Runs of '*' collapse into one
                while i < len && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < len && chars[j] == '!' {
                    j += 1;
                }
                if j < len && chars[j] == ']' {
                    j += 1;
                }
                while j < len && chars[j] != ']' {
                    j += 1;
                }

                if j >= len {
                    // Unterminated class: treat '[' literally
                    out.push_str(r"\[");
                } else {
                    out.push_str(&translate_class(&chars[i..j]));
                    i = j + 1;
                }
            }
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }

    out.push_str(r"\z");
    out
}

/// Translate the body of a `[...]` class (without the brackets)
///
/// `x-y` pairs are read left to right. Reversed ranges such as `z-a` are
/// dropped; a class left with nothing in it never matches.
fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut items = Vec::new();
    let mut buf = [0u8; 4];
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            let (lo, hi) = (body[k], body[k + 2]);
            if lo <= hi {
                let lo = regex::escape(lo.encode_utf8(&mut buf));
                let hi = regex::escape(hi.encode_utf8(&mut buf));
                items.push(format!("{}-{}", lo, hi));
            }
            k += 3;
        } else {
            items.push(regex::escape(body[k].encode_utf8(&mut buf)));
            k += 1;
        }
    }

    match (items.is_empty(), negated) {
        (true, false) => r"[^\s\S]".to_string(),
        (true, true) => ".".to_string(),
        (false, negated) => format!("[{}{}]", if negated { "^" } else { "" }, items.concat()),
    }
}
