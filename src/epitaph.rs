use fancy_regex::{Captures, Expander, Regex};
use log::{debug, trace};

use std::{borrow::Cow, ops::Range};

use crate::{
    error::{Error, Result, INPUT_REQUIRED, NO_MATCH_FOUND, PATTERN_REQUIRED},
    option::{OptionSet, RegexFlags},
    pattern::Pattern,
};

/// Collects a pattern, an input and an optional option set, then compiles
/// them into an [`Epitaph`].
///
/// Nothing is checked until [`Builder::build`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pattern: Option<Pattern>,
    input: Option<String>,
    options: OptionSet,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Builder {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Builder {
        self.input = Some(input.into());
        self
    }

    pub fn option(mut self, options: impl Into<OptionSet>) -> Builder {
        self.options = options.into();
        self
    }

    /// Compile the configured pattern against the configured input.
    ///
    /// The pattern is checked before the input, so a builder missing both
    /// always reports the missing pattern. Each call yields an independent
    /// facade with its own cursor.
    pub fn build(&self) -> Result<Epitaph> {
        let pattern = self
            .pattern
            .as_ref()
            .ok_or(Error::IllegalState(PATTERN_REQUIRED))?;
        let input = self
            .input
            .as_ref()
            .ok_or(Error::IllegalState(INPUT_REQUIRED))?;

        let flags = if self.options.is_empty() {
            RegexFlags::empty()
        } else {
            self.options.fold()
        };
        debug!(
            "compiling {:?} with options {} ({:#x})",
            pattern.as_str(),
            self.options,
            flags.bits()
        );
        let programs = Programs::compile(pattern.as_str(), flags)?;
        Ok(Epitaph {
            input: input.clone(),
            programs,
            cursor: 0,
            last: None,
        })
    }
}

// One compiled program per matching mode. Wrapping in a non-capturing group
// keeps group numbering identical across the three.
#[derive(Debug, Clone)]
struct Programs {
    search: Regex,
    prefix: Regex,
    full: Regex,
}

impl Programs {
    fn compile(source: &str, flags: RegexFlags) -> Result<Programs> {
        let (body, flags): (Cow<'_, str>, RegexFlags) = if flags.is_literal() {
            // a literal pattern keeps only its case handling
            (
                Cow::Owned(regex::escape(source)),
                flags & RegexFlags::CASE_INSENSITIVE,
            )
        } else {
            (Cow::Borrowed(source), flags)
        };
        let inline = flags.inline_prefix();
        // a trailing '#' comment would swallow the closing paren
        let close = if flags.contains(RegexFlags::COMMENTS) {
            "\n)"
        } else {
            ")"
        };

        let search = format!("{}{}", inline, body);
        let prefix = format!(r"{}\A(?:{}{}", inline, body, close);
        let full = format!(r"{}\A(?:{}{}\z", inline, body, close);
        Ok(Programs {
            search: compile(&search)?,
            prefix: compile(&prefix)?,
            full: compile(&full)?,
        })
    }
}

fn compile(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|err| Error::Compile(Box::new(err)))
}

fn spans(caps: &Captures<'_>) -> Vec<Option<Range<usize>>> {
    (0..caps.len())
        .map(|i| caps.get(i).map(|m| m.start()..m.end()))
        .collect()
}

// Offset one character past `at`, so an empty match never repeats.
fn step_over(input: &str, at: usize) -> usize {
    at + input[at..].chars().next().map_or(1, char::len_utf8)
}

/// Stateful matcher over one compiled pattern and one input.
///
/// `find` walks the input left to right, each call resuming where the
/// previous match ended. `group`, `start` and `end` describe the most recent
/// successful match of any kind.
#[derive(Debug, Clone)]
pub struct Epitaph {
    input: String,
    programs: Programs,
    cursor: usize,
    last: Option<Vec<Option<Range<usize>>>>,
}

impl Epitaph {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Source of the compiled search program, inline flags included.
    pub fn pattern(&self) -> &str {
        self.programs.search.as_str()
    }

    /// Forget the last match and move the cursor back to the start of input.
    pub fn reset(&mut self) -> &mut Epitaph {
        self.cursor = 0;
        self.last = None;
        self
    }

    /// Scan for the next match after the previous one.
    pub fn find(&mut self) -> Result<bool> {
        let from = match self.last_span() {
            Some(span) if span.is_empty() => step_over(&self.input, span.end),
            _ => self.cursor,
        };
        if from > self.input.len() {
            self.last = None;
            return Ok(false);
        }
        let found = self
            .programs
            .search
            .captures_from_pos(&self.input, from)
            .map_err(|err| Error::Match(Box::new(err)))?
            .map(|caps| spans(&caps));
        trace!("find from {}: {:?}", from, found.as_ref().map(|s| &s[0]));
        match found {
            Some(groups) => {
                self.record(groups);
                Ok(true)
            }
            None => {
                // stays exhausted until reset
                self.cursor = self.input.len() + 1;
                self.last = None;
                Ok(false)
            }
        }
    }

    /// Match a prefix of the input; the rest of the input may be anything.
    pub fn looking_at(&mut self) -> Result<bool> {
        let found = self
            .programs
            .prefix
            .captures(&self.input)
            .map_err(|err| Error::Match(Box::new(err)))?
            .map(|caps| spans(&caps));
        trace!("looking_at: {}", found.is_some());
        Ok(self.record_attempt(found))
    }

    /// Match the entire input.
    pub fn matches(&mut self) -> Result<bool> {
        let found = self
            .programs
            .full
            .captures(&self.input)
            .map_err(|err| Error::Match(Box::new(err)))?
            .map(|caps| spans(&caps));
        trace!("matches: {}", found.is_some());
        Ok(self.record_attempt(found))
    }

    /// Copy of the input with the first match replaced. `$n` and `${name}`
    /// refer to capture groups; `$$` is a literal dollar.
    pub fn replace_first(&mut self, replacement: &str) -> Result<String> {
        self.replace(replacement, Some(1))
    }

    /// Copy of the input with every non-overlapping match replaced.
    pub fn replace_all(&mut self, replacement: &str) -> Result<String> {
        self.replace(replacement, None)
    }

    /// Text of the last successful match.
    pub fn group(&self) -> Result<&str> {
        let span = self.last_span().ok_or(Error::IllegalState(NO_MATCH_FOUND))?;
        Ok(&self.input[span])
    }

    /// Text of capture group `index` of the last successful match, `None` when
    /// that group took no part in it. Group 0 is the whole match.
    pub fn group_at(&self, index: usize) -> Result<Option<&str>> {
        let groups = self
            .last
            .as_ref()
            .ok_or(Error::IllegalState(NO_MATCH_FOUND))?;
        let span = groups.get(index).ok_or_else(|| {
            Error::invalid_argument(format!(
                "no group {}, the pattern has {}",
                index,
                self.group_count()
            ))
        })?;
        Ok(span.clone().map(|span| &self.input[span]))
    }

    /// Number of capture groups, the whole match not counted.
    pub fn group_count(&self) -> usize {
        self.programs.search.captures_len() - 1
    }

    pub fn start(&self) -> Result<usize> {
        self.last_span()
            .map(|span| span.start)
            .ok_or(Error::IllegalState(NO_MATCH_FOUND))
    }

    pub fn end(&self) -> Result<usize> {
        self.last_span()
            .map(|span| span.end)
            .ok_or(Error::IllegalState(NO_MATCH_FOUND))
    }

    fn last_span(&self) -> Option<Range<usize>> {
        self.last
            .as_ref()
            .and_then(|groups| groups.first().cloned().flatten())
    }

    fn record(&mut self, groups: Vec<Option<Range<usize>>>) {
        if let Some(Some(whole)) = groups.first() {
            self.cursor = whole.end;
        }
        self.last = Some(groups);
    }

    fn record_attempt(&mut self, found: Option<Vec<Option<Range<usize>>>>) -> bool {
        match found {
            Some(groups) => {
                self.record(groups);
                true
            }
            None => {
                self.last = None;
                false
            }
        }
    }

    fn replace(&mut self, replacement: &str, limit: Option<usize>) -> Result<String> {
        let expander = Expander::default();
        expander
            .check(replacement, &self.programs.search)
            .map_err(|err| Error::invalid_argument(format!("bad replacement: {}", err)))?;
        self.reset();

        let input = self.input.as_str();
        let mut out = String::with_capacity(input.len());
        let mut copied = 0;
        let mut from = 0;
        let mut replaced = 0;
        while from <= input.len() && limit.map_or(true, |limit| replaced < limit) {
            let caps = match self
                .programs
                .search
                .captures_from_pos(input, from)
                .map_err(|err| Error::Match(Box::new(err)))?
            {
                Some(caps) => caps,
                None => break,
            };
            let Some(whole) = caps.get(0) else { break };
            out.push_str(&input[copied..whole.start()]);
            expander.append_expansion(&mut out, replacement, &caps);
            copied = whole.end();
            from = if whole.start() == whole.end() {
                step_over(input, whole.end())
            } else {
                whole.end()
            };
            replaced += 1;
        }
        out.push_str(&input[copied..]);
        trace!("replaced {} match(es)", replaced);

        self.reset();
        Ok(out)
    }
}
