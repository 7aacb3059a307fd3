//! Chunk rules over part-of-speech tags
//!
//! A rule is a sequence of tag classes with quantifiers, written in the
//! familiar bracket notation, e.g. `<JJ>*<NN.*><NN.*>+`. Tag names may be
//! Penn Treebank (`NN`, `NN.*`, `JJ`, `IN`) or Universal (`NOUN`, `ADJ`,
//! `ADP`), and alternatives are separated by `|` inside the brackets.
//!
//! Matching follows regex semantics: quantifiers are greedy and the matcher
//! backtracks until the rest of the rule fits.

use crate::errors::{Result, TermError};
use crate::types::{PosTag, DEFAULT_GRAMMAR};

/// Penn tags used to expand `.*` wildcards such as `NN.*`.
const PENN_TAGS: &[&str] = &[
    "NN", "NNS", "NNP", "NNPS", "JJ", "JJR", "JJS", "IN", "TO", "RP", "RB", "RBR", "RBS", "WRB",
    "DT", "PDT", "WDT", "PRP", "PRP$", "WP", "WP$", "EX", "CC", "CD", "UH", "SYM", "VB", "VBD",
    "VBG", "VBN", "VBP", "VBZ", "MD", "FW", "LS",
];

/// A set of coarse tags accepted at one rule position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagClass {
    tags: Vec<PosTag>,
}

impl TagClass {
    pub fn new(tags: Vec<PosTag>) -> Self {
        Self { tags }
    }

    pub fn matches(&self, pos: PosTag) -> bool {
        self.tags.contains(&pos)
    }

    /// Parse the text between `<` and `>`
    fn parse(spec: &str) -> Result<Self> {
        let mut tags = Vec::new();
        for alt in spec.split('|').map(str::trim) {
            if alt.is_empty() {
                return Err(TermError::invalid_grammar(format!("empty tag in <{spec}>")));
            }
            for pos in Self::expand(alt)? {
                if !tags.contains(&pos) {
                    tags.push(pos);
                }
            }
        }
        Ok(Self { tags })
    }

    fn expand(name: &str) -> Result<Vec<PosTag>> {
        let upper = name.to_uppercase();
        if let Some(prefix) = upper.strip_suffix(".*") {
            let tags: Vec<PosTag> = PENN_TAGS
                .iter()
                .filter(|t| t.starts_with(prefix))
                .filter_map(|t| PosTag::from_penn(t))
                .collect();
            if tags.is_empty() {
                return Err(TermError::invalid_grammar(format!("unknown tag pattern <{name}>")));
            }
            return Ok(tags);
        }

        PosTag::from_spacy(&upper)
            .or_else(|| PosTag::from_penn(&upper))
            .map(|pos| vec![pos])
            .ok_or_else(|| TermError::invalid_grammar(format!("unknown tag <{name}>")))
    }
}

/// Repetition applied to one rule element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Quantifier {
    fn bounds(self) -> (usize, Option<usize>) {
        match self {
            Quantifier::One => (1, Some(1)),
            Quantifier::Optional => (0, Some(1)),
            Quantifier::ZeroOrMore => (0, None),
            Quantifier::OneOrMore => (1, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternElement {
    pub class: TagClass,
    pub quantifier: Quantifier,
}

/// One chunk rule: an ordered sequence of quantified tag classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRule {
    source: String,
    elements: Vec<PatternElement>,
}

impl ChunkRule {
    /// Parse a rule such as `{<JJ>*<NN.*><IN><NN.*>+}`. Braces are optional.
    pub fn parse(rule: &str) -> Result<Self> {
        let source = rule.trim();
        let body = match source.strip_prefix('{') {
            Some(rest) => rest
                .strip_suffix('}')
                .ok_or_else(|| TermError::invalid_grammar(format!("unbalanced braces in {source}")))?,
            None => source,
        };

        let mut elements = Vec::new();
        let mut chars = body.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                c if c.is_whitespace() => continue,
                '<' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(TermError::invalid_grammar(format!(
                                    "unterminated tag in {source}"
                                )))
                            }
                        }
                    }
                    let quantifier = match chars.peek() {
                        Some('*') => Quantifier::ZeroOrMore,
                        Some('+') => Quantifier::OneOrMore,
                        Some('?') => Quantifier::Optional,
                        _ => Quantifier::One,
                    };
                    if quantifier != Quantifier::One {
                        chars.next();
                    }
                    elements.push(PatternElement {
                        class: TagClass::parse(&name)?,
                        quantifier,
                    });
                }
                other => {
                    return Err(TermError::invalid_grammar(format!(
                        "unexpected '{other}' in {source}"
                    )))
                }
            }
        }

        if elements.is_empty() {
            return Err(TermError::invalid_grammar("rule has no tags"));
        }
        if elements.iter().all(|e| e.quantifier.bounds().0 == 0) {
            return Err(TermError::invalid_grammar(format!(
                "rule {source} can match an empty span"
            )));
        }

        Ok(Self {
            source: source.to_string(),
            elements,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// Try to match the rule starting exactly at `start`; returns the
    /// exclusive end of the first match found.
    pub fn match_at(&self, tags: &[PosTag], start: usize) -> Option<usize> {
        self.match_from(0, start, tags)
    }

    fn match_from(&self, elem: usize, pos: usize, tags: &[PosTag]) -> Option<usize> {
        let Some(element) = self.elements.get(elem) else {
            return Some(pos);
        };
        let (min, max) = element.quantifier.bounds();

        let mut run = 0;
        while pos + run < tags.len()
            && max.map_or(true, |m| run < m)
            && element.class.matches(tags[pos + run])
        {
            run += 1;
        }
        if run < min {
            return None;
        }

        // Greedy first, then give tokens back.
        (min..=run)
            .rev()
            .find_map(|take| self.match_from(elem + 1, pos + take, tags))
    }
}

/// An ordered list of chunk rules. Earlier rules claim tokens first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: Vec<ChunkRule>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::parse(&DEFAULT_GRAMMAR).expect("built-in chunk grammar must parse")
    }
}

impl Grammar {
    pub fn new(rules: Vec<ChunkRule>) -> Self {
        Self { rules }
    }

    /// Parse every rule in order
    pub fn parse<S: AsRef<str>>(rules: &[S]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|r| ChunkRule::parse(r.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if rules.is_empty() {
            return Err(TermError::invalid_grammar("grammar has no rules"));
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ChunkRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
