//! Heading and section-boundary classification.
//!
//! Both decision procedures are expressed as ordered tables of named rules.
//! Each rule is a plain function of its input, so rules can be tested one by
//! one and the table order is the only source of priority.
//!
//! Heading classification runs in three stages:
//!
//! 1. **Rejections**: any matching rule drops the candidate.
//! 2. **Triggers**: at least one rule must match (the "looks like a heading" gate).
//! 3. **Levels**: the first rule yielding a level wins; none means rejection.
//!
//! Trigger and level stages are independent: a candidate accepted because it
//! is bold can still receive its level from numbering.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::script::Script;
use super::style::StyleKey;
use crate::model::{Block, Document, HeadingLevel, Line, Span};
use crate::options::HeadingPolicy;

/// Digits and numerals accepted in heading numbers (ASCII, CJK, full-width).
const NUMERAL: &str = r"[\d一二三四五六七八九十百千万億壹貳叁肆伍陸柒捌玖拾零〇１-９]+";

/// Relaxed candidates longer than this are never headings.
pub const MAX_RELAXED_WORDS: usize = 15;

/// Strict length cap for CJK documents, in characters.
pub const MAX_CJK_CHARS: usize = 50;

/// Strict length cap for Latin documents, in words.
pub const MAX_LATIN_WORDS: usize = 25;

/// Unnumbered strict headings must be shorter than this many words.
pub const SHORT_HEADING_WORDS: usize = 7;

/// Verbs that open instruction steps rather than section titles.
pub const INSTRUCTION_VERBS: &[&str] = &[
    "mix", "combine", "add", "serve", "preheat", "cook", "sauté", "stir", "bake", "roast",
    "garnish", "drain", "rinse", "set", "layer", "top", "spread", "roll", "place",
];

lazy_static! {
    static ref H3_NUMBERING: Regex =
        Regex::new(&format!(r"^{n}\.{n}\.{n}", n = NUMERAL)).unwrap();
    static ref H2_NUMBERING: Regex =
        Regex::new(&format!(r"^(?:{n}\.{n}|[（(]{n}[)）])", n = NUMERAL)).unwrap();
    static ref H1_NUMBERING: Regex =
        Regex::new(&format!(r"^(?:Chapter\s+|第)?{n}[.、．]?\s", n = NUMERAL)).unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"^\s*([o•*✓-]|[a-zA-Z0-9][.)])\s+").unwrap();
    static ref INGREDIENT: Regex =
        Regex::new(r"^\s*([0-9½¼¾⅓⅔⅛⅜⅝⅞]|one|two|three)\s+").unwrap();
}

// ==================== Text helpers ====================

/// Collapse runs of whitespace to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True if the text has at least one cased character and no lowercase ones.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Level implied by a leading section number (`1.2.3`, `1.2`, `(2)`, `3 `, `第三 `).
pub fn numbering_level(text: &str) -> Option<HeadingLevel> {
    if H3_NUMBERING.is_match(text) {
        Some(HeadingLevel::H3)
    } else if H2_NUMBERING.is_match(text) {
        Some(HeadingLevel::H2)
    } else if H1_NUMBERING.is_match(text) {
        Some(HeadingLevel::H1)
    } else {
        None
    }
}

// ==================== Style level map ====================

/// Mapping from (size, font) styles to heading levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleLevelMap {
    levels: IndexMap<StyleKey, HeadingLevel>,
}

impl StyleLevelMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style mapping.
    pub fn with(mut self, key: StyleKey, level: HeadingLevel) -> Self {
        self.levels.insert(key, level);
        self
    }

    /// Level for a style, if mapped.
    pub fn get(&self, key: &StyleKey) -> Option<HeadingLevel> {
        self.levels.get(key).copied()
    }

    /// Number of mapped styles.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Observe heading styles in a document.
    ///
    /// Short blocks whose first span is larger than the body size contribute
    /// their style; the three largest distinct styles become H1, H2 and H3.
    pub fn observe(doc: &Document, body_size: i32) -> Self {
        let mut seen: Vec<StyleKey> = Vec::new();
        for page in &doc.pages {
            for block in page.text_blocks() {
                let Some(span) = block.first_span() else {
                    continue;
                };
                let words = block.lines.first().map(|l| word_count(&l.text())).unwrap_or(0);
                if words == 0 || words > MAX_RELAXED_WORDS || span.rounded_size() <= body_size {
                    continue;
                }
                let key = StyleKey::of(span);
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }
        }
        // stable: equal sizes keep first-seen order
        seen.sort_by(|a, b| b.size.cmp(&a.size));

        let mut map = Self::new();
        for (depth, key) in seen.into_iter().enumerate() {
            if let Some(level) = HeadingLevel::from_depth(depth) {
                map.levels.insert(key, level);
            }
        }
        log::debug!("{}: observed {} heading styles", doc.name, map.len());
        map
    }
}

// ==================== Heading rules ====================

/// A heading candidate extracted from a block.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// Whitespace-normalized candidate text
    pub text: String,
    /// First span of the block
    pub first_span: &'a Span,
    /// Word count of `text`
    pub words: usize,
}

impl<'a> Candidate<'a> {
    fn new(text: String, first_span: &'a Span) -> Self {
        let words = word_count(&text);
        Self {
            text,
            first_span,
            words,
        }
    }

    /// Candidate built from the whole block text.
    pub fn from_block(block: &'a Block) -> Option<Self> {
        if !block.has_lines() {
            return None;
        }
        let span = block.first_span()?;
        Some(Self::new(normalize_whitespace(&block.full_text()), span))
    }

    /// Candidate built from the first line only.
    pub fn from_first_line(block: &'a Block) -> Option<Self> {
        if !block.has_lines() {
            return None;
        }
        let line = block.lines.first()?;
        let span = line.first_span()?;
        Some(Self::new(normalize_whitespace(&line.text()), span))
    }

    fn is_larger_than(&self, body_size: i32) -> bool {
        self.first_span.rounded_size() > body_size
    }
}

/// Per-document facts the heading rules consult.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// Body font size
    pub body_size: i32,
    /// Document script
    pub script: Script,
    /// Style to level mapping, if any
    pub style_levels: Option<&'a StyleLevelMap>,
}

/// A named predicate or level rule.
#[derive(Clone, Copy)]
pub struct Rule<T> {
    /// Rule name, used in logs and tests
    pub name: &'static str,
    /// Rule body
    pub apply: fn(&Candidate<'_>, &ClassifyContext<'_>) -> T,
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn rule_empty(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> bool {
    c.text.is_empty()
}

fn rule_too_long(c: &Candidate<'_>, ctx: &ClassifyContext<'_>) -> bool {
    match ctx.script {
        Script::Cjk => c.text.chars().count() > MAX_CJK_CHARS,
        Script::Latin => c.words > MAX_LATIN_WORDS,
    }
}

fn rule_too_many_words(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> bool {
    c.words > MAX_RELAXED_WORDS
}

fn rule_bold(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> bool {
    c.first_span.is_bold()
}

fn rule_larger(c: &Candidate<'_>, ctx: &ClassifyContext<'_>) -> bool {
    c.is_larger_than(ctx.body_size)
}

fn rule_short_uppercase(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> bool {
    (3..10).contains(&c.words) && is_all_uppercase(&c.text)
}

fn level_numbering(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> Option<HeadingLevel> {
    numbering_level(&c.text)
}

fn level_short_text(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> Option<HeadingLevel> {
    (c.words < SHORT_HEADING_WORDS).then_some(HeadingLevel::H1)
}

fn level_style_map(c: &Candidate<'_>, ctx: &ClassifyContext<'_>) -> Option<HeadingLevel> {
    ctx.style_levels?.get(&StyleKey::of(c.first_span))
}

fn level_uppercase(c: &Candidate<'_>, _: &ClassifyContext<'_>) -> Option<HeadingLevel> {
    is_all_uppercase(&c.text).then_some(HeadingLevel::H1)
}

const STRICT_REJECTIONS: &[Rule<bool>] = &[
    Rule { name: "empty", apply: rule_empty },
    Rule { name: "too_long", apply: rule_too_long },
];

const STRICT_TRIGGERS: &[Rule<bool>] = &[Rule { name: "larger_than_body", apply: rule_larger }];

const STRICT_LEVELS: &[Rule<Option<HeadingLevel>>] = &[
    Rule { name: "numbering", apply: level_numbering },
    Rule { name: "short_text", apply: level_short_text },
];

const RELAXED_REJECTIONS: &[Rule<bool>] = &[
    Rule { name: "empty", apply: rule_empty },
    Rule { name: "too_many_words", apply: rule_too_many_words },
];

const RELAXED_TRIGGERS: &[Rule<bool>] = &[
    Rule { name: "bold", apply: rule_bold },
    Rule { name: "larger_than_body", apply: rule_larger },
    Rule { name: "short_uppercase", apply: rule_short_uppercase },
];

const RELAXED_LEVELS: &[Rule<Option<HeadingLevel>>] = &[
    Rule { name: "numbering", apply: level_numbering },
    Rule { name: "style_map", apply: level_style_map },
    Rule { name: "uppercase", apply: level_uppercase },
];

/// An accepted heading decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Assigned level
    pub level: HeadingLevel,
    /// Normalized heading text
    pub text: String,
    /// Name of the rule that assigned the level
    pub rule: &'static str,
}

/// Heading classifier for outline extraction.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier {
    policy: HeadingPolicy,
    rejections: &'static [Rule<bool>],
    triggers: &'static [Rule<bool>],
    levels: &'static [Rule<Option<HeadingLevel>>],
}

impl HeadingClassifier {
    /// Classifier for the given policy.
    pub fn new(policy: HeadingPolicy) -> Self {
        match policy {
            HeadingPolicy::Strict => Self {
                policy,
                rejections: STRICT_REJECTIONS,
                triggers: STRICT_TRIGGERS,
                levels: STRICT_LEVELS,
            },
            HeadingPolicy::Relaxed => Self {
                policy,
                rejections: RELAXED_REJECTIONS,
                triggers: RELAXED_TRIGGERS,
                levels: RELAXED_LEVELS,
            },
        }
    }

    /// The strict classifier (size above body, length cap).
    pub fn strict() -> Self {
        Self::new(HeadingPolicy::Strict)
    }

    /// The relaxed classifier (bold, size or uppercase).
    pub fn relaxed() -> Self {
        Self::new(HeadingPolicy::Relaxed)
    }

    /// Policy this classifier implements.
    pub fn policy(&self) -> HeadingPolicy {
        self.policy
    }

    /// Extract the candidate text this classifier judges.
    pub fn candidate<'a>(&self, block: &'a Block) -> Option<Candidate<'a>> {
        match self.policy {
            HeadingPolicy::Strict => Candidate::from_block(block),
            HeadingPolicy::Relaxed => Candidate::from_first_line(block),
        }
    }

    /// Classify an extracted candidate.
    pub fn classify_candidate(
        &self,
        candidate: Candidate<'_>,
        ctx: &ClassifyContext<'_>,
    ) -> Option<Classification> {
        if let Some(rule) = self.rejections.iter().find(|r| (r.apply)(&candidate, ctx)) {
            log::trace!("rejected {:?} by {}", candidate.text, rule.name);
            return None;
        }
        if !self.triggers.is_empty() && !self.triggers.iter().any(|r| (r.apply)(&candidate, ctx)) {
            return None;
        }
        self.levels.iter().find_map(|r| {
            (r.apply)(&candidate, ctx).map(|level| Classification {
                level,
                text: candidate.text.clone(),
                rule: r.name,
            })
        })
    }

    /// Classify a block.
    pub fn classify(&self, block: &Block, ctx: &ClassifyContext<'_>) -> Option<Classification> {
        let candidate = self.candidate(block)?;
        self.classify_candidate(candidate, ctx)
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rejections
            .iter()
            .chain(self.triggers)
            .map(|r| r.name)
            .chain(self.levels.iter().map(|r| r.name))
            .collect()
    }
}

// ==================== Section boundaries ====================

/// Outcome of the section-boundary classifier for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryDecision {
    /// The line opens a new section
    Boundary,
    /// The line is body text; carries the name of the deciding rule
    Body(&'static str),
}

impl BoundaryDecision {
    /// Check if this is a boundary.
    pub fn is_boundary(&self) -> bool {
        matches!(self, BoundaryDecision::Boundary)
    }
}

/// A boundary exclusion rule: if it matches, the line stays body text.
#[derive(Clone, Copy)]
pub struct LineRule {
    /// Rule name
    pub name: &'static str,
    /// Rule body, given the line's trimmed text and first-span style
    pub apply: fn(&str, &StyleKey, &StyleKey) -> bool,
}

fn line_body_style(_: &str, style: &StyleKey, body: &StyleKey) -> bool {
    style == body
}

fn line_single_word(text: &str, _: &StyleKey, _: &StyleKey) -> bool {
    word_count(text) <= 1
}

/// Bullet, checkbox or short label such as `a)` or `3.`.
pub fn is_list_item(text: &str) -> bool {
    LIST_ITEM.is_match(text)
}

/// Line opening with an instruction verb.
pub fn is_instruction(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .map(|w| INSTRUCTION_VERBS.contains(&w.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Line opening with a quantity (digit, fraction or small number word).
pub fn is_ingredient(text: &str) -> bool {
    INGREDIENT.is_match(&text.to_lowercase())
}

fn line_list_item(text: &str, _: &StyleKey, _: &StyleKey) -> bool {
    is_list_item(text)
}

fn line_instruction(text: &str, _: &StyleKey, _: &StyleKey) -> bool {
    is_instruction(text)
}

fn line_ingredient(text: &str, _: &StyleKey, _: &StyleKey) -> bool {
    is_ingredient(text)
}

const BOUNDARY_EXCLUSIONS: &[LineRule] = &[
    LineRule { name: "body_style", apply: line_body_style },
    LineRule { name: "single_word", apply: line_single_word },
    LineRule { name: "list_item", apply: line_list_item },
    LineRule { name: "instruction", apply: line_instruction },
    LineRule { name: "ingredient", apply: line_ingredient },
];

/// Decides whether a line starts a new section.
#[derive(Debug, Clone)]
pub struct BoundaryClassifier {
    body: StyleKey,
}

impl BoundaryClassifier {
    /// Create a classifier for a document's body style.
    pub fn new(body: StyleKey) -> Self {
        Self { body }
    }

    /// Body style this classifier compares against.
    pub fn body_style(&self) -> &StyleKey {
        &self.body
    }

    /// Classify a line.
    pub fn decide(&self, line: &Line) -> BoundaryDecision {
        let Some(span) = line.first_span() else {
            return BoundaryDecision::Body("no_spans");
        };
        let text = line.text();
        let text = text.trim();
        let style = StyleKey::of(span);
        match BOUNDARY_EXCLUSIONS
            .iter()
            .find(|r| (r.apply)(text, &style, &self.body))
        {
            Some(rule) => BoundaryDecision::Body(rule.name),
            None => BoundaryDecision::Boundary,
        }
    }

    /// Check if a line starts a new section.
    pub fn is_boundary(&self, line: &Line) -> bool {
        self.decide(line).is_boundary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn block(text: &str, size: f32, font: &str) -> Block {
        Block::text(vec![Line::from_spans(vec![Span::new(text, size, font)])])
    }

    fn ctx(body_size: i32) -> ClassifyContext<'static> {
        ClassifyContext {
            body_size,
            script: Script::Latin,
            style_levels: None,
        }
    }

    fn line(text: &str, size: f32, font: &str) -> Line {
        Line::from_spans(vec![Span::new(text, size, font)])
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  2.1 \n  Background\t "), "2.1 Background");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("JOIN US"));
        assert!(is_all_uppercase("SECTION 2!"));
        assert!(!is_all_uppercase("Join Us"));
        assert!(!is_all_uppercase("1234"));
        assert!(!is_all_uppercase("概要"));
    }

    #[test]
    fn test_numbering_depth() {
        assert_eq!(numbering_level("1.2.3 Detail"), Some(HeadingLevel::H3));
        assert_eq!(numbering_level("2.1 Background"), Some(HeadingLevel::H2));
        assert_eq!(numbering_level("(2) Scope"), Some(HeadingLevel::H2));
        assert_eq!(numbering_level("（三）范围"), Some(HeadingLevel::H2));
        assert_eq!(numbering_level("3 Results"), Some(HeadingLevel::H1));
        assert_eq!(numbering_level("4. Methods"), Some(HeadingLevel::H1));
        assert_eq!(numbering_level("Chapter 5 Outlook"), Some(HeadingLevel::H1));
        assert_eq!(numbering_level("第一 总则"), Some(HeadingLevel::H1));
        assert_eq!(numbering_level("１ 概要"), Some(HeadingLevel::H1));
        assert_eq!(numbering_level("Background"), None);
        assert_eq!(numbering_level("3Results"), None);
    }

    // ==================== Strict Tests ====================

    #[test]
    fn test_strict_requires_larger_size() {
        let classifier = HeadingClassifier::strict();
        assert!(classifier
            .classify(&block("Introduction", 11.0, "Bold"), &ctx(11))
            .is_none());
        let result = classifier
            .classify(&block("Introduction", 14.0, "Regular"), &ctx(11))
            .unwrap();
        assert_eq!(result.level, HeadingLevel::H1);
        assert_eq!(result.rule, "short_text");
    }

    #[test]
    fn test_strict_numbering_independent_of_size() {
        let classifier = HeadingClassifier::strict();
        for size in [12.0, 18.0, 30.0] {
            let b = block("2.1 Background", size, "Regular");
            assert_eq!(classifier.classify(&b, &ctx(11)).unwrap().level, HeadingLevel::H2);
            let b = block("2.1.4 Sampling", size, "Regular");
            assert_eq!(classifier.classify(&b, &ctx(11)).unwrap().level, HeadingLevel::H3);
        }
    }

    #[test]
    fn test_strict_long_unnumbered_rejected() {
        let classifier = HeadingClassifier::strict();
        let b = block("This is a rather long sentence set in large type", 16.0, "Regular");
        assert!(classifier.classify(&b, &ctx(11)).is_none());
    }

    #[test]
    fn test_strict_length_cap_by_script() {
        let classifier = HeadingClassifier::strict();
        let long_latin = vec!["word"; 26].join(" ");
        let b = block(&format!("1 {}", long_latin), 16.0, "Regular");
        assert!(classifier.classify(&b, &ctx(11)).is_none());

        let cjk_text = format!("1 {}", "概".repeat(50));
        let b = block(&cjk_text, 16.0, "Regular");
        let cjk_ctx = ClassifyContext {
            script: Script::Cjk,
            ..ctx(11)
        };
        assert!(classifier.classify(&b, &cjk_ctx).is_none());
        let b = block("1 概要", 16.0, "Regular");
        assert!(classifier.classify(&b, &cjk_ctx).is_some());
    }

    #[test]
    fn test_strict_uses_whole_block() {
        let classifier = HeadingClassifier::strict();
        let b = Block::text(vec![
            line("3.2", 14.0, "Regular"),
            line("Scope   of work", 14.0, "Regular"),
        ]);
        let result = classifier.classify(&b, &ctx(11)).unwrap();
        assert_eq!(result.text, "3.2 Scope of work");
        assert_eq!(result.level, HeadingLevel::H2);
    }

    // ==================== Relaxed Tests ====================

    #[test]
    fn test_relaxed_bold_body_size_gets_numbering_level() {
        let classifier = HeadingClassifier::relaxed();
        let result = classifier
            .classify(&block("1.2 Scope", 11.0, "Arial-Bold"), &ctx(11))
            .unwrap();
        assert_eq!(result.level, HeadingLevel::H2);
        assert_eq!(result.rule, "numbering");
    }

    #[test]
    fn test_relaxed_uppercase_trigger() {
        let classifier = HeadingClassifier::relaxed();
        let result = classifier
            .classify(&block("TERMS AND CONDITIONS", 11.0, "Regular"), &ctx(11))
            .unwrap();
        assert_eq!(result.level, HeadingLevel::H1);

        // two words: not enough for the trigger
        assert!(classifier
            .classify(&block("TERMS APPLY", 11.0, "Regular"), &ctx(11))
            .is_none());
    }

    #[test]
    fn test_relaxed_larger_without_level_rejected() {
        let classifier = HeadingClassifier::relaxed();
        assert!(classifier
            .classify(&block("Overview", 16.0, "Regular"), &ctx(11))
            .is_none());
    }

    #[test]
    fn test_relaxed_style_map_level() {
        let map = StyleLevelMap::new().with(StyleKey::new(16, "Regular"), HeadingLevel::H2);
        let context = ClassifyContext {
            style_levels: Some(&map),
            ..ctx(11)
        };
        let result = HeadingClassifier::relaxed()
            .classify(&block("Overview", 16.0, "Regular"), &context)
            .unwrap();
        assert_eq!(result.level, HeadingLevel::H2);
        assert_eq!(result.rule, "style_map");
    }

    #[test]
    fn test_relaxed_word_limit() {
        let text = vec!["WORD"; 16].join(" ");
        assert!(HeadingClassifier::relaxed()
            .classify(&block(&text, 20.0, "Bold"), &ctx(11))
            .is_none());
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            HeadingClassifier::strict().rule_names(),
            vec!["empty", "too_long", "larger_than_body", "numbering", "short_text"]
        );
        assert_eq!(
            HeadingClassifier::relaxed().rule_names(),
            vec![
                "empty",
                "too_many_words",
                "bold",
                "larger_than_body",
                "short_uppercase",
                "numbering",
                "style_map",
                "uppercase"
            ]
        );
    }

    #[test]
    fn test_observe_style_levels() {
        let mut page = Page::letter(0);
        page.add_block(block("Title Here", 24.0, "Bold"));
        page.add_block(block("Section", 18.0, "Bold"));
        page.add_block(block("Another Section", 18.0, "Bold"));
        page.add_block(block("Sub", 14.0, "Italic"));
        page.add_block(block("Minor", 13.0, "Italic"));
        page.add_block(block("body text here", 11.0, "Regular"));
        let mut doc = Document::new("d.pdf");
        doc.add_page(page);

        let map = StyleLevelMap::observe(&doc, 11);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&StyleKey::new(24, "Bold")), Some(HeadingLevel::H1));
        assert_eq!(map.get(&StyleKey::new(18, "Bold")), Some(HeadingLevel::H2));
        assert_eq!(map.get(&StyleKey::new(14, "Italic")), Some(HeadingLevel::H3));
        assert_eq!(map.get(&StyleKey::new(13, "Italic")), None);
    }

    // ==================== Boundary Tests ====================

    #[test]
    fn test_boundary_on_style_change() {
        let classifier = BoundaryClassifier::new(StyleKey::new(11, "Regular"));
        assert!(classifier.is_boundary(&line("Greek Salad", 11.0, "Bold")));
        assert!(classifier.is_boundary(&line("Greek Salad", 10.0, "Regular")));
        assert_eq!(
            classifier.decide(&line("Greek Salad", 11.0, "Regular")),
            BoundaryDecision::Body("body_style")
        );
    }

    #[test]
    fn test_boundary_exclusions() {
        let classifier = BoundaryClassifier::new(StyleKey::new(11, "Regular"));
        let cases = [
            ("Ingredients:", "single_word"),
            ("• 2 cups rice", "list_item"),
            ("a) first option", "list_item"),
            ("Preheat the oven", "instruction"),
            ("Sauté the onions", "instruction"),
            ("1 cup flour", "ingredient"),
            ("½ teaspoon salt", "ingredient"),
            ("Two eggs beaten", "ingredient"),
        ];
        for (text, rule) in cases {
            assert_eq!(
                classifier.decide(&line(text, 14.0, "Bold")),
                BoundaryDecision::Body(rule),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_boundary_empty_line() {
        let classifier = BoundaryClassifier::new(StyleKey::new(11, "Regular"));
        assert_eq!(
            classifier.decide(&Line::default()),
            BoundaryDecision::Body("no_spans")
        );
    }
}
