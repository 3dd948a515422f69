// Scanner state machine for turning test identifiers into word sequences.
// Explicit enumerated states over a cursor-indexed array of code points, so
// every transition is a pure function of (state, cursor) and trivially
// testable in isolation.

use super::ScanObserver;

/// Scanner mode. `BetweenWords` consumes separators, `InWord` scans a
/// letter-led word, `InNumber` scans a digit-led token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    BetweenWords,
    InWord,
    InNumber,
}

/// How an emitted span is rendered into the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordKind {
    /// Contains a hyphen or apostrophe; rendered verbatim, never split.
    Joined,
    /// One code point; lowercased unless it leads the sentence.
    SingleLetter,
    /// All digits; rendered verbatim.
    Numeric,
    /// No lowercase letters, length >= 2; casing preserved ("PDF", "UTF8").
    Initialism,
    /// Everything else; lowercased.
    Ordinary,
}

fn classify(span: &[char]) -> WordKind {
    if span.iter().any(|&c| c == '-' || c == '\'') {
        WordKind::Joined
    } else if span.len() == 1 {
        WordKind::SingleLetter
    } else if span.iter().all(|c| c.is_numeric()) {
        WordKind::Numeric
    } else if !span.iter().any(|c| c.is_lowercase()) {
        WordKind::Initialism
    } else {
        WordKind::Ordinary
    }
}

fn capitalize_first(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter();
    if let Some(first) = iter.next() {
        out.extend(first.to_uppercase());
    }
    out.extend(iter);
    out
}

fn capitalize_first_str(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    capitalize_first(&chars)
}

fn lowercase(chars: &[char]) -> String {
    chars.iter().flat_map(|c| c.to_lowercase()).collect()
}

/// Single-pass scanner over the code points of a test identifier.
///
/// The cursor is a pair of indices: `start` marks the beginning of the span
/// currently being scanned, `pos` the lookahead position. Words are emitted
/// when a boundary is found and joined with spaces at the end of the run.
pub struct Scanner<'a, O: ScanObserver> {
    input: Vec<char>,
    start: usize,
    pos: usize,
    words: Vec<String>,
    in_subtest: bool,
    seen_hint: bool,
    joined: bool,
    observer: &'a mut O,
}

impl<'a, O: ScanObserver> Scanner<'a, O> {
    pub fn new(test_name: &str, observer: &'a mut O) -> Self {
        let body = test_name.strip_prefix("Test").unwrap_or(test_name);
        Scanner {
            input: body.chars().collect(),
            start: 0,
            pos: 0,
            words: Vec::new(),
            in_subtest: false,
            seen_hint: false,
            joined: false,
            observer,
        }
    }

    /// Run the state machine to completion and join the emitted words.
    pub fn run(mut self) -> String {
        let mut state = ScanState::BetweenWords;
        loop {
            let next = match state {
                ScanState::BetweenWords => self.between_words(),
                ScanState::InWord => self.in_word(),
                ScanState::InNumber => self.in_number(),
            };
            match next {
                Some(s) => state = s,
                None => break,
            }
        }
        self.words.join(" ")
    }

    // Cursor primitives.

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn backup(&mut self) {
        self.pos -= 1;
    }

    fn skip(&mut self) {
        self.start = self.pos;
    }

    fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.input.get(i).copied())
    }

    fn span(&self) -> &[char] {
        &self.input[self.start..self.pos]
    }

    /// True while the pending span could still be an initialism: it holds no
    /// lowercase letter. Digits count as continuation ("UTF8", "S390X").
    fn caps_run(&self) -> bool {
        !self.span().iter().any(|c| c.is_lowercase())
    }

    fn observe(&mut self, state: ScanState) {
        let next = self.peek();
        self.observer
            .on_state(state, &self.input[self.start..self.pos], next);
    }

    // State transition functions.

    fn between_words(&mut self) -> Option<ScanState> {
        loop {
            self.observe(ScanState::BetweenWords);
            match self.advance() {
                None => return None,
                Some('_') => self.skip(),
                Some('/') => {
                    self.in_subtest = true;
                    self.skip();
                }
                Some('-') => {
                    // Word-initial hyphen: negative number or bare compound,
                    // scanned verbatim from here to the next separator.
                    self.joined = true;
                    return Some(ScanState::InWord);
                }
                Some(c) if c.is_alphabetic() => return Some(ScanState::InWord),
                Some(c) if c.is_numeric() => return Some(ScanState::InNumber),
                // Anything else (opening quotes included) is dropped.
                Some(_) => self.skip(),
            }
        }
    }

    fn in_word(&mut self) -> Option<ScanState> {
        loop {
            self.observe(ScanState::InWord);
            match self.peek() {
                None => {
                    self.emit();
                    return None;
                }
                Some('_') => {
                    self.emit();
                    self.underscore_break();
                    return Some(ScanState::BetweenWords);
                }
                Some('/') => {
                    self.emit();
                    self.slash_break();
                    return Some(ScanState::BetweenWords);
                }
                Some(_) if self.joined => {
                    self.advance();
                }
                Some('-') | Some('\'') => {
                    self.joined = true;
                    self.advance();
                }
                Some(c) if c.is_uppercase() => {
                    if self.caps_run() {
                        self.advance();
                    } else {
                        self.emit();
                    }
                }
                Some(c) if c.is_numeric() => {
                    let attached = self.caps_run()
                        || self.prev() == Some('=')
                        || self.prev().is_some_and(char::is_numeric);
                    if attached {
                        self.advance();
                    } else {
                        self.emit();
                        return Some(ScanState::InNumber);
                    }
                }
                Some(c) if c.is_lowercase() => {
                    // An uppercase run of length >= 2 followed by a lowercase
                    // letter gives its last letter to the next word:
                    // "PDFL" + "oader" -> "PDF" / "Loader".
                    if self.caps_run()
                        && self.span().len() >= 2
                        && self.prev().is_some_and(char::is_uppercase)
                    {
                        self.backup();
                        self.emit();
                    }
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn in_number(&mut self) -> Option<ScanState> {
        loop {
            self.observe(ScanState::InNumber);
            match self.peek() {
                None => {
                    self.emit();
                    return None;
                }
                Some('_') => {
                    self.emit();
                    self.underscore_break();
                    return Some(ScanState::BetweenWords);
                }
                Some('/') => {
                    self.emit();
                    self.slash_break();
                    return Some(ScanState::BetweenWords);
                }
                Some('-') | Some('\'') => {
                    self.joined = true;
                    return Some(ScanState::InWord);
                }
                Some(c) if c.is_numeric() => {
                    self.advance();
                }
                Some(c) if c.is_uppercase() => {
                    self.emit();
                    return Some(ScanState::InWord);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    // Word boundaries.

    fn underscore_break(&mut self) {
        if !self.seen_hint && !self.in_subtest && !self.words.is_empty() {
            self.merge_multiword_function();
        }
        self.advance();
        self.skip();
    }

    fn slash_break(&mut self) {
        self.in_subtest = true;
        self.advance();
        self.skip();
    }

    /// Render the pending span and append it to the word sequence. The very
    /// first word always gets an initial capital, whatever its class.
    fn emit(&mut self) {
        if self.start == self.pos {
            return;
        }
        let span = &self.input[self.start..self.pos];
        let word = if self.words.is_empty() {
            capitalize_first(span)
        } else {
            match classify(span) {
                WordKind::Joined | WordKind::Numeric | WordKind::Initialism => {
                    span.iter().collect()
                }
                WordKind::SingleLetter | WordKind::Ordinary => lowercase(span),
            }
        };
        self.observer.on_emit(&word);
        self.words.push(word);
        self.start = self.pos;
        self.joined = false;
    }

    /// Multiword-function hint: fold every word emitted so far back into one
    /// compound ("Handle" + "input" -> "HandleInput"). Fires at most once,
    /// and never once a subtest boundary has been crossed.
    fn merge_multiword_function(&mut self) {
        let compound: String = self
            .words
            .iter()
            .map(|w| capitalize_first_str(w))
            .collect();
        self.observer.on_merge(&compound);
        self.words = vec![compound];
        self.seen_hint = true;
    }
}
