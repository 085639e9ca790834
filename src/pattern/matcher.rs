//! Pattern matcher: a single top-down recursive walk over a [`Source`].
//!
//! All positions are **character** (not byte) indices. Advancement is
//! communicated by returning the new position, so a failed attempt can
//! never displace a caller's cursor; backtracking is whichever combinator
//! declines a child's advance.

use crate::capture::CaptureMap;
use crate::category::{LINE_TERMINATORS, starts_line_terminator};
use crate::outcome::{Match, Miss, Step};
use crate::pattern::node::{Checker, Literal, Pattern, Ranger};
use crate::source::Source;
use crate::trace::{TraceEvent, TraceSink};

// ─── Public API ─────────────────────────────────────────────────────────────

impl Pattern {
    /// Attempt a match at `at`. On success the [`Match`] carries the end
    /// position and the captures recorded during this attempt.
    pub fn consume(&self, src: &Source, at: usize) -> Result<Match, Miss> {
        let mut st = State {
            caps: CaptureMap::new(),
            trace: None,
        };
        let end = consume(self, src, at, &mut st)?;
        Ok(Match {
            start: at,
            end,
            captures: st.caps,
        })
    }

    /// Like [`Pattern::consume`], recording every leaf attempt into `sink`.
    pub fn consume_traced(
        &self,
        src: &Source,
        at: usize,
        sink: &mut dyn TraceSink,
    ) -> Result<Match, Miss> {
        let mut st = State {
            caps: CaptureMap::new(),
            trace: Some(sink),
        };
        let end = consume(self, src, at, &mut st)?;
        Ok(Match {
            start: at,
            end,
            captures: st.caps,
        })
    }

    /// Find the leftmost match at or after `from`.
    pub fn find(&self, src: &Source, from: usize) -> Option<Match> {
        (from..=src.len()).find_map(|pos| self.consume(src, pos).ok())
    }

    /// Convenience: does the pattern match at the start of `text`?
    pub fn matches(&self, text: &str) -> bool {
        self.consume(&Source::new(text), 0).is_ok()
    }
}

/// Per-attempt state: captures recorded so far and the optional trace sink.
struct State<'a> {
    caps: CaptureMap,
    trace: Option<&'a mut dyn TraceSink>,
}

impl State<'_> {
    fn hit(&mut self, start: usize, end: usize) {
        if let Some(trace) = &mut self.trace {
            trace.record(TraceEvent::Matched { start, end });
        }
    }

    fn miss(&mut self, at: usize, miss: Miss) -> Miss {
        if let Some(trace) = &mut self.trace {
            trace.record(TraceEvent::Missed { at, miss });
        }
        miss
    }
}

// ─── Consume ────────────────────────────────────────────────────────────────

fn consume(p: &Pattern, src: &Source, at: usize, st: &mut State) -> Step {
    match p {
        Pattern::Literal(lit) => consume_literal(lit, src, at, st),
        Pattern::Checker(checker) => consume_checker(checker, src, at, st),
        Pattern::Concat(a, b) => {
            let mid = consume(a, src, at, st)?;
            consume(b, src, mid, st)
        }
        Pattern::Alt(alts) => consume_alt(alts, src, at, st),
        Pattern::Range(r) => consume_range(r, src, at, st),
        Pattern::Repeat(node, count) => {
            let mut cur = at;
            for _ in 0..*count {
                cur = consume(node, src, cur, st)?;
            }
            Ok(cur)
        }
        Pattern::Span(node) => {
            let first = consume(node, src, at, st)?;
            Ok(extend(node, src, first, st, consume))
        }
        Pattern::Closure(node) => Ok(extend(node, src, at, st, consume)),
        Pattern::Opt(node) => Ok(consume(node, src, at, st).unwrap_or(at)),
        Pattern::Not(node) => neglect(node, src, at, st),
        Pattern::Capture { name, node } => {
            let end = consume(node, src, at, st)?;
            st.caps.record(name, at, end - at);
            Ok(end)
        }
        Pattern::CaptureRef(name) => consume_capture_ref(name, src, at, st),
        Pattern::Rec(rec) => match rec.get() {
            Some(body) => consume(body, src, at, st),
            // Unbound recursive edge: the always-failing placeholder.
            None => Err(Miss::NoMatch),
        },
    }
}

/// Greedy repetition: keep stepping while the child advances. A zero-width
/// success terminates the loop (infinite-loop guard).
fn extend(
    node: &Pattern,
    src: &Source,
    start: usize,
    st: &mut State,
    step: fn(&Pattern, &Source, usize, &mut State) -> Step,
) -> usize {
    let mut cur = start;
    while let Ok(next) = step(node, src, cur, st) {
        if next == cur {
            break;
        }
        cur = next;
    }
    cur
}

fn consume_literal(lit: &Literal, src: &Source, at: usize, st: &mut State) -> Step {
    // Too few characters left is AtEnd regardless of where a mismatch would
    // have landed.
    let end = at + lit.len();
    if end > src.len() {
        return Err(st.miss(at, Miss::AtEnd));
    }
    for idx in 0..lit.len() {
        match src.get(at + idx) {
            Some(ch) if lit.matches_at(idx, ch) => {}
            _ => return Err(st.miss(at, Miss::NoMatch)),
        }
    }
    st.hit(at, end);
    Ok(end)
}

fn consume_checker(checker: &Checker, src: &Source, at: usize, st: &mut State) -> Step {
    match checker {
        Checker::Pred(pred) => consume_one(src, at, st, |ch| pred(ch)),
        Checker::Category(cat) => consume_one(src, at, st, |ch| cat.contains(ch)),
        Checker::LineEnd => {
            if at >= src.len() {
                return Err(st.miss(at, Miss::AtEnd));
            }
            for term in LINE_TERMINATORS {
                if src.starts_with(at, term) {
                    let end = at + term.chars().count();
                    st.hit(at, end);
                    return Ok(end);
                }
            }
            Err(st.miss(at, Miss::NoMatch))
        }
        Checker::SourceEnd => {
            if at >= src.len() {
                st.hit(at, at);
                Ok(at)
            } else {
                Err(st.miss(at, Miss::NoMatch))
            }
        }
    }
}

fn consume_one(src: &Source, at: usize, st: &mut State, test: impl Fn(char) -> bool) -> Step {
    match src.get(at) {
        None => Err(st.miss(at, Miss::AtEnd)),
        Some(ch) if test(ch) => {
            st.hit(at, at + 1);
            Ok(at + 1)
        }
        Some(_) => Err(st.miss(at, Miss::NoMatch)),
    }
}

/// Ordered choice: first success wins. When every alternative fails, the
/// first alternative's error is the one reported, since the first option is
/// "the expected thing".
fn consume_alt(alts: &[Pattern], src: &Source, at: usize, st: &mut State) -> Step {
    let mut first_err = None;
    for alt in alts {
        match consume(alt, src, at, st) {
            Ok(end) => return Ok(end),
            Err(miss) => {
                first_err.get_or_insert(miss);
            }
        }
    }
    Err(first_err.unwrap_or(Miss::NoMatch))
}

fn consume_range(r: &Ranger, src: &Source, at: usize, st: &mut State) -> Step {
    // No partial range: a failed opening delimiter fails the whole node.
    let mut cur = consume(&r.from, src, at, st)?;

    if r.nested {
        let mut level = 1usize;
        while level > 0 {
            if cur >= src.len() {
                return Err(st.miss(at, Miss::AtEnd));
            }
            if peek(&r.from, src, cur)
                && let Ok(next) = consume(&r.from, src, cur, st)
                && next > cur
            {
                cur = next;
                level += 1;
                continue;
            }
            if peek(&r.to, src, cur)
                && let Ok(next) = consume(&r.to, src, cur, st)
            {
                cur = next;
                level -= 1;
                continue;
            }
            cur += 1;
        }
        Ok(cur)
    } else {
        loop {
            if cur >= src.len() {
                return Err(st.miss(at, Miss::AtEnd));
            }
            if let Some(escape) = &r.escape
                && peek(escape, src, cur)
                && let Ok(next) = consume(escape, src, cur, st)
            {
                // The escape passes over the escaped character as well, so
                // an escaped closing delimiter does not end the range.
                cur = (next + 1).min(src.len());
                continue;
            }
            if peek(&r.to, src, cur)
                && let Ok(next) = consume(&r.to, src, cur, st)
            {
                return Ok(next);
            }
            cur += 1;
        }
    }
}

fn consume_capture_ref(name: &str, src: &Source, at: usize, st: &mut State) -> Step {
    // Re-evaluated at use time: the capture may have been written earlier in
    // this same attempt. An absent capture fails.
    let text = match st.caps.get(name) {
        Some(cap) => cap.text(src),
        None => return Err(st.miss(at, Miss::NoMatch)),
    };
    if at + text.chars().count() > src.len() {
        return Err(st.miss(at, Miss::AtEnd));
    }
    let mut cur = at;
    for ch in text.chars() {
        match src.get(cur) {
            Some(got) if got == ch => cur += 1,
            _ => return Err(st.miss(at, Miss::NoMatch)),
        }
    }
    st.hit(at, cur);
    Ok(cur)
}

// ─── Neglect ────────────────────────────────────────────────────────────────

/// The same-width complement walk: leaf tests inverted, widths preserved,
/// structure mirrored.
fn neglect(p: &Pattern, src: &Source, at: usize, st: &mut State) -> Step {
    match p {
        Pattern::Literal(lit) => neglect_literal(lit, src, at, st),
        Pattern::Checker(checker) => neglect_checker(checker, src, at, st),
        Pattern::Concat(a, b) => {
            let mid = neglect(a, src, at, st)?;
            neglect(b, src, mid, st)
        }
        Pattern::Alt(alts) => neglect_alt(alts, src, at, st),
        // The builder rejects negated ranges; this is reachable only through
        // a range bound into a Rec cell after the negation was built.
        Pattern::Range(_) => panic!("a delimited range has no complement"),
        Pattern::Repeat(node, count) => {
            let mut cur = at;
            for _ in 0..*count {
                cur = neglect(node, src, cur, st)?;
            }
            Ok(cur)
        }
        Pattern::Span(node) => {
            let first = neglect(node, src, at, st)?;
            Ok(extend(node, src, first, st, neglect))
        }
        Pattern::Closure(node) => Ok(extend(node, src, at, st, neglect)),
        Pattern::Opt(node) => Ok(neglect(node, src, at, st).unwrap_or(at)),
        Pattern::Not(node) => consume(node, src, at, st),
        Pattern::Capture { name, node } => {
            let end = neglect(node, src, at, st)?;
            st.caps.record(name, at, end - at);
            Ok(end)
        }
        Pattern::CaptureRef(name) => neglect_capture_ref(name, src, at, st),
        Pattern::Rec(rec) => match rec.get() {
            Some(body) => neglect(body, src, at, st),
            None => Err(Miss::NoMatch),
        },
    }
}

fn neglect_literal(lit: &Literal, src: &Source, at: usize, st: &mut State) -> Step {
    if lit.is_empty() {
        // The empty run matches everywhere; its complement matches nowhere.
        return Err(st.miss(at, Miss::NoMatch));
    }
    let end = at + lit.len();
    if end > src.len() {
        return Err(st.miss(at, Miss::AtEnd));
    }
    let differs = (0..lit.len()).any(|idx| match src.get(at + idx) {
        Some(ch) => !lit.matches_at(idx, ch),
        None => false,
    });
    if differs {
        st.hit(at, end);
        Ok(end)
    } else {
        Err(st.miss(at, Miss::NoMatch))
    }
}

fn neglect_checker(checker: &Checker, src: &Source, at: usize, st: &mut State) -> Step {
    match checker {
        Checker::Pred(pred) => consume_one(src, at, st, |ch| !pred(ch)),
        Checker::Category(cat) => consume_one(src, at, st, |ch| !cat.contains(ch)),
        // Any one character that does not begin a line terminator.
        Checker::LineEnd => consume_one(src, at, st, |ch| !starts_line_terminator(ch)),
        Checker::SourceEnd => {
            if at < src.len() {
                st.hit(at, at);
                Ok(at)
            } else {
                Err(st.miss(at, Miss::NoMatch))
            }
        }
    }
}

/// Neglect over ordered choice: every alternative must be absent here. Each
/// alternative's neglect runs in declared order and the first failure
/// propagates; on success the narrowest alternative bounds the advance.
fn neglect_alt(alts: &[Pattern], src: &Source, at: usize, st: &mut State) -> Step {
    let mut min_end: Option<usize> = None;
    for alt in alts {
        let end = neglect(alt, src, at, st)?;
        min_end = Some(min_end.map_or(end, |m| m.min(end)));
    }
    match min_end {
        Some(end) => Ok(end),
        None => Err(st.miss(at, Miss::NoMatch)),
    }
}

fn neglect_capture_ref(name: &str, src: &Source, at: usize, st: &mut State) -> Step {
    let text = match st.caps.get(name) {
        Some(cap) => cap.text(src),
        None => return Err(st.miss(at, Miss::NoMatch)),
    };
    let width = text.chars().count();
    if width == 0 {
        return Err(st.miss(at, Miss::NoMatch));
    }
    let end = at + width;
    if end > src.len() {
        return Err(st.miss(at, Miss::AtEnd));
    }
    let differs = text
        .chars()
        .enumerate()
        .any(|(idx, ch)| src.get(at + idx) != Some(ch));
    if differs {
        st.hit(at, end);
        Ok(end)
    } else {
        Err(st.miss(at, Miss::NoMatch))
    }
}

// ─── Header test ────────────────────────────────────────────────────────────

/// Cheap, non-mutating "could this pattern start matching here?" test.
/// Conservative: never a false negative, so a `true` only costs the caller a
/// full consume attempt.
fn peek(p: &Pattern, src: &Source, at: usize) -> bool {
    match p {
        Pattern::Literal(lit) => {
            lit.is_empty() || src.get(at).is_some_and(|ch| lit.matches_at(0, ch))
        }
        Pattern::Checker(checker) => peek_checker(checker, src, at),
        Pattern::Concat(a, _) => peek(a, src, at),
        Pattern::Alt(alts) => alts.iter().any(|alt| peek(alt, src, at)),
        Pattern::Range(r) => peek(&r.from, src, at),
        Pattern::Repeat(node, count) => *count == 0 || peek(node, src, at),
        Pattern::Span(node) => peek(node, src, at),
        // Zero-width success is always possible.
        Pattern::Closure(_) | Pattern::Opt(_) => true,
        Pattern::Not(node) => peek_not(node, src, at),
        Pattern::Capture { node, .. } => peek(node, src, at),
        // Capture values and recursive bodies are runtime state; stay
        // conservative (and avoid recursing into a self-referential tree).
        Pattern::CaptureRef(_) | Pattern::Rec(_) => true,
    }
}

fn peek_checker(checker: &Checker, src: &Source, at: usize) -> bool {
    match checker {
        Checker::Pred(pred) => src.get(at).is_some_and(|ch| pred(ch)),
        Checker::Category(cat) => src.get(at).is_some_and(|ch| cat.contains(ch)),
        Checker::LineEnd => src.get(at).is_some_and(starts_line_terminator),
        Checker::SourceEnd => at >= src.len(),
    }
}

fn peek_not(node: &Pattern, src: &Source, at: usize) -> bool {
    match node {
        Pattern::Checker(Checker::SourceEnd) => at < src.len(),
        Pattern::Checker(checker) => src.get(at).is_some() && !peek_checker(checker, src, at),
        Pattern::Literal(lit) if lit.len() == 1 => {
            src.get(at).is_some_and(|ch| !lit.matches_at(0, ch))
        }
        Pattern::Literal(lit) => at + lit.len() <= src.len(),
        _ => true,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
