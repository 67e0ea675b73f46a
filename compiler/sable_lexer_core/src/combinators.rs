//! Matcher combinators.
//!
//! Every combinator returns a new matcher; backtracking is free because a
//! failed match simply leaves the caller's offset untouched.
//!
//! # Invariant
//!
//! A successful match never moves backwards: `m.run(src, pos)` is either
//! `None` or `Some(end)` with `end >= pos`.

/// A grammar fragment.
///
/// Implemented for every `Fn(&[u8], usize) -> Option<usize>`, so plain
/// functions and the closures built below are interchangeable.
pub trait Matcher {
    fn run(&self, src: &[u8], pos: usize) -> Option<usize>;
}

impl<F> Matcher for F
where
    F: Fn(&[u8], usize) -> Option<usize>,
{
    #[inline]
    fn run(&self, src: &[u8], pos: usize) -> Option<usize> {
        self(src, pos)
    }
}

/// First matcher that succeeds wins.
#[macro_export]
macro_rules! alternatives {
    ($($m:expr),+ $(,)?) => {
        move |src: &[u8], pos: usize| -> Option<usize> {
            $(
                if let Some(end) = $crate::Matcher::run(&$m, src, pos) {
                    return Some(end);
                }
            )+
            None
        }
    };
}

/// All matchers in order; fails if any one does.
#[macro_export]
macro_rules! sequence {
    ($($m:expr),+ $(,)?) => {
        move |src: &[u8], pos: usize| -> Option<usize> {
            let end = pos;
            $( let end = $crate::Matcher::run(&$m, src, end)?; )+
            Some(end)
        }
    };
}

/// A literal byte string.
pub fn exactly(lit: &'static [u8]) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let end = pos.checked_add(lit.len())?;
        (src.get(pos..end)? == lit).then_some(end)
    }
}

/// A single literal byte.
pub fn exactly_char(c: u8) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        (src.get(pos) == Some(&c)).then_some(pos + 1)
    }
}

/// A literal compared ASCII case-insensitively.
pub fn insensitive(lit: &'static [u8]) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let end = pos.checked_add(lit.len())?;
        src.get(pos..end)?.eq_ignore_ascii_case(lit).then_some(end)
    }
}

/// One byte out of `set`.
pub fn class_char(set: &'static [u8]) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let b = src.get(pos)?;
        set.contains(b).then_some(pos + 1)
    }
}

/// One byte satisfying `pred`.
pub fn byte_if(pred: fn(u8) -> bool) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let b = *src.get(pos)?;
        pred(b).then_some(pos + 1)
    }
}

/// Any single byte except the end of input.
pub fn any_byte(src: &[u8], pos: usize) -> Option<usize> {
    (pos < src.len()).then_some(pos + 1)
}

pub fn one_plus<M: Matcher>(m: M) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let mut end = m.run(src, pos)?;
        while let Some(next) = m.run(src, end) {
            if next == end {
                break;
            }
            end = next;
        }
        Some(end)
    }
}

pub fn zero_plus<M: Matcher>(m: M) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let mut end = pos;
        while let Some(next) = m.run(src, end) {
            if next == end {
                break;
            }
            end = next;
        }
        Some(end)
    }
}

pub fn optional<M: Matcher>(m: M) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        Some(m.run(src, pos).unwrap_or(pos))
    }
}

/// Succeeds without consuming when `m` does not match.
pub fn negate<M: Matcher>(m: M) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        m.run(src, pos).is_none().then_some(pos)
    }
}

/// Succeeds without consuming when `m` matches.
pub fn lookahead<M: Matcher>(m: M) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        m.run(src, pos).map(|_| pos)
    }
}

/// Consume bytes until `stop` matches (not consuming it). Fails at end of input.
pub fn non_greedy<M: Matcher, S: Matcher>(
    m: M,
    stop: S,
) -> impl Fn(&[u8], usize) -> Option<usize> {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let mut end = pos;
        loop {
            if stop.run(src, end).is_some() {
                return Some(end);
            }
            let next = m.run(src, end)?;
            if next == end {
                return None;
            }
            end = next;
        }
    }
}

/// Scan forward to the next occurrence of `c`, returning its offset.
///
/// Uses `memchr`; the match does not include `c` itself.
pub fn until_byte(c: u8) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src: &[u8], pos: usize| -> Option<usize> {
        let rest = src.get(pos..)?;
        memchr::memchr(c, rest).map(|i| pos + i)
    }
}
