//! Collation capability for index ordering.
//!
//! Sorting street names is locale business; the builder only depends on
//! the [`Collator`] trait. The deterministic [`BytewiseCollator`] backs
//! tests, while [`NaturalCollator`] is the production default: it compares
//! digit runs numerically so "Route 9" sorts before "Route 10". A real
//! locale collation library can be plugged in through the same trait.

use std::cmp::Ordering;

/// Compares two normalized sort keys.
pub trait Collator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain byte-order comparison. Fully deterministic and locale-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytewiseCollator;

impl Collator for BytewiseCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Natural-order comparison: contiguous digit runs compare as numbers,
/// everything else as characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalCollator;

impl Collator for NaturalCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let mut ca = a.chars().peekable();
        let mut cb = b.chars().peekable();
        loop {
            match (ca.peek().copied(), cb.peek().copied()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(x), Some(y)) => {
                    if x.is_ascii_digit() && y.is_ascii_digit() {
                        let na = take_number(&mut ca);
                        let nb = take_number(&mut cb);
                        match compare_digit_runs(&na, &nb) {
                            Ordering::Equal => {}
                            ord => return ord,
                        }
                    } else {
                        match x.cmp(&y) {
                            Ordering::Equal => {
                                ca.next();
                                cb.next();
                            }
                            ord => return ord,
                        }
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied()
        && c.is_ascii_digit()
    {
        run.push(c);
        chars.next();
    }
    run
}

/// Compares digit runs of arbitrary length: strip leading zeros, then a
/// longer run is larger, then lexicographic. Equal values fall back to the
/// raw run so "007" and "7" still order deterministically.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    sa.len()
        .cmp(&sb.len())
        .then_with(|| sa.cmp(sb))
        .then_with(|| a.cmp(b))
}
