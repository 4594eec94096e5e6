//! Transition rules: `(was_alive, live_neighbors) -> alive`.
//!
//! Life-like rules are stored as birth/survival count sets. Anything else can be
//! supplied as a closure.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::Error;

type Predicate = dyn Fn(bool, usize) -> bool + Send + Sync;

/// Birth and survival counts of a life-like rule, kept sorted and deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeLikeCounts {
    birth: Vec<usize>,
    survival: Vec<usize>,
}

impl LifeLikeCounts {
    pub fn new(birth: &[usize], survival: &[usize]) -> Self {
        LifeLikeCounts {
            birth: birth.iter().copied().sorted().dedup().collect(),
            survival: survival.iter().copied().sorted().dedup().collect(),
        }
    }

    pub fn birth(&self) -> &[usize] {
        &self.birth
    }

    pub fn survival(&self) -> &[usize] {
        &self.survival
    }
}

/// Decides the next state of a cell from its current state and live neighbor count.
#[derive(Clone)]
pub enum Rule {
    /// Born with a count in `birth`, survives with a count in `survival`.
    LifeLike(LifeLikeCounts),
    Custom(Arc<Predicate>),
}

impl Rule {
    /// Life-like rule from birth and survival counts. Duplicates are dropped.
    pub fn life_like(birth: &[usize], survival: &[usize]) -> Self {
        Rule::LifeLike(LifeLikeCounts::new(birth, survival))
    }

    /// Rule from an arbitrary predicate.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(bool, usize) -> bool + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(f))
    }

    /// Next state of a cell.
    #[inline]
    pub fn next_state(&self, was_alive: bool, live_neighbors: usize) -> bool {
        match self {
            Rule::LifeLike(counts) => {
                let counts = if was_alive { &counts.survival } else { &counts.birth };
                counts.binary_search(&live_neighbors).is_ok()
            }
            Rule::Custom(f) => f(was_alive, live_neighbors),
        }
    }
}

impl Default for Rule {
    /// B3/S23.
    fn default() -> Self {
        Rule::life_like(&[3], &[2, 3])
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::LifeLike(_) => write!(f, "Rule({})", self),
            Rule::Custom(_) => write!(f, "Rule(<custom>)"),
        }
    }
}

/// Single digits are written run together (`23`). Any count of 10 or more
/// switches to comma form, and a lone count keeps a trailing comma (`12,`) so it
/// does not read back as `1` and `2`.
fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[usize]) -> fmt::Result {
    if counts.iter().all(|&c| c < 10) {
        write!(f, "{}", counts.iter().join(""))
    } else if counts.len() == 1 {
        write!(f, "{},", counts[0])
    } else {
        write!(f, "{}", counts.iter().join(","))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::LifeLike(counts) => {
                write!(f, "B")?;
                write_counts(f, counts.birth())?;
                write!(f, "/S")?;
                write_counts(f, counts.survival())
            }
            Rule::Custom(_) => write!(f, "<custom>"),
        }
    }
}

fn parse_counts(rule: &str, digits: &str) -> Result<Vec<usize>, Error> {
    let invalid = |reason: String| Error::InvalidRule {
        rule: rule.to_string(),
        reason,
    };

    if digits.contains(',') {
        // One trailing comma is allowed, so `12,` is the single count twelve.
        let list = digits.strip_suffix(',').unwrap_or(digits);
        list.split(',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(format!("bad neighbor count {:?}", part)))
            })
            .collect()
    } else {
        digits
            .chars()
            .map(|ch| {
                ch.to_digit(10)
                    .map(|d| d as usize)
                    .ok_or_else(|| invalid(format!("bad neighbor count {:?}", ch)))
            })
            .collect()
    }
}

impl FromStr for Rule {
    type Err = Error;

    /// Parses `B<counts>/S<counts>`, e.g. `B3/S23` or `B3/S2,3,10`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| Error::InvalidRule {
            rule: s.to_string(),
            reason: reason.to_string(),
        };

        let (b, survival) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expected B<counts>/S<counts>"))?;
        let birth = b
            .strip_prefix(['B', 'b'])
            .ok_or_else(|| invalid("birth counts must start with 'B'"))?;
        let survival = survival
            .strip_prefix(['S', 's'])
            .ok_or_else(|| invalid("survival counts must start with 'S'"))?;

        Ok(Rule::life_like(
            &parse_counts(s, birth)?,
            &parse_counts(s, survival)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_b3s23() {
        let rule = Rule::default();
        for count in 0..=26 {
            assert_eq!(rule.next_state(false, count), count == 3);
            assert_eq!(rule.next_state(true, count), count == 2 || count == 3);
        }
        assert_eq!(rule.to_string(), "B3/S23");
    }

    #[test]
    fn test_parse_rule() {
        let rule: Rule = "B36/S23".parse().unwrap();
        assert!(rule.next_state(false, 6));
        assert!(!rule.next_state(true, 6));
        assert_eq!(rule.to_string(), "B36/S23");

        let lower: Rule = "b3/s23".parse().unwrap();
        assert_eq!(lower.to_string(), "B3/S23");

        let empty: Rule = "B/S".parse().unwrap();
        assert!(!empty.next_state(false, 3));
        assert!(!empty.next_state(true, 2));
    }

    #[test]
    fn test_parse_large_counts() {
        let rule: Rule = "B3,13/S2,3,26".parse().unwrap();
        assert!(rule.next_state(false, 13));
        assert!(rule.next_state(true, 26));
        assert!(!rule.next_state(false, 1));
        assert_eq!(rule.to_string(), "B3,13/S2,3,26");
    }

    #[test]
    fn test_parse_rule_errors() {
        for bad in ["", "B3", "3/23", "B3/23", "B3x/S23", "B,/S2", "B3,,/S2", "B,3/S2"] {
            assert!(
                matches!(bad.parse::<Rule>(), Err(Error::InvalidRule { .. })),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_single_large_count_reads_back() {
        let rule = Rule::life_like(&[12], &[2, 3]);
        assert_eq!(rule.to_string(), "B12,/S23");

        let parsed: Rule = rule.to_string().parse().unwrap();
        for count in 0..=80 {
            assert_eq!(parsed.next_state(false, count), rule.next_state(false, count));
            assert_eq!(parsed.next_state(true, count), rule.next_state(true, count));
        }
        assert!(parsed.next_state(false, 12));
        assert!(!parsed.next_state(false, 1));
        assert!(!parsed.next_state(false, 2));

        let trailing: Rule = "B3,/S2".parse().unwrap();
        assert_eq!(trailing.to_string(), "B3/S2");
    }

    #[test]
    fn test_life_like_counts_stay_sorted() {
        // Lookup relies on sorted counts; unsorted input must still match.
        let rule = Rule::life_like(&[6, 3, 6], &[3, 2]);
        match &rule {
            Rule::LifeLike(counts) => {
                assert_eq!(counts.birth(), &[3, 6]);
                assert_eq!(counts.survival(), &[2, 3]);
            }
            Rule::Custom(_) => panic!("expected a life-like rule"),
        }
        for count in 0..=26 {
            assert_eq!(rule.next_state(false, count), count == 3 || count == 6);
            assert_eq!(rule.next_state(true, count), count == 2 || count == 3);
        }
    }

    #[test]
    fn test_life_like_dedups() {
        let rule = Rule::life_like(&[3, 3, 1], &[]);
        assert_eq!(rule.to_string(), "B13/S");
    }

    #[test]
    fn test_custom_rule() {
        let rule = Rule::from_fn(|alive, count| !alive && count == 1);
        assert!(rule.next_state(false, 1));
        assert!(!rule.next_state(true, 1));
        assert_eq!(rule.to_string(), "<custom>");
        assert_eq!(format!("{:?}", rule), "Rule(<custom>)");
    }
}
