//! The `"Bn.../Sn..."` rule-string grammar and the [`Rule`] type.

use crate::error::Error;
use crate::neighbourhood::Neighbourhood;
use std::str::FromStr;

/// A neighbourhood plus birth (`B`) and survival (`S`) count sets.
///
/// Parsed from a `"B" digits "/" "S" digits` string, e.g. `"B3/S23"`. Each
/// digit names a neighbour-count threshold and must lie in `[0, n]` where
/// `n` is the neighbourhood's offset count.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    neighbourhood: Neighbourhood,
    birth: Vec<bool>,
    survival: Vec<bool>,
}

impl Rule {
    /// Builds a rule directly from birth/survival count lists, validating
    /// that every threshold fits the neighbourhood's size.
    pub fn new(birth: &[usize], survival: &[usize], neighbourhood: Neighbourhood) -> Result<Self, Error> {
        let n = neighbourhood.len();
        let mut birth_table = vec![false; n + 1];
        let mut survival_table = vec![false; n + 1];
        for &count in birth {
            if count > n {
                return Err(Error::invalid_argument(format!("birth count {count} exceeds neighbourhood size {n}")));
            }
            birth_table[count] = true;
        }
        for &count in survival {
            if count > n {
                return Err(Error::invalid_argument(format!(
                    "survival count {count} exceeds neighbourhood size {n}"
                )));
            }
            survival_table[count] = true;
        }
        Ok(Rule {
            neighbourhood,
            birth: birth_table,
            survival: survival_table,
        })
    }

    /// Parses a `"Bn.../Sn..."` rule string against the given neighbourhood.
    pub fn parse(s: &str, neighbourhood: Neighbourhood) -> Result<Self, Error> {
        let malformed = || Error::ParseRuleError(s.to_string());

        let (b_part, s_part) = s.split_once('/').ok_or_else(malformed)?;
        let b_digits = b_part.strip_prefix('B').ok_or_else(malformed)?;
        let s_digits = s_part.strip_prefix('S').ok_or_else(malformed)?;

        let parse_digits = |digits: &str| -> Result<Vec<usize>, Error> {
            digits
                .chars()
                .map(|c| c.to_digit(10).map(|d| d as usize).ok_or_else(malformed))
                .collect()
        };

        let birth = parse_digits(b_digits)?;
        let survival = parse_digits(s_digits)?;
        Rule::new(&birth, &survival, neighbourhood)
    }

    /// The neighbourhood this rule counts over.
    pub fn neighbourhood(&self) -> &Neighbourhood {
        &self.neighbourhood
    }

    /// Whether a dead cell with `count` living neighbours is born.
    pub fn births(&self, count: usize) -> bool {
        self.birth.get(count).copied().unwrap_or(false)
    }

    /// Whether a living cell with `count` living neighbours survives.
    pub fn survives(&self, count: usize) -> bool {
        self.survival.get(count).copied().unwrap_or(false)
    }
}

/// Parses a rule string against [`Neighbourhood::moore`], the classic
/// Game-of-Life neighbourhood.
impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Rule::parse(s, Neighbourhood::moore())
    }
}

/// A conjunction of [`Rule`]s: a cell's next state is agreed on only when
/// every rule in the set agrees, letting several neighbourhoods constrain
/// the same automaton at once.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet(Vec<Rule>);

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.0
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        RuleSet(vec![rule])
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}
