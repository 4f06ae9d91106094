/*!
 * Vocabulary filtering.
 *
 * Selects the records of a table that are relevant to a chunk of text. Records
 * are tried in table order and each one claims the occurrences of its source
 * term that no earlier record has claimed. Claims are tracked per byte, so the
 * text itself is never rewritten and no reserved marker character is needed.
 */

use crate::table::{Record, Table};

/// A byte span of the chunk claimed by one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    /// Byte offset of the first claimed byte
    pub start: usize,
    /// Byte offset one past the last claimed byte
    pub end: usize,
    /// Index of the claiming rule within its `RuleSet`
    pub rule: usize,
}

/// Records matched against a chunk, in table order, with their claims
#[derive(Debug, Clone, Default)]
pub struct RuleSet<'t> {
    rules: Vec<&'t Record>,
    claims: Vec<Claim>,
}

impl<'t> RuleSet<'t> {
    /// Matched records in table order
    pub fn rules(&self) -> &[&'t Record] {
        &self.rules
    }

    /// Claimed spans ordered by position in the chunk
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// The record that owns a claim
    pub fn rule_for(&self, claim: &Claim) -> &'t Record {
        self.rules[claim.rule]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Per-byte record of which parts of a chunk have been claimed
struct Occupancy {
    claimed: Vec<bool>,
}

impl Occupancy {
    fn new(len: usize) -> Self {
        Self {
            claimed: vec![false; len],
        }
    }

    /// Maximal unclaimed byte ranges, left to right.
    ///
    /// Claims always cover whole matches, so run boundaries fall on char
    /// boundaries.
    fn unclaimed_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;

        for (pos, &taken) in self.claimed.iter().enumerate() {
            match (taken, start) {
                (false, None) => start = Some(pos),
                (true, Some(s)) => {
                    runs.push((s, pos));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.claimed.len()));
        }

        runs
    }

    fn claim(&mut self, start: usize, end: usize) {
        self.claimed[start..end].fill(true);
    }
}

/// Select the table records whose source term occurs in `text`
pub fn filter_vocabulary<'t>(table: &'t Table, text: &str) -> RuleSet<'t> {
    select_rules(table.iter(), text)
}

/// Claim occurrences for each record in iteration order.
///
/// A record is kept when at least one occurrence of its source term lies
/// entirely in unclaimed text. Within each unclaimed run, occurrences are taken
/// left to right without overlapping each other.
pub fn select_rules<'t, I>(records: I, text: &str) -> RuleSet<'t>
where
    I: IntoIterator<Item = &'t Record>,
{
    let mut occupancy = Occupancy::new(text.len());
    let mut rule_set = RuleSet::default();

    for record in records {
        let term = record.source();
        if term.is_empty() || !text.contains(term) {
            continue;
        }

        let mut found = Vec::new();
        for (run_start, run_end) in occupancy.unclaimed_runs() {
            let run = &text[run_start..run_end];
            for (offset, matched) in run.match_indices(term) {
                let start = run_start + offset;
                found.push((start, start + matched.len()));
            }
        }

        if found.is_empty() {
            continue;
        }

        let rule = rule_set.rules.len();
        rule_set.rules.push(record);
        for (start, end) in found {
            occupancy.claim(start, end);
            rule_set.claims.push(Claim { start, end, rule });
        }
    }

    rule_set.claims.sort_by_key(|claim| claim.start);
    rule_set
}
