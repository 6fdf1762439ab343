//! The result assembler (component G): turns a search [`Outcome`] back into
//! a `(format, decoded value, locales)` triple by splicing chosen
//! specifiers into the original literal/candidate token sequence.

use std::collections::BTreeSet;

use crate::hypothesis::Candidate;
use crate::search::Outcome;
use crate::segment::InputToken;
use crate::value::DecodedValue;

/// One top-scoring interpretation of an input string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCandidate {
    pub format: String,
    pub value: Option<DecodedValue>,
    /// `None` when no locale-distinguishing evidence contributed (a
    /// universal match); `Some` is never empty.
    pub locales: Option<BTreeSet<String>>,
}

/// Reconstruct the output format string for one outcome: literal tokens
/// pass through unchanged, candidate tokens become either their chosen
/// specifier or (if left unassigned) their original text, and any `%C%y`
/// left adjacent by the search's century/year ordering constraint collapses
/// to `%Y`.
pub fn assemble(tokens: &[InputToken], candidates: &[Candidate], outcome: &Outcome) -> ParsedCandidate {
    let mut format = String::new();
    let mut candidate_index = 0;
    for token in tokens {
        match token {
            InputToken::Literal(text) => format.push_str(text),
            InputToken::Candidate(text) => {
                match outcome.choices[candidate_index] {
                    Some(assignment_index) => {
                        let assignment = &candidates[candidate_index].assignments[assignment_index];
                        format.push('%');
                        format.push(assignment.specifier.as_char());
                    }
                    None => format.push_str(text),
                }
                candidate_index += 1;
            }
        }
    }
    let format = format.replace("%C%y", "%Y");

    let locales = (!outcome.locales.is_empty())
        .then(|| outcome.locales.iter().map(|id| id.to_string()).collect());

    ParsedCandidate {
        format,
        value: outcome.value,
        locales,
    }
}

/// Assemble every outcome, deduplicating triples that land on the same
/// `(format, value, locales)` despite coming from distinct search paths
/// (e.g. two equally-scored ways of leaving the same digit unassigned).
pub fn assemble_all(tokens: &[InputToken], candidates: &[Candidate], outcomes: &[Outcome]) -> Vec<ParsedCandidate> {
    let mut results: Vec<ParsedCandidate> = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let candidate = assemble(tokens, candidates, outcome);
        if !results.contains(&candidate) {
            results.push(candidate);
        }
    }
    results
}
