use super::block_set::BlockSet;
use super::engine::{BlocklistEngine, BlocklistRules, ParsedLine};
use dns_blocker_domain::BlocklistFormat;
use std::iter;

/// Filter-list rules restricted to `||domain^`; a listed domain blocks
/// itself and every name below it.
pub struct FilterListRules;

pub type FilterListDecisionEngine = BlocklistEngine<FilterListRules>;

impl BlocklistRules for FilterListRules {
    const FORMAT: BlocklistFormat = BlocklistFormat::FilterList;

    fn parse_line(line: &str) -> ParsedLine {
        let line = line.trim();

        if line.is_empty() {
            return ParsedLine::Ignored;
        }

        match line
            .strip_prefix("||")
            .and_then(|rest| rest.strip_suffix('^'))
        {
            Some(domain) if !domain.is_empty() => ParsedLine::Entry(domain.to_string()),
            _ => ParsedLine::Malformed,
        }
    }

    #[inline]
    fn is_blocked(block_set: &BlockSet, fqdn: &str) -> bool {
        block_set.contains_any(label_suffixes(fqdn))
    }
}

/// Right-aligned suffixes of a canonical name that start on a label
/// boundary, shortest first.
///
/// `"a.example.com."` yields `"com."`, `"example.com."`, `"a.example.com."`.
pub fn label_suffixes(fqdn: &str) -> impl Iterator<Item = &str> {
    let without_root = fqdn.strip_suffix('.').unwrap_or(fqdn);
    without_root
        .rmatch_indices('.')
        .map(move |(dot, _)| &fqdn[dot + 1..])
        .chain(iter::once(fqdn))
}
