use super::block_set::BlockSet;
use super::engine::{BlocklistEngine, BlocklistRules, ParsedLine};
use dns_blocker_domain::BlocklistFormat;

/// Hosts-file rules: `<address> <domain> [ignored...]`, `#` comments,
/// exact-match lookup.
pub struct HostsRules;

pub type HostsDecisionEngine = BlocklistEngine<HostsRules>;

impl BlocklistRules for HostsRules {
    const FORMAT: BlocklistFormat = BlocklistFormat::Hosts;

    fn parse_line(line: &str) -> ParsedLine {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return ParsedLine::Ignored;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(_address), Some(domain)) => ParsedLine::Entry(domain.to_string()),
            _ => ParsedLine::Malformed,
        }
    }

    #[inline]
    fn is_blocked(block_set: &BlockSet, fqdn: &str) -> bool {
        block_set.contains(fqdn)
    }
}
