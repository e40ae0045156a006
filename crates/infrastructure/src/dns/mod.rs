pub mod block_filter;
pub mod blocklist;

pub use block_filter::{
    prepare_blocklist, prepare_blocklist_from_config, BlocklistSettings, FilterListDecisionEngine,
    HostsDecisionEngine, PreparedBlocklist, ShutdownHook,
};
pub use blocklist::{BlocklistResolver, SourceFetcher};
