pub mod block_set;
pub mod engine;
pub mod filter_list;
pub mod hosts;
pub mod selector;

pub use block_set::BlockSet;
pub use engine::{BlocklistEngine, BlocklistRules, ParsedLine};
pub use filter_list::{label_suffixes, FilterListDecisionEngine, FilterListRules};
pub use hosts::{HostsDecisionEngine, HostsRules};
pub use selector::{
    build_engine, prepare_blocklist, prepare_blocklist_from_config, BlocklistSettings,
    PreparedBlocklist, ShutdownHook,
};
