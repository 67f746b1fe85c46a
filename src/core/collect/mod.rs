//! Paginated collection with filtering and deduplication
//!
//! - [`source`] - per-endpoint page parsing and termination rules
//! - [`filter`] - client-side predicates applied to every page
//! - [`accumulator`] - ordered dedup store for one run
//! - [`collector`] - the fetch/wait/finalize state machine

pub mod accumulator;
pub mod collector;
pub mod filter;
pub mod source;

pub use accumulator::Accumulator;
pub use collector::{CollectionOutcome, CollectionSummary, CollectorState, PaginatedCollector};
pub use filter::{Predicate, RecordFilter};
pub use source::{
    CommunityPostSource, IncrementalTicketSource, Page, PageSource, Termination,
    TicketSearchSource, INCREMENTAL_PAGE_LIMIT,
};
