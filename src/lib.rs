//! Public Wedding Pages
//!
//! Resolves a shareable identifier (a custom slug or an owner id) into a
//! complete wedding record, falling back from the authoritative backend to a
//! local registry and filling gaps from a baseline template, then counts down
//! to the event.

pub mod domain;
pub use domain::{
    BaselineTemplate, Config, CountdownBreakdown, LookupKey, PartialWeddingRecord, RouteParams,
    WeddingRecord,
};

pub mod storage;
pub use storage::{DirectoryStore, Registry};

pub mod source;
pub use source::{LocalSource, Provenance, RemoteSource, Source, SourceChain};

pub mod page;
pub use page::{PageState, Resolver, WeddingPage};
