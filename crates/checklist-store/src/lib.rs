//! Persistence for disclosure checklists.
//!
//! [`FormGateway`] is the storage contract; [`InMemoryGateway`] and
//! [`JsonFileGateway`] implement it. [`FormSession`] wraps one form being
//! edited and handles debounced auto-save and publishing.

pub mod file;
pub mod gateway;
pub mod memory;
pub mod record;
pub mod session;
pub mod share;

pub use file::JsonFileGateway;
pub use gateway::{FormGateway, GatewayError, Result};
pub use memory::InMemoryGateway;
pub use record::{FormRecord, FormStatus, FormSummary, PublicLink, PublishedForm};
pub use session::{
    DEFAULT_AUTOSAVE_DELAY, DEFAULT_SHARE_BASE_URL, FormSession, SessionConfig, SessionError,
    SessionMode,
};
pub use share::{Route, share_url};
