//! Catalog engine: transport, decoding, pagination, reference resolution and
//! the session runtime that executes core effects.
mod client;
mod codec;
mod detail;
mod endpoints;
mod paginate;
mod resolve;
mod session;
mod transport;
mod types;

pub use client::{CatalogClient, CatalogSettings, DEFAULT_BASE_URL};
pub use codec::{
    decode_batch, decode_character, decode_episode, decode_page, decode_record, CatalogEntity,
    DecodeError,
};
pub use detail::{fetch_entity, CharacterDetail, EpisodeDetail};
pub use endpoints::Endpoints;
pub use paginate::fetch_page;
pub use resolve::resolve_references;
pub use session::{ChannelObserver, SessionHandle, SessionObserver, SubscriptionId};
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{Collection, FailureKind, FetchError, HttpResponse};
