//! Catalog core: entity model, pure list-session state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod page;
mod reference;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{
    Character, EntityId, Episode, UNKNOWN_ATTRIBUTE, UNKNOWN_LOCATION, UNKNOWN_TITLE,
};
pub use msg::{Msg, PageResult};
pub use page::{PageEnvelope, PageInfo};
pub use reference::{reference_id, unique_reference_ids};
pub use state::{RequestId, SessionState, Status};
pub use update::update;
pub use view_model::SessionView;
