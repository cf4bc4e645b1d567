use crate::{Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadFirstPage { query } => state.begin_first_page(query),
        Msg::Search(raw) => state.begin_first_page(raw.trim().to_owned()),
        Msg::Refresh => {
            let query = state.query().to_owned();
            state.begin_first_page(query)
        }
        Msg::LoadNextPage => state.begin_next_page(),
        Msg::PageLoaded { request_id, result } => {
            state.apply_page(request_id, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
