use catalog_core::{update, Msg, SessionState, Status};

#[test]
fn update_is_noop() {
    let state = SessionState::new();
    let (mut next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn new_session_is_idle_on_page_one() {
    let view = SessionState::new().view();
    assert_eq!(view.status, Status::Idle);
    assert_eq!(view.page, 1);
    assert!(view.results.is_empty());
    assert!(!view.has_more);
    assert!(!view.loading_more);
}
