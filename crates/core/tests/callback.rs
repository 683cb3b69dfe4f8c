//! Tests for callback dispatch.

use llmapi_core::{CallbackManager, TokenSink};
use parking_lot::Mutex;
use std::sync::Arc;

struct Tagged {
    tag: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl TokenSink for Tagged {
    fn on_llm_new_token(&self, token: &str, _verbose: bool) {
        self.log.lock().push(format!("{}:{token}", self.tag));
    }
}

#[test]
fn dispatches_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut callbacks = CallbackManager::new();
    callbacks.add(Arc::new(Tagged { tag: "a", log: log.clone() }));
    callbacks.add(Arc::new(Tagged { tag: "b", log: log.clone() }));

    callbacks.on_llm_new_token("x", false);
    callbacks.on_llm_new_token("y", false);
    assert_eq!(*log.lock(), vec!["a:x", "b:x", "a:y", "b:y"]);
}

#[test]
fn closures_are_sinks() {
    let seen = Arc::new(Mutex::new(String::new()));
    let sink = {
        let seen = seen.clone();
        move |token: &str| seen.lock().push_str(token)
    };
    let callbacks = CallbackManager::new().with(Arc::new(sink));
    assert_eq!(callbacks.len(), 1);

    callbacks.on_llm_new_token("Par", false);
    callbacks.on_llm_new_token("is", false);
    assert_eq!(*seen.lock(), "Paris");
}

#[test]
fn empty_manager_is_a_no_op() {
    let callbacks = CallbackManager::new();
    assert!(callbacks.is_empty());
    callbacks.on_llm_new_token("ignored", true);
}
