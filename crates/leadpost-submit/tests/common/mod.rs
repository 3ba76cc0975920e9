//! Shared fakes for submission tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use leadpost_submit::{FormPoster, FormResponse, TransportError};

/// Replays canned replies in order and remembers every request.
#[derive(Default)]
pub struct ScriptedPoster {
    replies: RefCell<VecDeque<Result<FormResponse, TransportError>>>,
    pub calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedPoster {
    pub fn new(replies: Vec<Result<FormResponse, TransportError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: RefCell::default(),
        }
    }
}

impl FormPoster for ScriptedPoster {
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<FormResponse, TransportError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), fields.to_vec()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}
