// Shared helpers for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use invnorm::gateway::{GatewayError, InferenceGateway, TextGenerator};

/// Replays canned replies in order and records every prompt it receives.
/// `None` in the script simulates a transport failure; an exhausted script
/// behaves the same way.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str, _system_prompt: Option<&str>) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or_else(|| GatewayError::Unavailable("scripted failure".to_string()))
    }
}

/// Gateway backed by a script, plus a handle on the recorded prompts
pub fn scripted_gateway(replies: &[Option<&str>]) -> (InferenceGateway, Arc<Mutex<Vec<String>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let generator = ScriptedGenerator {
        replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
        prompts: Arc::clone(&prompts),
    };
    (InferenceGateway::with_generator(Box::new(generator)), prompts)
}
