use serde::Serialize;

pub mod contact;

/// Body of every response the api sends: a human readable message.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}
