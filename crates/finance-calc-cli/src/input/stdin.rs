use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Calculator input piped on stdin, deserialised straight into the engine's
/// input type. `None` when stdin is a terminal or carries nothing, in which
/// case the command falls back to its flags.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut piped = String::new();
    io::stdin().read_to_string(&mut piped)?;
    parse_piped(&piped)
}

fn parse_piped<T: DeserializeOwned>(piped: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let body = piped.trim();
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| format!("Invalid calculator input on stdin: {e}").into())
}
