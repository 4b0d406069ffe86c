use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResult {
    pub ok: bool,
    pub message: String,
}

impl PingResult {
    pub fn pong() -> Self {
        Self {
            ok: true,
            message: "pong".to_string(),
        }
    }
}
