//! # Host Bridge
//!
//! Maps the action names a host application sends (`"start"`, `"stop"`) onto
//! a [`SessionController`] and turns every outcome into a [`Response`] with a
//! JSON envelope:
//!
//! ```text
//! {"status": "ok"}
//! {"status": "ok", "result": {"cpu": .., "wifi": .., "mobile": .., "total": .., "total%": ..}}
//! {"status": "error", "message": ".."}
//! ```
//!
//! Unknown actions produce [`Response::Unsupported`], which hosts report as
//! "not handled" rather than as a failure of a known action.

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::counters::ProcCounterSource;
use crate::error::{Error, Result};
use crate::power::PowerModel;
use crate::session::{DrainReport, SessionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            other => Err(Error::invalid_data(format!("unknown action '{}'", other))),
        }
    }
}

/// Outcome of one host action
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The action succeeded with nothing to return
    Ack,
    Report(DrainReport),
    /// The action failed; carries the host-facing error text
    Error(String),
    /// The action name is not one this bridge handles
    Unsupported(String),
}

impl Response {
    pub fn from_error(error: &Error) -> Self {
        Response::Error(error_message(error))
    }

    /// Whether the bridge recognised the action at all
    pub fn is_handled(&self) -> bool {
        !matches!(self, Response::Unsupported(_))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ack | Response::Report(_))
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Response::Ack => json!({ "status": "ok" }),
            Response::Report(report) => json!({ "status": "ok", "result": report.to_json()? }),
            Response::Error(message) => json!({ "status": "error", "message": message }),
            Response::Unsupported(action) => {
                json!({ "status": "error", "message": format!("unsupported action '{}'", action) })
            },
        })
    }
}

/// Host-facing text for an error: `"<cause>: <message>"`, or just the message
/// when the error has no underlying cause or its message already names it.
pub fn error_message(error: &Error) -> String {
    let message = error.to_string();
    match error.source().map(|cause| cause.to_string()) {
        Some(cause) if !message.contains(&cause) => format!("{}: {}", cause, message),
        _ => message,
    }
}

/// Executes host actions
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn execute(&self, action: Action) -> Response;

    /// Parses `name` and executes it; unknown names are [`Response::Unsupported`]
    async fn handle(&self, name: &str) -> Response {
        match name.parse::<Action>() {
            Ok(action) => self.execute(action).await,
            Err(_) => {
                debug!(action = name, "Unsupported action");
                Response::Unsupported(name.to_string())
            },
        }
    }
}

/// Bridge owning the single drain session of a host
pub struct DrainPlugin {
    controller: SessionController,
}

impl DrainPlugin {
    pub fn new(controller: SessionController) -> Self {
        Self { controller }
    }

    /// Plugin reading the Linux kernel counters named in `config`
    pub fn with_proc_counters(model: Arc<dyn PowerModel>, config: SessionConfig) -> Result<Self> {
        let source = Arc::new(ProcCounterSource::from_config(&config));
        Ok(Self::new(SessionController::new(source, model, config)?))
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }
}

#[async_trait]
impl ActionHandler for DrainPlugin {
    async fn execute(&self, action: Action) -> Response {
        let result = match action {
            Action::Start => self.controller.start().await.map(|()| Response::Ack),
            Action::Stop => self.controller.stop().await.map(Response::Report),
        };

        result.unwrap_or_else(|e| {
            warn!(%action, error = %e, "Action failed");
            Response::from_error(&e)
        })
    }
}
