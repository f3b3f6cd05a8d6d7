//! Outbound action signals.
//!
//! Emitting is fire-and-forget: the transport performs the round-trip and
//! later reports the replaced content region back to the controller.

use log::debug;
use std::fmt;

use crate::dom::ElementId;

/// Named request for the rendering/transport collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    EnableFlag,
    DisableFlag,
    RemoveFlag,
    ToggleDetail,
    Search,
    Refresh,
    TogglePause,
}

impl Signal {
    /// Event name as triggered on the target element
    pub fn name(self) -> &'static str {
        match self {
            Signal::EnableFlag => "enable-flag",
            Signal::DisableFlag => "disable-flag",
            Signal::RemoveFlag => "remove-flag",
            Signal::ToggleDetail => "toggle-detail",
            Signal::Search => "search",
            Signal::Refresh => "refresh",
            Signal::TogglePause => "toggle-pause",
        }
    }

    /// Whether the signal acts on the selected row rather than a page control
    pub fn is_row_scoped(self) -> bool {
        matches!(
            self,
            Signal::EnableFlag | Signal::DisableFlag | Signal::RemoveFlag | Signal::ToggleDetail
        )
    }

    /// The server request this signal stands for.
    ///
    /// Row-scoped signals need the flag key; `None` is returned without one.
    /// `state_on` is the current state of the toggled thing: the detail panel
    /// for `ToggleDetail`, pause for `TogglePause`.
    pub fn round_trip(self, flag_key: Option<&str>, state_on: bool) -> Option<RoundTrip> {
        let key = || flag_key.map(|k| urlencoding::encode(k).into_owned());

        let trip = match self {
            Signal::EnableFlag => RoundTrip::new(Method::Post, format!("/override/{}/true", key()?)),
            Signal::DisableFlag => RoundTrip::new(Method::Post, format!("/override/{}/false", key()?)),
            Signal::RemoveFlag => RoundTrip::new(Method::Delete, format!("/override/{}", key()?)),
            Signal::ToggleDetail => {
                let path = format!("/dashboard/feature/{}", key()?);
                if state_on {
                    RoundTrip::new(Method::Get, path)
                } else {
                    RoundTrip::new(Method::Get, format!("{}?details=1", path))
                }
            }
            Signal::Search => RoundTrip::new(Method::Post, "/dashboard/search"),
            Signal::Refresh => RoundTrip::new(Method::Post, "/dashboard/refresh"),
            Signal::TogglePause if state_on => RoundTrip::new(Method::Post, "/dashboard/unpause"),
            Signal::TogglePause => RoundTrip::new(Method::Post, "/dashboard/pause"),
        };
        Some(trip)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub method: Method,
    pub path: String,
}

impl RoundTrip {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RoundTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One emitted signal and the element it was triggered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub target: ElementId,
    pub signal: Signal,
}

/// The outbound side of the rendering/transport collaborator
pub trait Transport {
    fn trigger(&mut self, target: ElementId, signal: Signal);
}

/// Collects triggers for a host to process after the current event
impl Transport for Vec<Trigger> {
    fn trigger(&mut self, target: ElementId, signal: Signal) {
        self.push(Trigger { target, signal });
    }
}

/// Emit `signal` on `target`; a missing target is a silent no-op.
///
/// Returns whether anything was emitted.
pub fn emit(transport: &mut dyn Transport, target: Option<ElementId>, signal: Signal) -> bool {
    match target {
        Some(target) => {
            debug!("emit {} on {:?}", signal, target);
            transport.trigger(target, signal);
            true
        }
        None => {
            debug!("skip {}: no target element", signal);
            false
        }
    }
}
