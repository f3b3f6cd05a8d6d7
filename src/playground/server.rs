use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use log::{debug, info};

use crate::actions::{Signal, Trigger};
use crate::controller::{ReplacedRegion, SHORTCUTS, shortcuts::format_binding};
use crate::dom::{Document, MemoryDocument, NodeSpec};

/// One flag as the fake upstream knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagState {
    pub key: String,
    pub upstream_enabled: bool,
    pub override_enabled: Option<bool>,
    pub details_open: bool,
}

impl FlagState {
    pub fn new(key: impl Into<String>, upstream_enabled: bool) -> Self {
        Self {
            key: key.into(),
            upstream_enabled,
            override_enabled: None,
            details_open: false,
        }
    }

    pub fn effective(&self) -> bool {
        self.override_enabled.unwrap_or(self.upstream_enabled)
    }
}

/// In-process stand-in for the server that renders the flag page and answers
/// action signals by replacing parts of the document.
pub struct FlagServer {
    flags: Vec<FlagState>,
    search: String,
    paused: bool,
    syncs: u32,
    modifier_label: String,
    served: Vec<String>,
    matcher: SkimMatcherV2,
}

const DEMO_FLAGS: &[&str] = &[
    "checkout.new-flow",
    "search.fuzzy-ranking",
    "billing.invoice-pdf",
    "onboarding.tour",
    "profile.avatar-upload",
    "reports.export-csv",
    "notifications.digest",
    "admin.audit-log",
    "api.rate-limit-v2",
    "mobile.dark-mode",
    "editor.autosave",
    "payments.apple-pay",
];

impl FlagServer {
    pub fn new(flags: Vec<FlagState>, modifier_label: impl Into<String>) -> Self {
        Self {
            flags,
            search: String::new(),
            paused: false,
            syncs: 0,
            modifier_label: modifier_label.into(),
            served: Vec::new(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// `count` generated flags, every third one enabled upstream
    pub fn demo(count: usize, modifier_label: impl Into<String>) -> Self {
        let flags = (0..count)
            .map(|i| {
                let key = match DEMO_FLAGS.get(i) {
                    Some(name) => name.to_string(),
                    None => format!("experiment.variant-{}", i),
                };
                FlagState::new(key, i % 3 == 0)
            })
            .collect();
        Self::new(flags, modifier_label)
    }

    pub fn flags(&self) -> &[FlagState] {
        &self.flags
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Requests served so far, as `METHOD /path`
    pub fn served(&self) -> &[String] {
        &self.served
    }

    /// Flags matching the current search, best match first
    pub fn visible(&self) -> Vec<&FlagState> {
        let term = self.search.trim();
        if term.is_empty() {
            return self.flags.iter().collect();
        }

        let mut scored: Vec<(i64, usize, &FlagState)> = self
            .flags
            .iter()
            .enumerate()
            .filter_map(|(i, flag)| {
                self.matcher
                    .fuzzy_match(&flag.key, term)
                    .map(|score| (score, i, flag))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, flag)| flag).collect()
    }

    pub fn render_page(&self) -> Vec<NodeSpec> {
        let toolbar = NodeSpec::new("nav").children([
            NodeSpec::new("button")
                .id("sync")
                .text(format!("Sync ({})", self.syncs)),
            NodeSpec::new("button")
                .id("pause")
                .text(if self.paused { "Resume" } else { "Pause" }),
            NodeSpec::new("button").class("theme-toggle").text("Theme"),
            NodeSpec::new("button").class("help-trigger").text("Help"),
        ]);

        let help_lines = SHORTCUTS.iter().map(|entry| {
            NodeSpec::new("p")
                .class("shortcut")
                .attr("data-keys", format_binding(entry, &self.modifier_label))
                .text(entry.description)
        });
        // Presses on the text land on the wrapper, not the dialog itself
        let content = NodeSpec::new("div")
            .class("help-content")
            .child(NodeSpec::new("h2").text("Keyboard shortcuts"))
            .children(help_lines);
        let dialog = NodeSpec::new("dialog")
            .id("help-dialog")
            .child(content)
            .child(NodeSpec::new("button").text("Close"));

        vec![
            toolbar,
            NodeSpec::new("input")
                .class("input")
                .attr("name", "search")
                .value(self.search.clone()),
            NodeSpec::new("div").id("flags").children(self.render_rows()),
            dialog,
        ]
    }

    pub fn render_rows(&self) -> Vec<NodeSpec> {
        self.visible()
            .into_iter()
            .map(|flag| {
                NodeSpec::new("div")
                    .class("flag")
                    .id(row_id(&flag.key))
                    .attr("data-key", flag.key.clone())
                    .children(Self::render_row_content(flag))
            })
            .collect()
    }

    fn render_row_content(flag: &FlagState) -> Vec<NodeSpec> {
        let state = match flag.override_enabled {
            Some(true) => "on (override)",
            Some(false) => "off (override)",
            None if flag.upstream_enabled => "on",
            None => "off",
        };
        let mut content = vec![
            NodeSpec::new("span").class("flag-name").text(flag.key.clone()),
            NodeSpec::new("span").class("flag-state").text(state),
        ];
        if flag.details_open {
            content.push(NodeSpec::new("span").class("flag-details").text(format!(
                "upstream: {}, effective: {}",
                if flag.upstream_enabled { "on" } else { "off" },
                if flag.effective() { "on" } else { "off" }
            )));
        }
        content
    }

    /// Answer one signal: mutate state, swap the affected markup and report
    /// which region was replaced.
    pub fn respond(&mut self, doc: &mut MemoryDocument, trigger: Trigger) -> Option<ReplacedRegion> {
        let key = doc.attribute(trigger.target, "data-key");
        let toggled_on = match trigger.signal {
            Signal::ToggleDetail => key
                .as_deref()
                .and_then(|k| self.flag(k))
                .is_some_and(|f| f.details_open),
            Signal::TogglePause => self.paused,
            _ => false,
        };
        let Some(trip) = trigger.signal.round_trip(key.as_deref(), toggled_on) else {
            debug!("{} without a flag key, ignoring", trigger.signal);
            return None;
        };
        info!("serving {}", trip);
        self.served.push(trip.to_string());

        if trigger.signal.is_row_scoped() {
            let key = key?;
            let flag = self.flag_mut(&key)?;
            match trigger.signal {
                Signal::EnableFlag => flag.override_enabled = Some(true),
                Signal::DisableFlag => flag.override_enabled = Some(false),
                Signal::RemoveFlag => flag.override_enabled = None,
                _ => flag.details_open = !flag.details_open,
            }
            let content = Self::render_row_content(flag);
            // Inner swap: the row element itself survives
            doc.replace_children(trigger.target, content);
            return Some(ReplacedRegion::Element(row_id(&key)));
        }

        match trigger.signal {
            Signal::Search => {
                self.search = doc.value(trigger.target);
                doc.replace_region("flags", self.render_rows());
                Some(ReplacedRegion::Element("flags".to_string()))
            }
            Signal::Refresh => {
                self.syncs += 1;
                self.replace_page(doc);
                Some(ReplacedRegion::Body)
            }
            Signal::TogglePause => {
                self.paused = !self.paused;
                self.replace_page(doc);
                Some(ReplacedRegion::Body)
            }
            _ => None,
        }
    }

    fn replace_page(&self, doc: &mut MemoryDocument) {
        doc.replace_body(self.render_page());
    }

    fn flag(&self, key: &str) -> Option<&FlagState> {
        self.flags.iter().find(|f| f.key == key)
    }

    fn flag_mut(&mut self, key: &str) -> Option<&mut FlagState> {
        self.flags.iter_mut().find(|f| f.key == key)
    }
}

fn row_id(key: &str) -> String {
    format!("flag-{}", key)
}
