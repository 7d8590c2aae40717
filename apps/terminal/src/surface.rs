//! Line-oriented rendering of the workflow panels.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::Write,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use client_core::UiSurface;
use shared::domain::{BusyIndicator, Control, Element, Panel, TextSlot};
use tokio::sync::{mpsc::UnboundedReceiver, Mutex as AsyncMutex};

/// Lines typed by the user, shared between the command loop and prompts.
pub type LineSource = Arc<AsyncMutex<UnboundedReceiver<String>>>;

#[derive(Debug, Default)]
struct ViewModel {
    visible: BTreeSet<Element>,
    texts: BTreeMap<TextSlot, String>,
    disabled: BTreeSet<Control>,
    labels: BTreeMap<Control, String>,
    options: Vec<String>,
}

pub struct TerminalSurface<W: Write + Send> {
    view: Mutex<ViewModel>,
    out: Mutex<W>,
    lines: LineSource,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, lines: LineSource) -> Self {
        Self {
            view: Mutex::new(ViewModel::default()),
            out: Mutex::new(out),
            lines,
        }
    }

    fn emit(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }

    fn with_view<T>(&self, f: impl FnOnce(&mut ViewModel) -> T) -> Option<T> {
        self.view.lock().ok().map(|mut view| f(&mut view))
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        self.with_view(|view| !view.disabled.contains(&control))
            .unwrap_or(true)
    }

    /// Summary of what is currently visible, in panel order.
    pub fn render_status(&self) -> String {
        self.with_view(|view| {
            let mut lines = Vec::new();
            let panels: Vec<&str> = Panel::ALL
                .iter()
                .filter(|p| view.visible.contains(&Element::Panel(**p)))
                .map(|p| p.label())
                .collect();
            if panels.is_empty() {
                lines.push("visible: (nothing yet, try 'find')".to_string());
            } else {
                lines.push(format!("visible: {}", panels.join(", ")));
            }
            if view.visible.contains(&Element::Panel(Panel::CompanyList)) {
                lines.extend(numbered(&view.options));
            }
            for (control, label) in &view.labels {
                let state = if view.disabled.contains(control) {
                    "busy"
                } else {
                    "ready"
                };
                lines.push(format!("{label} ({state})"));
            }
            lines.join("\n")
        })
        .unwrap_or_default()
    }
}

fn numbered(options: &[String]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(n, name)| format!("  [{n}] {name}"))
        .collect()
}

fn slot_heading(slot: TextSlot) -> &'static str {
    match slot {
        TextSlot::InvestigationDetails => "investigation",
        TextSlot::ResultsOutput => "results",
    }
}

#[async_trait]
impl<W: Write + Send> UiSurface for TerminalSurface<W> {
    fn show(&self, element: Element) {
        let newly_shown = self
            .with_view(|view| view.visible.insert(element))
            .unwrap_or(false);
        if !newly_shown {
            return;
        }
        match element {
            Element::Panel(panel) => self.emit(&format!("[+] {}", panel.label())),
            Element::Busy(BusyIndicator::Investigate) => self.emit("(investigating...)"),
            Element::Busy(BusyIndicator::Generate) => self.emit("(generating...)"),
        }
    }

    fn hide(&self, element: Element) {
        let was_visible = self
            .with_view(|view| view.visible.remove(&element))
            .unwrap_or(false);
        if let (true, Element::Panel(panel)) = (was_visible, element) {
            self.emit(&format!("[-] {}", panel.label()));
        }
    }

    fn set_text(&self, slot: TextSlot, text: &str) {
        self.with_view(|view| view.texts.insert(slot, text.to_string()));
        if !text.is_empty() {
            self.emit(&format!("== {} ==\n{text}", slot_heading(slot)));
        }
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        self.with_view(|view| {
            if enabled {
                view.disabled.remove(&control);
            } else {
                view.disabled.insert(control);
            }
        });
    }

    fn set_label(&self, control: Control, label: &str) {
        self.with_view(|view| view.labels.insert(control, label.to_string()));
    }

    fn set_company_options(&self, names: &[String]) {
        self.with_view(|view| view.options = names.to_vec());
        if !names.is_empty() {
            self.emit(&numbered(names).join("\n"));
        }
    }

    fn notify(&self, message: &str) {
        self.emit(&format!("! {message}"));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.emit(&format!("{prompt} [y/N]"));
        let answer = self.lines.lock().await.recv().await;
        matches!(
            answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        )
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
