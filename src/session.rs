//! EditSession - one annotated document's region model, properties and edit hooks.
//!
//! A session is rebuilt from scratch on every [`EditSession::load`] and owns all region
//! state; nothing is shared between sessions. The host editor drives it through two hooks:
//! [`EditSession::before_change`] (may cancel or truncate) and
//! [`EditSession::after_change`] (fires after commit, keeps undo/redo consistent).

use serde_json::Value;

use crate::config::EditorConfig;
use crate::host::HostEditor;
use crate::markup::{self, MarkupError};
use crate::persistence::SavedState;
use crate::region::{synchronize, Gatekeeper, LineDelta, Origin, RegionModel, TextChange, Verdict};

/// Region state for one editing session
#[derive(Debug, Clone)]
pub struct EditSession {
    regions: RegionModel,
    properties: Value,
    gatekeeper: Gatekeeper,
    sentinel: String,
    /// Most recent proposed edit, kept for the auto-indent heuristic
    last_change: Option<TextChange>,
}

impl EditSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            regions: RegionModel::default(),
            properties: Value::Object(Default::default()),
            gatekeeper: config.gatekeeper(),
            sentinel: config.sentinel.clone(),
            last_change: None,
        }
    }

    pub fn regions(&self) -> &RegionModel {
        &self.regions
    }

    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// Decoded properties of the loaded document
    pub fn properties(&self) -> &Value {
        &self.properties
    }

    pub fn last_change(&self) -> Option<&TextChange> {
        self.last_change.as_ref()
    }

    /// Parse annotated text, replace the region model and put the clean text in the host.
    ///
    /// On error nothing changes: neither the session nor the host.
    pub fn load<H: HostEditor>(&mut self, host: &mut H, annotated: &str) -> Result<(), MarkupError> {
        let pre = markup::preprocess(annotated)?;

        self.regions = pre.regions;
        self.properties = pre.properties;
        self.last_change = None;

        host.set_value(&pre.text);
        self.mark_locked_lines(host);
        self.highlight_sections(host);
        host.clear_history();

        tracing::info!(
            lines = host.line_count(),
            editable = self.regions.editable_lines().len(),
            sectioned = self.regions.sections().len(),
            "Loaded annotated document"
        );
        Ok(())
    }

    /// Judge a proposed edit before the host commits it.
    ///
    /// The change text may be truncated in place. A rejected change must not be committed.
    pub fn before_change<H: HostEditor>(&mut self, host: &H, change: &mut TextChange) -> Verdict {
        self.last_change = Some(change.clone());
        let line_length = host.line_length(change.to.line);
        self.gatekeeper.judge(&mut self.regions, change, line_length)
    }

    /// React to a committed change: replay undo/redo line shifts and refresh highlights.
    pub fn after_change<H: HostEditor>(
        &mut self,
        host: &mut H,
        change: &TextChange,
    ) -> Option<LineDelta> {
        let delta = synchronize(&mut self.regions, change, self.gatekeeper.shift_sections);
        self.highlight_sections(host);
        delta
    }

    /// Give every line outside the editable set the "disabled" attribute.
    pub fn mark_locked_lines<H: HostEditor>(&self, host: &mut H) {
        host.clear_line_marks();
        for line in 0..host.line_count() {
            if !self.regions.is_line_editable(line) {
                host.mark_line_disabled(line);
            }
        }
    }

    /// Re-apply the "editable" attribute to every section.
    pub fn highlight_sections<H: HostEditor>(&self, host: &mut H) {
        host.clear_highlights();
        for (&line, sections) in self.regions.sections() {
            for section in sections {
                host.highlight_editable(line, section.as_range());
            }
        }
    }

    /// Whether the host should auto-indent the cursor line: the cursor sits at column 0 of
    /// a blank line and the last edit was not a deletion.
    pub fn wants_auto_indent<H: HostEditor>(&self, host: &H) -> bool {
        if self
            .last_change
            .as_ref()
            .is_some_and(|change| change.origin == Origin::Delete)
        {
            return false;
        }
        let cursor = host.cursor();
        cursor.column == 0
            && host
                .line(cursor.line)
                .is_some_and(|text| text.trim().is_empty())
    }

    /// Current text with the sentinel line re-inserted at the start-level-end index.
    pub fn export_for_execution<H: HostEditor>(&self, host: &H) -> String {
        let text = host.value();
        let Some(index) = self.regions.start_level_end() else {
            return text;
        };
        let mut lines: Vec<&str> = text.split('\n').collect();
        lines.insert(index.min(lines.len()), &self.sentinel);
        lines.join("\n")
    }

    /// Current text verbatim.
    pub fn export_for_storage<H: HostEditor>(&self, host: &H) -> String {
        host.value()
    }

    /// Every editable line, then every editable section, each followed by a newline.
    pub fn export_player_contributions<H: HostEditor>(&self, host: &H) -> String {
        let mut code = String::new();
        for line in 0..host.line_count() {
            if self.regions.is_line_editable(line) {
                code.push_str(&host.line(line).unwrap_or_default());
                code.push('\n');
            }
        }
        for (&line, sections) in self.regions.sections() {
            let text = host.line(line).unwrap_or_default();
            for section in sections {
                let piece: String = text
                    .chars()
                    .skip(section.start)
                    .take(section.len())
                    .collect();
                code.push_str(&piece);
                code.push('\n');
            }
        }
        code
    }

    /// Put stored code back in the host, dropping any sentinel line.
    ///
    /// The region model is left as is.
    pub fn restore_code<H: HostEditor>(&self, host: &mut H, code: &str) {
        let marker = self.sentinel_marker();
        let kept: Vec<&str> = code
            .split('\n')
            .filter(|line| !line.contains(marker))
            .collect();

        host.set_value(&kept.join("\n"));
        self.mark_locked_lines(host);
        self.highlight_sections(host);
        host.clear_history();
    }

    /// Snapshot the session for persistence.
    pub fn save_state<H: HostEditor>(&self, host: &H) -> SavedState {
        SavedState {
            code: self.export_for_execution(host),
            player_code: self.export_player_contributions(host),
            editable_lines: self.regions.editable_lines().iter().copied().collect(),
            editable_sections: self.regions.sections().clone(),
        }
    }

    /// Reinstate text and regions from a snapshot. Properties are kept from the last load.
    pub fn restore_state<H: HostEditor>(&mut self, host: &mut H, state: &SavedState) {
        self.regions = RegionModel::new(
            state.editable_lines.iter().copied().collect(),
            state.editable_sections.clone(),
            self.regions.start_level_end(),
        );
        self.last_change = None;
        self.restore_code(host, &state.code);
        tracing::info!(
            editable = self.regions.editable_lines().len(),
            "Restored saved state"
        );
    }

    /// Identifying part of the sentinel (its assignment target), used to find it in code.
    fn sentinel_marker(&self) -> &str {
        let sentinel = self.sentinel.trim();
        sentinel
            .split('=')
            .next()
            .map(str::trim)
            .filter(|target| !target.is_empty())
            .unwrap_or(sentinel)
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
