//! The graph engine facade used by the host application.

use crate::core::analytics::{self, NetworkStatistics};
use crate::core::backlinks::{Backlink, BacklinkIndex};
use crate::core::hooks::HookRegistry;
use crate::core::network::{self, NetworkData};
use crate::core::note::{Note, NoteCollection};
use crate::core::report::{self, ExportOptions, NetworkExport};
use crate::core::settings::GraphSettings;
use crate::{Result, WikigraphError};

/// Knowledge-graph queries over the last note snapshot handed in.
///
/// `GraphEngine` never mutates notes. Callers must pass the current
/// collection to [`update_notes`](Self::update_notes) after every edit;
/// until then every query answers from the previous snapshot. Nothing is
/// cached between queries apart from the backlink index, which is rebuilt
/// on each update.
#[derive(Debug)]
pub struct GraphEngine {
    notes: NoteCollection,
    backlinks: BacklinkIndex,
    settings: GraphSettings,
    hooks: HookRegistry,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new(GraphSettings::default())
    }
}

impl GraphEngine {
    /// Creates an engine with an empty collection.
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            notes: NoteCollection::new(),
            backlinks: BacklinkIndex::new(settings.context_words),
            settings,
            hooks: HookRegistry::new(),
        }
    }

    /// Creates an engine with settings read from the default settings file.
    pub fn with_saved_settings() -> Self {
        Self::new(crate::core::settings::load_settings())
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Replaces the settings; the backlink index is rebuilt so snippets
    /// follow the new context width.
    ///
    /// # Errors
    ///
    /// Returns [`WikigraphError::InvalidSettings`] and keeps the old
    /// settings if `settings` fails validation.
    pub fn set_settings(&mut self, settings: GraphSettings) -> Result<()> {
        settings.validate()?;
        self.backlinks = BacklinkIndex::new(settings.context_words);
        self.settings = settings;
        self.backlinks.rebuild(&self.notes);
        Ok(())
    }

    /// Replaces the working set and rebuilds the backlink index.
    pub fn update_notes(&mut self, notes: impl IntoIterator<Item = Note>) {
        self.notes = notes.into_iter().collect();
        self.backlinks.rebuild(&self.notes);
        log::debug!("graph engine now holds {} notes", self.notes.len());
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    /// Looks up a note in the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WikigraphError::NoteNotFound`] if no note has this ID.
    pub fn note(&self, note_id: &str) -> Result<&Note> {
        self.notes
            .get(note_id)
            .ok_or_else(|| WikigraphError::NoteNotFound(note_id.to_string()))
    }

    /// Ego network around `note_id`; empty when the note does not exist.
    pub fn build_ego_network(&self, note_id: &str, steps: usize) -> NetworkData {
        network::build_ego_network(&self.notes, note_id, steps)
    }

    /// Ego network using the configured default step budget.
    pub fn build_default_ego_network(&self, note_id: &str) -> NetworkData {
        self.build_ego_network(note_id, self.settings.default_steps)
    }

    pub fn build_full_network(&self) -> NetworkData {
        network::build_full_network(&self.notes)
    }

    /// Notes linking to the note titled `title`, in collection order.
    pub fn backlinks_for(&self, title: &str) -> &[Backlink] {
        self.backlinks.backlinks_for(title)
    }

    pub fn find_isolated_notes(&self) -> Vec<&Note> {
        analytics::find_isolated_notes(&self.notes)
    }

    /// Network and statistics for an export request.
    ///
    /// `note_id` is ignored when `options.full_corpus` is set.
    pub fn statistics(
        &self,
        note_id: Option<&str>,
        options: &ExportOptions,
    ) -> (NetworkData, NetworkStatistics) {
        let network = self.network_for(note_id, options);
        let stats = analytics::analyze(&network, &self.notes, options.full_corpus, &self.settings);
        (network, stats)
    }

    /// Renders the export tables, or `None` when the network is empty.
    pub fn export_network(
        &self,
        note_id: Option<&str>,
        options: &ExportOptions,
    ) -> Option<NetworkExport> {
        let (network, stats) = self.statistics(note_id, options);
        let export = report::render_export(&network, &stats, &self.notes, options, &self.settings);
        if export.is_none() {
            log::debug!("nothing to export for {:?}", note_id);
        }
        export
    }

    fn network_for(&self, note_id: Option<&str>, options: &ExportOptions) -> NetworkData {
        match (options.full_corpus, note_id) {
            (true, _) => self.build_full_network(),
            (false, Some(id)) => self.build_ego_network(id, options.steps),
            (false, None) => NetworkData::default(),
        }
    }

    /// Registers a callback for node selection in the rendered graph.
    pub fn on_node_selected(&mut self, hook: impl FnMut(&str) + Send + 'static) {
        self.hooks.on_node_selected(Box::new(hook));
    }

    /// Notifies every registered hook that `node_id` was selected.
    pub fn select_node(&mut self, node_id: &str) {
        self.hooks.fire_node_selected(node_id);
    }
}
