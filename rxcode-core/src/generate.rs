//! Generation pipeline: validation, history, derived strings and visibility.

use serde::Serialize;

use crate::config::{GeneratorConfig, LinearFormat};
use crate::encode::{data_matrix_url, format_element_string, to_gs1_date, to_gtin14};
use crate::error::Result;
use crate::history::{KeyValueStore, RecordStore};
use crate::model::{BarcodeId, DerivedOutputs, FieldSet, HistoryRecord};
use crate::render::{LinearBarcodeRequest, RenderPlan, Shown};
use crate::selection::Selection;
use crate::validation::require_fields;

/// Compute the derived strings for a field set.
///
/// Fails only when the configured Data Matrix endpoint is not a URL.
pub fn derive_outputs(fields: &FieldSet, config: &GeneratorConfig) -> Result<DerivedOutputs> {
    let gtin14 = to_gtin14(&fields.ndc);
    let gs1_date = to_gs1_date(&fields.expiration_date);
    let gs1_element_string = format_element_string(
        &gtin14,
        &gs1_date,
        &fields.lot_number,
        &fields.serial_number,
    );
    let data_matrix_request = data_matrix_url(
        &config.data_matrix_endpoint,
        &config.data_matrix_symbology,
        &gs1_element_string,
    )?;

    tracing::debug!("Derived {} for NDC '{}'", gs1_element_string, fields.ndc);

    Ok(DerivedOutputs {
        gtin14,
        gs1_date,
        gs1_element_string,
        data_matrix_request,
    })
}

/// Ids shown under `selection`, in display order.
///
/// The extra barcodes only count when their text is non-empty.
pub fn visible_ids(fields: &FieldSet, selection: Selection) -> Vec<BarcodeId> {
    BarcodeId::ALL
        .into_iter()
        .filter(|id| selection.is_visible(*id) && fields.has_payload(*id))
        .collect()
}

/// Result of one generation or recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub fields: FieldSet,
    pub outputs: DerivedOutputs,
    pub selection: Selection,
    pub visible: Vec<BarcodeId>,
}

impl Generation {
    /// Build a generation without touching history.
    pub fn compute(
        fields: FieldSet,
        selection: Selection,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        require_fields(&fields)?;
        let outputs = derive_outputs(&fields, config)?;
        let visible = visible_ids(&fields, selection);
        Ok(Self {
            fields,
            outputs,
            selection,
            visible,
        })
    }

    /// Whether `id` is in the visible set.
    pub fn is_visible(&self, id: BarcodeId) -> bool {
        self.visible.contains(&id)
    }

    /// Re-evaluate visibility for a new selection.
    pub fn reselect(&mut self, selection: Selection) {
        self.selection = selection;
        self.visible = visible_ids(&self.fields, selection);
    }

    /// Requests for the drawing collaborators.
    pub fn render_plan(&self, format: LinearFormat) -> RenderPlan {
        let linear = self
            .visible
            .iter()
            .filter_map(|id| {
                self.fields.payload(*id).map(|text| LinearBarcodeRequest {
                    target: *id,
                    text: text.to_string(),
                    format,
                })
            })
            .collect();

        let gs1_visible = self.is_visible(BarcodeId::Gs1);
        RenderPlan {
            linear,
            gs1_text: Shown {
                value: self.outputs.gs1_element_string.clone(),
                visible: gs1_visible,
            },
            data_matrix: Shown {
                value: self.outputs.data_matrix_request.clone(),
                visible: gs1_visible,
            },
        }
    }
}

/// Mutable container driving the pipeline for one operator session.
#[derive(Debug)]
pub struct Generator<S> {
    history: RecordStore<S>,
    config: GeneratorConfig,
    selection: Selection,
    current: Option<Generation>,
}

impl<S: KeyValueStore> Generator<S> {
    /// Create a generator, loading history from `backend`.
    pub fn new(backend: S, config: GeneratorConfig) -> Self {
        let history = RecordStore::with_settings(
            backend,
            config.history_key.clone(),
            config.history_capacity,
        );
        Self {
            history,
            config,
            selection: Selection::default(),
            current: None,
        }
    }

    /// Generate from live input and record it in history.
    ///
    /// Missing Rx or NDC fails with a validation error and changes nothing.
    pub fn generate(&mut self, fields: FieldSet) -> Result<&Generation> {
        let generation = Generation::compute(fields, self.selection, &self.config)?;
        self.history.append(generation.fields.clone());
        tracing::info!(
            "Generated {} (history: {})",
            generation.outputs.gs1_element_string,
            self.history.len()
        );
        Ok(self.current.insert(generation))
    }

    /// Replay a stored record. History is not modified.
    pub fn recall_record(&mut self, record: &HistoryRecord) -> Result<&Generation> {
        let generation = Generation::compute(record.fields.clone(), self.selection, &self.config)?;
        tracing::info!("Recalled {}", generation.outputs.gs1_element_string);
        Ok(self.current.insert(generation))
    }

    /// Replay the history record at `index` (0 = most recent).
    pub fn recall(&mut self, index: usize) -> Result<&Generation> {
        let record = self.history.get(index)?.clone();
        self.recall_record(&record)
    }

    /// Apply a panel click and return the new selection.
    pub fn toggle(&mut self, clicked: BarcodeId) -> Selection {
        self.set_selection(self.selection.toggle(clicked));
        self.selection
    }

    /// Replace the selection, re-evaluating the current generation.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        if let Some(current) = self.current.as_mut() {
            current.reselect(selection);
        }
        tracing::debug!("Selection: {}", selection);
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Last generated or recalled output.
    pub fn current(&self) -> Option<&Generation> {
        self.current.as_ref()
    }

    /// Render requests for the current output.
    pub fn render_plan(&self) -> Option<RenderPlan> {
        self.current
            .as_ref()
            .map(|g| g.render_plan(self.config.linear_format))
    }

    pub fn history(&self) -> &RecordStore<S> {
        &self.history
    }

    /// Remove all history records.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
