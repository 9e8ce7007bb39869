//! Entry submission state machine.
//!
//! The AI-assisted path runs `Capture -> Detecting -> Results -> Review -> Submitted`; a failed
//! detection drops back to `Capture` with nothing retained. The manual path starts directly in
//! `Review`. Only `submit` validates, and it is the single gate every entry passes through
//! before credits are computed.

use rand::prelude::RngExt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

use super::{
    category::WasteCategory,
    classification::map_label_to_category,
    credits::{CreditError, compute_credits, validate_quantity},
};
use crate::classifier::Prediction;

/// How an entry was logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    #[default]
    Manual,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Capture,
    Detecting,
    Results,
    Review,
    Submitted,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Capture => "capture",
            FlowState::Detecting => "detecting",
            FlowState::Results => "results",
            FlowState::Review => "review",
            FlowState::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("An image is required to detect waste")]
    EmptyImage,

    #[error("The classifier returned no predictions")]
    NoPredictions,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Cannot {action} during the {state} step")]
    InvalidTransition { action: &'static str, state: FlowState },

    #[error(transparent)]
    Credit(#[from] CreditError),
}

/// Editable form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub category: Option<WasteCategory>,
    pub quantity: Option<Decimal>,
    pub place: String,
    pub notes: Option<String>,
    pub source: EntrySource,
    pub ai_confidence: Option<f64>,
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
}

/// What a successful detection suggests for the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub category: WasteCategory,
    pub confidence: f64,
    pub predictions: Vec<Prediction>,
    pub suggested_name: String,
    pub suggested_quantity: Option<Decimal>,
}

/// A validated entry ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub category: WasteCategory,
    /// Present iff the category is weighable
    pub quantity: Option<Decimal>,
    pub place: String,
    pub notes: Option<String>,
    pub source: EntrySource,
    pub ai_confidence: Option<f64>,
    pub ai_raw_predictions: Option<Vec<serde_json::Value>>,
    pub credits: Decimal,
}

#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    state: FlowState,
    draft: Draft,
}

impl SubmissionFlow {
    /// Start the AI-assisted path at image capture.
    pub fn ai() -> Self {
        Self {
            state: FlowState::Capture,
            draft: Draft {
                source: EntrySource::Ai,
                ..Default::default()
            },
        }
    }

    /// Start the manual path with an empty form.
    pub fn manual() -> Self {
        Self::reviewing(Draft::default())
    }

    /// Resume at review with an already filled-in form.
    pub fn reviewing(draft: Draft) -> Self {
        Self {
            state: FlowState::Review,
            draft,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The form is only editable once there is something to review.
    pub fn draft_mut(&mut self) -> Result<&mut Draft, FlowError> {
        match self.state {
            FlowState::Results | FlowState::Review => Ok(&mut self.draft),
            state => Err(FlowError::InvalidTransition { action: "edit the entry", state }),
        }
    }

    fn expect(&self, expected: FlowState, action: &'static str) -> Result<(), FlowError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    /// `capture -> detecting`
    pub fn supply_image(&mut self, image: &[u8]) -> Result<(), FlowError> {
        self.expect(FlowState::Capture, "supply an image")?;
        if image.is_empty() {
            return Err(FlowError::EmptyImage);
        }
        self.state = FlowState::Detecting;
        Ok(())
    }

    /// `detecting -> results`: map the top prediction and prefill the form.
    ///
    /// An empty prediction list counts as a failed detection.
    pub fn detection_succeeded(&mut self, predictions: Vec<Prediction>) -> Result<Detection, FlowError> {
        self.expect(FlowState::Detecting, "record a detection")?;
        let Some(top) = predictions.first() else {
            self.detection_failed()?;
            return Err(FlowError::NoPredictions);
        };

        let category = map_label_to_category(&top.label);
        let suggested_quantity = category.is_weighable().then_some(Decimal::ONE);
        let detection = Detection {
            category,
            confidence: top.score,
            suggested_name: suggested_name(category).to_string(),
            suggested_quantity,
            predictions,
        };

        self.draft = Draft {
            name: detection.suggested_name.clone(),
            category: Some(category),
            quantity: suggested_quantity,
            source: EntrySource::Ai,
            ai_confidence: Some(detection.confidence),
            ai_raw_predictions: Some(
                detection
                    .predictions
                    .iter()
                    .map(|p| serde_json::json!({ "label": p.label, "score": p.score }))
                    .collect(),
            ),
            ..Default::default()
        };
        self.state = FlowState::Results;
        Ok(detection)
    }

    /// `detecting -> capture`: the user has to capture again.
    pub fn detection_failed(&mut self) -> Result<(), FlowError> {
        self.expect(FlowState::Detecting, "abandon detection")?;
        self.draft = Draft {
            source: EntrySource::Ai,
            ..Default::default()
        };
        self.state = FlowState::Capture;
        Ok(())
    }

    /// `results -> review`
    pub fn review(&mut self) -> Result<(), FlowError> {
        self.expect(FlowState::Results, "review the entry")?;
        self.state = FlowState::Review;
        Ok(())
    }

    /// `review -> submitted`: validate the form and compute credits.
    pub fn submit(&mut self) -> Result<Submission, FlowError> {
        self.expect(FlowState::Review, "submit")?;
        let draft = &self.draft;

        let name = draft.name.trim();
        if name.is_empty() {
            return Err(FlowError::MissingField("Waste name"));
        }
        let place = draft.place.trim();
        if place.is_empty() {
            return Err(FlowError::MissingField("Collection place"));
        }
        let category = draft.category.ok_or(FlowError::MissingField("Waste type"))?;
        let quantity = validate_quantity(category, draft.quantity)?;
        let credits = compute_credits(category, quantity)?;

        let is_ai = draft.source == EntrySource::Ai;
        let submission = Submission {
            name: name.to_string(),
            category,
            quantity,
            place: place.to_string(),
            notes: draft.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
            source: draft.source,
            ai_confidence: draft.ai_confidence.filter(|_| is_ai),
            ai_raw_predictions: draft.ai_raw_predictions.clone().filter(|_| is_ai),
            credits,
        };
        self.state = FlowState::Submitted;
        Ok(submission)
    }
}

/// Pick a plausible item name for a detected category.
pub fn suggested_name(category: WasteCategory) -> &'static str {
    let names = suggested_names(category);
    names[rand::rng().random_range(0..names.len())]
}

fn suggested_names(category: WasteCategory) -> &'static [&'static str] {
    match category {
        WasteCategory::Paper => &["Old newspapers", "Cardboard box", "Office paper", "Magazine", "Book pages"],
        WasteCategory::Plastic => &[
            "Plastic bottle",
            "Food container",
            "Plastic bag",
            "Disposable cup",
            "Packaging material",
        ],
        WasteCategory::Metal => &["Aluminum can", "Tin can", "Metal container", "Food can", "Beverage can"],
        WasteCategory::Glass => &["Glass bottle", "Glass jar", "Broken glass", "Wine bottle", "Food jar"],
        WasteCategory::EWaste => &["Old smartphone", "Laptop", "Computer parts", "Electronic device", "Battery"],
        WasteCategory::Textile => &["Old clothing", "Fabric scraps", "Used textile", "Clothing item", "Fabric waste"],
        WasteCategory::Organic => &[
            "Food waste",
            "Fruit peels",
            "Vegetable scraps",
            "Organic matter",
            "Compostable waste",
        ],
        WasteCategory::Hazardous => &[
            "Chemical container",
            "Paint can",
            "Battery",
            "Hazardous material",
            "Toxic waste",
        ],
    }
}
