//! Waste domain: the category table, label mapping, crediting, and the submission flow.

pub mod category;
pub mod classification;
pub mod credits;
pub mod flow;

pub use category::{COLLECTION_PLACES, WASTE_TYPES, WasteCategory, WasteTypeInfo};
pub use classification::map_label_to_category;
pub use credits::{CreditError, QuantityInput, compute_credits, parse_quantity, round_credits, validate_quantity};
pub use flow::{Detection, Draft, EntrySource, FlowError, FlowState, Submission, SubmissionFlow};
