//! Selection of taken courses and the recommendation request workflow.

pub mod selection;
pub mod workflow;

pub use selection::SelectionSet;
pub use workflow::{
    RecommendError, RecommendStatus, RecommendationWorkflow, SubmitOutcome,
    GENERIC_FAILURE_MESSAGE, NO_RECOMMENDATIONS_MESSAGE,
};
