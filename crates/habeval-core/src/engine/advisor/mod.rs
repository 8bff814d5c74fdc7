//! Optional post-processing of valid evaluations.
//!
//! An advisor receives the request and the engine's baseline result and
//! returns an adjusted copy: reweighted scores and extra feedback. The
//! evaluation workflow only consults it for valid layouts and restores the
//! baseline verdict afterwards, so advisors never change whether a layout is
//! valid.

pub mod knowledge;
pub mod mission;

use crate::core::models::evaluation::EvaluationResult;
use crate::core::models::request::LayoutRequest;

pub use knowledge::{
    KnowledgeAnswer, KnowledgeError, KnowledgeQuery, KnowledgeSource, SourceRef, StaticKnowledge,
};
pub use mission::{MissionAdvisor, MissionProfile, UnknownMissionError};

pub trait ContextAdvisor: Send + Sync {
    fn enhance(
        &self,
        request: &LayoutRequest,
        baseline: &EvaluationResult,
        mission_profile: Option<&str>,
    ) -> EvaluationResult;
}
