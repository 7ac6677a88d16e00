use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every rejection a caller can observe maps to exactly one variant here;
/// the api crate translates variants into HTTP status codes and stable
/// machine-checkable `code` strings.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more submitted author ids do not resolve to users with the
    /// author role.
    #[error("Invalid authors: {0}")]
    InvalidAuthors(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The referenced user does not exist or does not hold the evaluator role.
    #[error("User {0} is not a valid evaluator")]
    InvalidEvaluator(DbId),

    /// The evaluator is a member of the project's author set.
    #[error("Evaluator {evaluator_id} cannot evaluate their own project {project_id}")]
    SelfEvaluation { project_id: DbId, evaluator_id: DbId },

    /// An evaluation for this (project, evaluator) pair already exists.
    #[error("Project {project_id} was already evaluated by evaluator {evaluator_id}")]
    DuplicateEvaluation { project_id: DbId, evaluator_id: DbId },

    /// The project has already received its full set of evaluations.
    #[error("Project {project_id} has already received the maximum number of evaluations")]
    ProjectFullyEvaluated { project_id: DbId },

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Opinion must not be empty")]
    InvalidOpinion,

    /// Structural mutation attempted on a project whose evaluation is closed.
    #[error("Project {id} is locked: structural fields cannot change after evaluation")]
    ProjectLocked { id: DbId },

    /// Project deletion blocked by existing evaluations.
    #[error("Project {id} has {count} evaluation(s) and cannot be deleted")]
    HasEvaluations { id: DbId, count: i64 },

    /// Award deletion blocked by associated projects.
    #[error("Award {id} has {count} associated project(s) and cannot be deleted")]
    HasProjects { id: DbId, count: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}
