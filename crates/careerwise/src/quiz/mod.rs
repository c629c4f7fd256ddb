//! Quiz draft model and the status router that decides where a resumed draft lands next.

pub mod domain;
pub mod router;
pub mod routing;

pub use domain::{
    Answer, DraftDoc, DraftError, DraftId, DraftStatus, Entitlement, MacroAnswer, QuizSection,
};
pub use router::quiz_router;
pub use routing::{
    destination_for_raw_status, destination_for_status, routing_table, Destination,
    RoutedDestination,
};
