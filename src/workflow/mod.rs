pub mod controller;
pub mod error;
pub mod form;
pub mod limits;
pub mod notice;
pub mod phase;
pub mod review;
pub mod rows;
pub mod validate;
pub mod view;

pub use controller::{
    CompletionOutcome, PendingGeneration, PendingSave, RequestTicket, WorkflowController,
    WorkflowOptions, STALE_GENERATION_MESSAGE,
};
pub use error::{RequestKind, WorkflowError};
pub use form::{parse_release_date, today_release_date, QuizStatus, RELEASE_DATE_FORMAT};
pub use limits::{
    WorkflowLimits, DEFAULT_ROW_COUNT, MAX_ROW_COUNT, MAX_TOTAL_COUNT, MIN_ROW_COUNT,
};
pub use notice::{Notice, NoticeBoard, NoticeKind, DEFAULT_NOTICE_DURATION};
pub use phase::{next_phase, Phase, PhaseError, PhaseTrigger, RedirectTarget};
pub use review::{GeneratedItem, ReviewError, ReviewSet, SaveQuizItem};
pub use rows::{ConfigRow, RowError, RowStore, RowSummary};
pub use validate::{validate_config, ValidationError};
pub use view::{
    project_workflow_view, CategoryOption, ConfigView, NoticeView, ReviewRowView, ReviewView,
    RowView, WorkflowView, CATEGORY_PLACEHOLDER, GENERATING_TEXT, IN_USE_SUFFIX, SAVING_TEXT,
};
