pub mod api;
pub mod error;
pub mod generation;
pub mod save;
pub mod wire;

pub use api::{BulkQuizApi, HttpBulkQuizApi};
pub use error::{
    GenerationError, SaveError, TransportError, COMMUNICATION_ERROR_MESSAGE,
    EMPTY_GENERATION_MESSAGE, GENERATION_FAILED_MESSAGE, NOTHING_TO_SAVE_MESSAGE,
    SAVE_FAILED_MESSAGE,
};
pub use generation::{build_generate_request, interpret_generate_envelope, GenerationClient};
pub use save::{build_save_request, interpret_save_envelope, SaveClient, SaveReceipt};
pub use wire::{
    ApiEnvelope, GenerateData, GenerateRequest, GenerateRow, SaveData, SaveQuizItem, SaveRequest,
};
