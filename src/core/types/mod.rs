//! Core request and result types

pub mod inbound;
pub mod payload;
pub mod structured;
pub mod task;

pub use inbound::InboundTask;
pub use payload::{
    ImageRef, ImageSource, InvalidPayload, RequestPayload, TextRequest, VisionRequest,
    strip_data_url_prefix,
};
pub use structured::{files_from_value, parse_json_object};
pub use task::{GeneratedFile, ProviderResult, RoutedRequest, TaskKind};
