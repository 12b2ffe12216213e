//! Domain model for the license service console: entities, workflow
//! request builders, pure projections, and the shared error type.

pub mod activation;
pub mod display;
pub mod error;
pub mod license;
pub mod order;
pub mod timeline;
pub mod workflow;

pub use activation::{
    ActivationChange, ActivationChangeResponse, ActivationHistory, ActivationInfo,
    ActivationMode, ChangeActivationRequest, ChangeKind, RegenerateRequest, RegenerateResponse,
};
pub use display::StatusStyle;
pub use error::ApiError;
pub use license::{
    DeploymentRecord, DeploymentStatus, License, LicenseStatus, PurchaseRecord, PurchaseType,
    UsageGauge, usage_gauge,
};
pub use order::{
    Order, OrderCreate, OrderPage, OrderQuery, OrderSource, OrderStatus, ReviewDecision,
    ReviewRequest,
};
pub use timeline::{TimelineEntry, TimelineEvent, project_timeline};
pub use workflow::DialogState;
