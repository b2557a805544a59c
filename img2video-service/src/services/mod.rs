pub mod metrics;
pub mod novita;
pub mod payload;
pub mod result;

pub use metrics::{get_metrics, init_metrics};
pub use novita::{DispatchError, NovitaClient};
pub use payload::{build_vendor_payload, PayloadError, VendorPayload};
pub use result::normalize_response;
