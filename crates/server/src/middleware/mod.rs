//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (record on span, echo in `x-request-id`)
//! 4. CORS (permissive, the dashboards are served from another origin)
//! 5. Rate limiting on the OTP routes only (governor)

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::otp_rate_limiter;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
