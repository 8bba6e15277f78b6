//! # sumbridge core
//!
//! Session-bridging engine for the SUM student portal, which exposes no
//! public API.
//!
//! ## Flow
//!
//! - **Transport**: issues portal requests over TLS, follows redirects and
//!   keeps a private cookie jar per session
//! - **Extractor**: finds the `_csrf` hidden input in the login page
//! - **Login orchestrator**: fetch → extract → submit → classify →
//!   (restart) → harvest
//! - **Course report**: replays harvested cookies against the JSON
//!   enrollment report and reshapes it into [`CourseRecord`]s
//!
//! Every login builds its own transport, so concurrent logins never share a
//! jar.

pub mod config;
pub mod courses;
pub mod error;
pub mod extract;
pub mod jar;
pub mod login;
pub mod transport;
pub mod types;

pub use config::{PortalConfig, PortalEndpoints, DEFAULT_PORTAL_URL};
pub use courses::{parse_report, CourseReport};
pub use error::{LoginError, ReportError, TransportError};
pub use extract::{extract_csrf_token, HiddenFieldExtractor, TokenExtractor};
pub use jar::PortalJar;
pub use login::{classify, Classification, LoginOrchestrator, LoginOutcome};
pub use transport::{encode_form_body, HttpTransport, PortalResponse, PortalTransport};
pub use types::{CourseRecord, LoginSuccess, SessionCookies, VendorCourse, VendorReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
