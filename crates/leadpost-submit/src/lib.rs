//! Row submission for the lead importer.
//!
//! - [`destination`] decides where each row is posted.
//! - [`poster`] is the HTTP boundary, behind the [`FormPoster`] trait.
//! - [`response`] classifies what came back.
//! - [`engine`] ties those together for one row at a time.
//! - [`audit`] appends one line per attempt to the run's log file.

pub mod audit;
pub mod destination;
pub mod engine;
pub mod poster;
pub mod response;

pub use audit::{AUDIT_HEADER, AuditError, AuditLog, audit_file_name};
pub use destination::{AddressingMode, Destination, RoutePlan, is_fully_qualified};
pub use engine::{Submission, SubmissionEngine, build_form};
pub use poster::{DEFAULT_TIMEOUT, FormPoster, FormResponse, HttpFormPoster, TransportError};
pub use response::{LeadResponse, classify_response};
