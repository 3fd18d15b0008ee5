//! The EKYC conversation: welcome card, details form, contact-number
//! prompt, document upload, classification, export.

pub mod engine;
pub mod localize;
pub mod session;

pub use engine::{DialogEngine, MAIN_OPTION_EXIT, MAIN_OPTION_FILL_FORM};
pub use localize::OptionMatcher;
pub use session::{DialogStep, SessionKey, SessionState, SessionStore};
