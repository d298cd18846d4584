#![deny(missing_docs)]

//! # HomeSync Models
//!
//! Core data types for the HomeSync AI client.
//!
//! The client performs two independent request/response exchanges with
//! the HomeSync backend:
//!
//! ```text
//! POST {base}/process_ticket        { image_base64, prompt_gemini }
//! POST {base}/process_voice_command { command_text }
//! ```
//!
//! Both replies are arbitrary JSON that the client renders verbatim.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`backend`] | Validated backend host newtype |
//! | [`api`] | Wire types for both endpoints, response rendering |
//! | [`capture`] | Captured-image payload and image-type detection |
//! | [`prompt`] | Fixed extraction instruction sent with every ticket |

pub mod api;
pub mod backend;
pub mod capture;
pub mod error;
pub mod prompt;

// Re-export all public types at crate root for convenience.
pub use api::*;
pub use backend::*;
pub use capture::*;
pub use error::*;
pub use prompt::*;
