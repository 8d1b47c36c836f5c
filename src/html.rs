//! Minify HTML rendered for a request.
//!
//! The host creates a [`RequestHooks`] at the start of each request and calls
//! [`RequestHooks::on_fragment_rendered`] for every rendered fragment, then
//! [`RequestHooks::on_page_rendered`] once with the final response body.

pub mod hooks;
pub mod policy;

pub use hooks::RequestHooks;
pub use policy::{
    decide_fragment, decide_page, has_html_content_type, is_html_document, PolicyDecision,
    RequestFlags,
};
