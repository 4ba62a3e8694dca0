//! Client-side helpers behind the electoral statistics front-end.
//!
//! - [`rate_limit`]: debounce and throttle wrappers for event handlers.
//! - [`image`]: optimized image URLs, responsive source sets, placeholders.
//! - [`newsletter`]: the subscription endpoint client used by the signup form.

pub mod config;
pub mod http;
pub mod image;
pub mod newsletter;
pub mod rate_limit;
