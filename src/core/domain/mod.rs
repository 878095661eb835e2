//! Domain types.

mod event;
mod props;
mod repository;
mod source;

pub use event::{Event, RequestType};
pub use props::Props;
pub use repository::Repository;
pub use source::SecretSource;
