pub mod location;
pub mod session;
pub mod traits;

pub use location::{Navigator, PageLocation, UrlTransport};
pub use session::{SessionStorage, SessionTransport};
pub use traits::HandoffTransport;
