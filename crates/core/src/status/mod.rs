//! Status surfaces driven by the poller
//!
//! Each surface owns a `watch` channel with its current state and implements
//! `StatusObserver` for the check it consumes. Renderers subscribe to the
//! channel; the surface never talks to a terminal itself.

pub mod banner;
pub mod checks;
pub mod gate;
pub mod qr;

pub use banner::{BannerState, StatusBanner};
pub use checks::{CurrentUserCheck, SessionCheck};
pub use gate::{ConnectionGate, Connectivity};
pub use qr::{QrScanWatcher, QrWaitState};
