//! Link Loss Service.
//!
//! Exposes an alert level characteristic a peer can read and write, and reports that level to
//! the application when the link to the peer is lost to a supervision timeout. What to do with
//! the level (beep, blink, vibrate) is up to the application.
//!
//! ```ignore
//! static SERVICE: LinkLossService<'static, CriticalSectionRawMutex> = LinkLossService::new(Config::DEFAULT);
//!
//! SERVICE.init(&mut gatt_server);
//! SERVICE.register_disconnect_callback(&|level| alarm.start(level));
//!
//! // In the GAP event handler:
//! if let ConnectionEvent::Disconnected { reason } = event {
//!     SERVICE.on_disconnect(reason.into());
//! }
//! ```
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::att::AttErrorCode;

mod access;
mod alert;
mod disconnect;
mod registrar;

pub use alert::AlertLevel;
pub use disconnect::{LinkLossHandler, TerminationReason};
pub use registrar::LINK_LOSS_SERVICE;

/// Link loss service configuration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Alert level the service starts with.
    pub initial_level: AlertLevel,
    /// Error code sent to a peer writing a single byte that is not a valid alert level.
    ///
    /// Defaults to [`AttErrorCode::UNLIKELY_ERROR`], which is what existing link loss
    /// implementations send. [`AttErrorCode::VALUE_NOT_ALLOWED`] tells the peer more precisely
    /// what went wrong.
    pub rejected_value_error: AttErrorCode,
}

impl Config {
    /// Default configuration, usable in `const` and `static` items.
    pub const DEFAULT: Self = Self {
        initial_level: AlertLevel::NoAlert,
        rejected_value_error: AttErrorCode::UNLIKELY_ERROR,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The Link Loss Service.
///
/// All state lives behind a blocking mutex. Pick `NoopRawMutex` when the service is only ever
/// touched from the host stack's own context, `CriticalSectionRawMutex` when it is shared with
/// interrupts or other executors.
pub struct LinkLossService<'d, M: RawMutex> {
    config: Config,
    state: Mutex<M, RefCell<State<'d>>>,
}

struct State<'d> {
    level: AlertLevel,
    handler: Option<&'d (dyn LinkLossHandler + Sync)>,
    registered: bool,
}

impl<'d, M: RawMutex> LinkLossService<'d, M> {
    /// Create a new link loss service.
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            state: Mutex::new(RefCell::new(State {
                level: config.initial_level,
                handler: None,
                registered: false,
            })),
        }
    }

    /// The configuration the service was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn with_state<F: FnOnce(&mut State<'d>) -> R, R>(&self, f: F) -> R {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            f(&mut state)
        })
    }
}

impl<'d, M: RawMutex> Default for LinkLossService<'d, M> {
    fn default() -> Self {
        Self::new(Config::DEFAULT)
    }
}
