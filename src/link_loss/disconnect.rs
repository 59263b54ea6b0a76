use core::fmt;

use bt_hci::param::Status;
use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{AlertLevel, LinkLossService};

/// Reason a connection was terminated, as reported by the controller.
///
/// This is the HCI status code from the disconnection complete event.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationReason {
    value: u8,
}

impl TerminationReason {
    /// The link supervision timer expired: the peer stopped responding.
    pub const CONNECTION_TIMEOUT: Self = Self { value: 0x08 };
    /// The peer terminated the connection.
    pub const REMOTE_USER_TERMINATED_CONNECTION: Self = Self { value: 0x13 };
    /// The peer terminated the connection because it ran low on resources.
    pub const REMOTE_DEVICE_TERMINATED_CONNECTION_LOW_RESOURCES: Self = Self { value: 0x14 };
    /// The peer terminated the connection because it is about to power off.
    pub const REMOTE_DEVICE_TERMINATED_CONNECTION_POWER_OFF: Self = Self { value: 0x15 };
    /// The local host terminated the connection.
    pub const CONNECTION_TERMINATED_BY_LOCAL_HOST: Self = Self { value: 0x16 };
    /// A link layer procedure timed out.
    pub const LMP_RESPONSE_TIMEOUT: Self = Self { value: 0x22 };
    /// A packet failed its message integrity check.
    pub const CONNECTION_TERMINATED_MIC_FAILURE: Self = Self { value: 0x3d };
    /// The connection was never fully established.
    pub const CONNECTION_FAILED_TO_BE_ESTABLISHED: Self = Self { value: 0x3e };

    /// Wrap a raw HCI status code.
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    /// The raw HCI status code.
    pub const fn into_inner(self) -> u8 {
        self.value
    }

    /// True if the link was lost because the peer stopped responding, as opposed to either side
    /// closing it.
    pub fn is_supervision_timeout(&self) -> bool {
        *self == Self::CONNECTION_TIMEOUT
    }
}

impl From<u8> for TerminationReason {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Status> for TerminationReason {
    fn from(status: Status) -> Self {
        Self::new(status.into_inner())
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CONNECTION_TIMEOUT => f.write_str("connection timeout"),
            Self::REMOTE_USER_TERMINATED_CONNECTION => f.write_str("remote user terminated connection"),
            Self::REMOTE_DEVICE_TERMINATED_CONNECTION_LOW_RESOURCES => {
                f.write_str("remote device terminated connection due to low resources")
            }
            Self::REMOTE_DEVICE_TERMINATED_CONNECTION_POWER_OFF => {
                f.write_str("remote device terminated connection due to power off")
            }
            Self::CONNECTION_TERMINATED_BY_LOCAL_HOST => f.write_str("connection terminated by local host"),
            Self::LMP_RESPONSE_TIMEOUT => f.write_str("LL response timeout"),
            Self::CONNECTION_TERMINATED_MIC_FAILURE => f.write_str("connection terminated due to MIC failure"),
            Self::CONNECTION_FAILED_TO_BE_ESTABLISHED => f.write_str("connection failed to be established"),
            other => write!(f, "status {:#04x}", other.value),
        }
    }
}

/// Application hook for link loss.
///
/// Called with the alert level the peer had configured when the link to it was lost. Runs
/// inline with [`LinkLossService::on_disconnect`], so it must not block; start the alert and
/// return.
pub trait LinkLossHandler {
    /// The link was lost while `level` was configured.
    fn on_link_loss(&self, level: AlertLevel);
}

impl<F: Fn(AlertLevel)> LinkLossHandler for F {
    fn on_link_loss(&self, level: AlertLevel) {
        self(level)
    }
}

impl<'d, M: RawMutex> LinkLossService<'d, M> {
    /// Register the handler called on link loss, replacing any previous one.
    pub fn register_disconnect_callback(&self, handler: &'d (dyn LinkLossHandler + Sync)) {
        self.with_state(|state| state.handler = Some(handler));
        debug!("[lls] link loss handler registered");
    }

    /// Remove the link loss handler, if any.
    pub fn clear_disconnect_callback(&self) {
        self.with_state(|state| state.handler = None);
        debug!("[lls] link loss handler cleared");
    }

    /// Feed a disconnection into the service.
    ///
    /// Call this from the GAP event handler for every disconnection. If the link was lost to a
    /// supervision timeout, the registered handler is called with the current alert level and
    /// that level is returned. Any other reason is ignored and `None` is returned.
    pub fn on_disconnect(&self, reason: TerminationReason) -> Option<AlertLevel> {
        if !reason.is_supervision_timeout() {
            trace!("[lls] disconnected ({:?}), not a link loss", reason);
            return None;
        }

        // Copy out so the handler runs without the state borrowed
        let (level, handler) = self.with_state(|state| (state.level, state.handler));
        info!("[lls] link lost at alert level {:?}", level);
        if let Some(handler) = handler {
            handler.on_link_loss(level);
        }
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
    use std::string::ToString;

    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    use super::*;
    use crate::link_loss::Config;

    #[test]
    fn supervision_timeout_fires_handler_once() {
        let calls = AtomicUsize::new(0);
        let seen = AtomicU8::new(0xff);
        let handler = |level: AlertLevel| {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.store(level.into(), Ordering::SeqCst);
        };

        let lls: LinkLossService<'_, NoopRawMutex> = LinkLossService::default();
        unwrap!(lls.set_alert_level(AlertLevel::HighAlert));
        lls.register_disconnect_callback(&handler);

        assert_eq!(
            lls.on_disconnect(TerminationReason::CONNECTION_TIMEOUT),
            Some(AlertLevel::HighAlert)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn other_reasons_are_ignored() {
        let calls = AtomicUsize::new(0);
        let handler = |_: AlertLevel| {
            calls.fetch_add(1, Ordering::SeqCst);
        };

        let lls: LinkLossService<'_, NoopRawMutex> = LinkLossService::default();
        unwrap!(lls.set_alert_level(AlertLevel::HighAlert));
        lls.register_disconnect_callback(&handler);

        for reason in [
            TerminationReason::REMOTE_USER_TERMINATED_CONNECTION,
            TerminationReason::REMOTE_DEVICE_TERMINATED_CONNECTION_POWER_OFF,
            TerminationReason::CONNECTION_TERMINATED_BY_LOCAL_HOST,
            TerminationReason::LMP_RESPONSE_TIMEOUT,
            TerminationReason::new(0x00),
        ] {
            assert_eq!(lls.on_disconnect(reason), None);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn no_handler_is_a_noop() {
        let lls: LinkLossService<'_, NoopRawMutex> = LinkLossService::default();
        unwrap!(lls.set_alert_level(AlertLevel::MildAlert));

        assert_eq!(
            lls.on_disconnect(TerminationReason::CONNECTION_TIMEOUT),
            Some(AlertLevel::MildAlert)
        );
        assert_eq!(lls.alert_level(), AlertLevel::MildAlert);
    }

    #[test]
    fn last_registration_wins() {
        let first = AtomicUsize::new(0);
        let second = AtomicUsize::new(0);
        let a = |_: AlertLevel| {
            first.fetch_add(1, Ordering::SeqCst);
        };
        let b = |_: AlertLevel| {
            second.fetch_add(1, Ordering::SeqCst);
        };

        let lls: LinkLossService<'_, NoopRawMutex> = LinkLossService::default();
        lls.register_disconnect_callback(&a);
        lls.register_disconnect_callback(&b);
        lls.on_disconnect(TerminationReason::CONNECTION_TIMEOUT);
        lls.on_disconnect(TerminationReason::CONNECTION_TIMEOUT);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 2);

        lls.clear_disconnect_callback();
        lls.on_disconnect(TerminationReason::CONNECTION_TIMEOUT);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    static RESETTING: LinkLossService<'static, CriticalSectionRawMutex> = LinkLossService::new(Config::DEFAULT);
    static RESET_FROM: AtomicU8 = AtomicU8::new(0xff);
    static RESET: fn(AlertLevel) = reset_after_alert;

    fn reset_after_alert(level: AlertLevel) {
        RESET_FROM.store(level.into(), Ordering::SeqCst);
        unwrap!(RESETTING.set_alert_level(AlertLevel::NoAlert));
    }

    #[test]
    fn handler_may_call_back_into_service() {
        RESETTING.register_disconnect_callback(&RESET);
        unwrap!(RESETTING.set_alert_level(AlertLevel::HighAlert));

        assert_eq!(
            RESETTING.on_disconnect(TerminationReason::CONNECTION_TIMEOUT),
            Some(AlertLevel::HighAlert)
        );
        assert_eq!(RESET_FROM.load(Ordering::SeqCst), 2);
        assert_eq!(RESETTING.alert_level(), AlertLevel::NoAlert);
    }

    #[test]
    fn reason_from_raw_status() {
        assert!(TerminationReason::from(0x08).is_supervision_timeout());
        assert!(!TerminationReason::from(0x13).is_supervision_timeout());
        assert_eq!(TerminationReason::CONNECTION_TIMEOUT.into_inner(), 0x08);
        assert_eq!(TerminationReason::CONNECTION_TIMEOUT.to_string(), "connection timeout");
        assert_eq!(TerminationReason::new(0x42).to_string(), "status 0x42");
    }
}
