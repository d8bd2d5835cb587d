//! Driver error type.

/// Errors returned by [`crate::Ad779x`] operations.
///
/// `E` is the error type of the device's [`crate::Transport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A transport operation failed. Chip select was released before
    /// returning.
    Transport(E),
    /// No supported part has been detected on this device; nothing was sent.
    NotDetected,
    /// The ready line did not go low within the poll budget.
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::Transport(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    // Transport errors are opaque generics; Debug is all they offer.
    #[allow(clippy::use_debug)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
            Self::NotDetected => write!(f, "No AD7792/AD7793 detected"),
            Self::Timeout => write!(f, "Timed out waiting for ready"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
