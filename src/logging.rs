//! Logging shim.
//!
//! On target (`defmt` feature) the macros forward to `defmt` and end up on
//! RTT. On the host they forward to the `log` facade, which is silent
//! unless a test installs a logger.
//!
//! Only format strings both backends understand are used: `{}` for
//! integers and `&str`, `{:?}` for types deriving both `Debug` and
//! `defmt::Format`.

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::log::warn!($($arg)*);
    }};
}
