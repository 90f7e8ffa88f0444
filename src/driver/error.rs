//! Error types for the AR71xx MDIO and MII control drivers
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Unsupported mode/speed/port combinations and bad clocks
//! - [`IoError`]: Hardware did not complete a transaction in time
//! - [`AcquireError`]: Locating or sharing an MII control block failed
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Always reported synchronously; the driver never substitutes a "nearest"
/// supported setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter (e.g. empty divider table)
    InvalidConfig,
    /// Reference clock frequency is zero
    InvalidClock,
    /// Interface mode not available on this port or hardware variant
    UnsupportedInterface,
    /// Link speed not available with the current interface or variant
    UnsupportedSpeed,
    /// Port index beyond the controller's port count
    InvalidPort,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidClock => "invalid reference clock",
            ConfigError::UnsupportedInterface => "unsupported interface mode",
            ConfigError::UnsupportedSpeed => "unsupported link speed",
            ConfigError::InvalidPort => "invalid port index",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Hardware transaction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Busy indicator did not clear within the poll bound
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
        }
    }
}

// =============================================================================
// Acquire Errors
// =============================================================================

/// Errors from locating and sharing an MII control block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireError {
    /// Locator could not be resolved or names an unknown controller
    NotFound,
    /// Controller is known but its provider has not bound it yet; retry later
    NotReady,
    /// Requested port is beyond the controller's port count
    InvalidPort,
    /// Controller still has live handles
    InUse,
    /// No registry slot or reference count left
    ResourceExhausted,
}

impl core::fmt::Display for AcquireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AcquireError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AcquireError::NotFound => "controller not found",
            AcquireError::NotReady => "controller not ready",
            AcquireError::InvalidPort => "invalid port index",
            AcquireError::InUse => "controller in use",
            AcquireError::ResourceExhausted => "resources exhausted",
        }
    }

    /// Whether acquisition may succeed if retried later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, AcquireError::NotReady)
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::UnsupportedSpeed)) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     Err(Error::Acquire(e)) if e.is_retryable() => { /* defer */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// Acquisition error
    Acquire(AcquireError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Acquire(e) => write!(f, "acquire: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<AcquireError> for Error {
    fn from(e: AcquireError) -> Self {
        Error::Acquire(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

/// Result type alias for handle acquisition
pub type AcquireResult<T> = core::result::Result<T, AcquireError>;

// =============================================================================
// Unit Tests
// =============================================================================
