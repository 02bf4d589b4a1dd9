/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// SMTP Provider
// ============================================================================
/// SMTP relay host of the mail provider
pub const SMTP_HOST: &str = "smtp.gmail.com";

/// SMTP submission port (STARTTLS)
pub const SMTP_PORT: u16 = 587;

/// Default bound for the verification and send operations, in seconds
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Authorization
// ============================================================================

/// Built-in shared secret used only when explicitly opted into.
///
/// This value is public and must never protect a production deployment.
pub const INSECURE_DEFAULT_API_KEY: &str = "beckk001";

// ============================================================================
// Request Fields
// ============================================================================

/// Every field a relay request must carry, in declaration order
pub const REQUIRED_FIELDS: [&str; 6] = [
    "api_key",
    "to",
    "subject",
    "body",
    "from_email",
    "from_password",
];

// ============================================================================
// HTTP
// ============================================================================

/// Maximum accepted request body size (1 MiB)
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Methods advertised in the CORS allow-methods header
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";

/// Headers advertised in the CORS allow-headers header
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

// ============================================================================
// Messages
// ============================================================================

/// User-facing message returned with a successful send
pub const MESSAGE_SENT: &str = "Email berhasil terkirim!";

/// Line break inserted into the HTML alternative for each newline
pub const HTML_LINE_BREAK: &str = "<br>";
