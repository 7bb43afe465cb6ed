/// Error code registry for the launcher
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Preflight errors
/// - 4000-4999: Execution errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_PARSE_ERROR: u16 = 1007;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;

    // Preflight errors (2000-2999)
    pub const PREFLIGHT_RUNTIME_MISSING: u16 = 2001;
    pub const PREFLIGHT_DEPENDENCY_MISSING: u16 = 2002;
    pub const PREFLIGHT_FILE_MISSING: u16 = 2003;

    // Execution errors (4000-4999)
    pub const EXEC_GENERIC: u16 = 4000;
    pub const EXEC_COMMAND_NOT_FOUND: u16 = 4001;
    pub const EXEC_TIMEOUT: u16 = 4002;
    pub const EXEC_APPLICATION_FAILED: u16 = 4003;
    pub const EXEC_SPAWN_FAILED: u16 = 4007;

    // Other errors (9000-9999)
    pub const OTHER_IO: u16 = 9001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1005 => "Invalid value in configuration",
        1007 => "Failed to parse configuration",
        1008 => "Configuration validation failed",

        2001 => "Runtime is not installed or not on PATH",
        2002 => "Required package is missing and could not be installed",
        2003 => "Required application file is missing",

        4000 => "Generic execution error",
        4001 => "Command not found",
        4002 => "Command execution timeout",
        4003 => "Application exited with an error",
        4007 => "Failed to spawn subprocess",

        9001 => "I/O error",

        _ => "Unrecognized error code",
    }
}
