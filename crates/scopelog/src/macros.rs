//! Convenience macros, one per (severity, timestamp) combination.
//!
//! Without arguments a macro evaluates to a fresh line for chaining:
//! `log_info!().append("x").append(1);`. With format arguments it builds and
//! emits the line in one statement: `log_info!("x {}", 1);`.

/// Info line with a timestamp.
#[macro_export]
macro_rules! log_info {
    () => {
        $crate::log_info()
    };
    ($($arg:tt)+) => {{
        $crate::log_info().append_args(::std::format_args!($($arg)+));
    }};
}

/// Warning line with a timestamp.
#[macro_export]
macro_rules! log_warn {
    () => {
        $crate::log_warn()
    };
    ($($arg:tt)+) => {{
        $crate::log_warn().append_args(::std::format_args!($($arg)+));
    }};
}

/// Error line with a timestamp.
#[macro_export]
macro_rules! log_error {
    () => {
        $crate::log_error()
    };
    ($($arg:tt)+) => {{
        $crate::log_error().append_args(::std::format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_info_nt {
    () => {
        $crate::log_info_nt()
    };
    ($($arg:tt)+) => {{
        $crate::log_info_nt().append_args(::std::format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_warn_nt {
    () => {
        $crate::log_warn_nt()
    };
    ($($arg:tt)+) => {{
        $crate::log_warn_nt().append_args(::std::format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_error_nt {
    () => {
        $crate::log_error_nt()
    };
    ($($arg:tt)+) => {{
        $crate::log_error_nt().append_args(::std::format_args!($($arg)+));
    }};
}
