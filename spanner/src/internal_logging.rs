//! Diagnostics emitted from inside the generator and its publishers.
//!
//! `spanner_debug!`, `spanner_warn!` and `spanner_error!` become `tracing`
//! events targeted at the emitting crate when the `internal-logs` feature is
//! on. Under `cfg(test)` they print to stdout, visible with `--nocapture`.
//! Binaries install a subscriber and log through `tracing` directly.

#[doc(hidden)]
#[macro_export]
macro_rules! __spanner_log {
    ($level:ident, $name:expr $(, $key:ident = $value:expr)* $(,)?) => {{
        #[cfg(feature = "internal-logs")]
        $crate::_private::$level!(
            name: $name,
            target: env!("CARGO_PKG_NAME"),
            name = $name
            $(, $key = $value)*
        );

        #[cfg(test)]
        {
            print!("spanner_{}: name={}", stringify!($level), $name);
            $(print!(", {}={}", stringify!($key), $value);)*
            println!();
        }

        #[cfg(all(not(feature = "internal-logs"), not(test)))]
        let _ = ($name $(, $value)*);
    }};
}

/// Debug diagnostic. Field values are strings or integers.
///
/// # Example:
/// ```rust
/// use spanner::spanner_debug;
/// spanner_debug!(name: "TreeBuilder.BatchBuilt", spans = 6);
/// ```
#[macro_export]
macro_rules! spanner_debug {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__spanner_log!(debug, $name $(, $key = $value)*)
    };
}

/// Warning: something was dropped or skipped, generation goes on.
///
/// # Example:
/// ```rust
/// use spanner::spanner_warn;
/// spanner_warn!(name: "Attributes.UnsupportedValueType", key = "ratio");
/// ```
#[macro_export]
macro_rules! spanner_warn {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__spanner_log!(warn, $name $(, $key = $value)*)
    };
}

/// Error: an operation failed and its output is lost.
///
/// # Example:
/// ```rust
/// use spanner::spanner_error;
/// spanner_error!(name: "InMemoryPublisher.PublishFailed", reason = "poisoned");
/// ```
#[macro_export]
macro_rules! spanner_error {
    (name: $name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::__spanner_log!(error, $name $(, $key = $value)*)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_bare_names_and_fields() {
        let topic = String::from("spans");
        spanner_debug!(name: "Test.Debug");
        spanner_debug!(name: "Test.Debug", spans = 6usize, bytes = 128u64,);
        spanner_warn!(name: "Test.Warn", topic = topic.as_str());
        spanner_error!(name: "Test.Error", reason = "poisoned", code = -1i64);
        // fields are borrowed, not moved
        assert_eq!(topic, "spans");
    }
}
