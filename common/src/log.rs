/// Target used to tag events that report a finished, successful step.
///
/// Formatters can match on it to render these events differently from plain `info`.
pub const SUCCESS_TARGET: &str = "camscout::success";

#[doc(hidden)]
pub use tracing as __tracing;

/// Emits an `INFO` event tagged with [`SUCCESS_TARGET`].
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
