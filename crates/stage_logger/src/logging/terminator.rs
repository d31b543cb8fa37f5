/// Ends the process after a fatal record has been written.
///
/// [`ContextLogger`](super::ContextLogger) calls this exactly once per
/// fatal record, after flushing its sink. Implementations other than
/// [`ProcessExit`] exist so tests can observe the call without exiting.
pub trait Terminator: Send + Sync {
    fn terminate(&self);
}

/// Exit status used by [`ProcessExit`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Exits the process with [`FATAL_EXIT_CODE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self) {
        std::process::exit(FATAL_EXIT_CODE)
    }
}
