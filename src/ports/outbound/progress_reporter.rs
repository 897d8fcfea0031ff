/// ProgressReporter port for user-facing progress during a run
///
/// Structured diagnostics go through `tracing`; this port only drives what the
/// operator sees on the terminal.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress towards a known total
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Total expected items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
