use super::signal::TrackerSignal;

/// Trait for host systems that react to tracker signals: the chat
/// broadcaster, a placeholder bridge, log sinks, and so on.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &TrackerSignal);

    /// Handle a batch (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[TrackerSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
