use tokio::sync::mpsc;
use tokio::time::Instant;

use retrans::status::{Status, StatusReporter};

/// Reporter that forwards every status, stamped with the (possibly paused)
/// tokio clock, to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<(Instant, Status)>,
}

impl StatusReporter for ChannelReporter {
    fn report(&self, status: Status) {
        let _ = self.tx.send((Instant::now(), status));
    }
}

/// Create a reporter and the receiving end the test reads from.
pub fn channel_reporter() -> (ChannelReporter, mpsc::UnboundedReceiver<(Instant, Status)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelReporter { tx }, rx)
}
