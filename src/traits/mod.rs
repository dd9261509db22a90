mod driver;
mod sink;

pub use driver::{DriverSession, OracleDriver, StreamOptions};
pub use sink::{ChannelSink, RowSink, StreamEvent};
