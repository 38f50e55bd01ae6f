//! 控制器模块
//!
//! 把控制面事件转换成规则下发和 packet-out。

mod event;
mod service;
mod sink;

pub use event::{ConnId, ConnState, ControllerEvent, Disposition};
pub use service::{ControllerError, ControllerService};
pub use sink::{PacketSink, RecordingSink, RuleSink, SinkCommand};
