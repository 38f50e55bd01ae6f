//! 路由模块
//!
//! 把拓扑位置编译成每台交换机的转发规则。

mod plan;
mod rule;
mod synth;

pub use plan::{Hop, RoutingPlan, TraceError};
pub use rule::{HASHED_PRIORITY, ROUTE_PRIORITY, Rule, RuleKind, lookup};
pub use synth::{synthesize, uplink_port};
