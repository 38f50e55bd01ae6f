//! 拓扑模块
//!
//! fat-tree 的内存描述：交换机、主机、链路及端口编号。启动时由 k 构建一次，之后只读。

mod export;
pub mod fat_tree;
mod link;

pub use export::{HostSpec, LinkSpec, SwitchSpec, TopologySpec};
pub use fat_tree::{Endpoint, Host, MAX_K, Switch, TopologyError, TopologyModel};
pub use link::{Link, LinkClass, LinkProfile, LinkProfiles};
