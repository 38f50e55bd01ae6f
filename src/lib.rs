pub mod addr;
pub mod arp;
pub mod config;
pub mod controller;
pub mod routing;
pub mod topo;

#[cfg(test)]
mod test;
