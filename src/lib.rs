pub mod error;
pub mod export;
pub mod net;
pub mod topo;

#[cfg(test)]
mod test;
