pub mod features;
pub mod fixtures;
pub mod frame;
pub mod recognition;
pub mod session;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_server;
