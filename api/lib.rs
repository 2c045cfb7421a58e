pub mod client;
#[cfg(feature = "interact")]
pub mod interact;
