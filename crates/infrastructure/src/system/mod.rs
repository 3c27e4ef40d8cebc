pub mod resolv_conf;
pub mod scutil;

pub use resolv_conf::ResolvConfFile;
pub use scutil::ScutilDnsSource;

/// Interface index for an IPv6 zone given as a number (`4`) or an
/// interface name (`en0`).
pub(crate) fn zone_index(zone: &str) -> Option<u32> {
    match zone.parse::<u32>() {
        Ok(index) => Some(index),
        Err(_) => interface_index(zone),
    }
}

#[cfg(unix)]
fn interface_index(name: &str) -> Option<u32> {
    let name = std::ffi::CString::new(name).ok()?;
    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    (index != 0).then_some(index)
}

#[cfg(not(unix))]
fn interface_index(_name: &str) -> Option<u32> {
    None
}
