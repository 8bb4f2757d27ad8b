use std::io;

use libc::c_char;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Uname {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

/// Text of a NUL-terminated fixed-width buffer. A buffer with no NUL is
/// taken whole. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_fixed(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

fn decode_c_field(field: &[c_char]) -> String {
    // c_char is i8 on some targets; reinterpret each byte as-is.
    let bytes: Vec<u8> = field.iter().map(|&c| c as u8).collect();
    decode_fixed(&bytes)
}

pub fn read_uname() -> io::Result<Uname> {
    // SAFETY: utsname is plain old data, so all-zero is a valid value, and
    // uname(2) only writes within the struct it is handed.
    let mut raw: libc::utsname = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::uname(&mut raw) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(Uname {
        sysname: decode_c_field(&raw.sysname),
        nodename: decode_c_field(&raw.nodename),
        release: decode_c_field(&raw.release),
        version: decode_c_field(&raw.version),
        machine: decode_c_field(&raw.machine),
    })
}
