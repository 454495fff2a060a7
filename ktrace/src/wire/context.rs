//! Fixed-size event context (header) decoding
//!
//! Layout is documented on [`ktrace_common::CONTEXT_SIZE`]. The whole header
//! is validated up front: a buffer shorter than the fixed size fails before
//! any field is read, so a truncated header never yields a partial context.

use bytes::Buf;
use ktrace_common::{COMM_LEN, CONTEXT_SIZE};

use crate::domain::{EventId, StackId, WireError};

/// Decoded fixed-size header of one kernel event.
///
/// Most fields are pass-through metadata for the renderer; the pipeline
/// itself only interprets `event_id`, `argnum` and `stack_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// Monotonic timestamp in nanoseconds (from `bpf_ktime_get_ns()`).
    pub timestamp_ns: u64,
    /// Process ID (TGID in kernel terms).
    pub pid: u32,
    /// Thread ID.
    pub tid: u32,
    /// Parent process ID.
    pub ppid: u32,
    /// Real user ID of the task.
    pub uid: u32,
    /// Mount namespace id.
    pub mount_ns: u32,
    /// PID namespace id.
    pub pid_ns: u32,
    /// Task command name, NUL-padded.
    pub comm: [u8; COMM_LEN],
    /// Which probe fired.
    pub event_id: EventId,
    /// Number of tagged arguments following the header on the wire.
    pub argnum: u8,
    /// Return value of the traced call.
    pub retval: i64,
    /// Key into the kernel stack-trace table.
    pub stack_id: StackId,
}

impl EventContext {
    /// Decode a context from the head of a raw buffer.
    ///
    /// Consumes exactly [`CONTEXT_SIZE`] bytes from the cursor on success.
    ///
    /// # Errors
    /// Returns [`WireError::UnexpectedEof`] if fewer than [`CONTEXT_SIZE`]
    /// bytes remain; the cursor is left untouched in that case.
    pub fn decode(buf: &mut impl Buf) -> Result<Self, WireError> {
        if buf.remaining() < CONTEXT_SIZE {
            return Err(WireError::UnexpectedEof {
                needed: CONTEXT_SIZE,
                remaining: buf.remaining(),
            });
        }

        let timestamp_ns = buf.get_u64_le();
        let pid = buf.get_u32_le();
        let tid = buf.get_u32_le();
        let ppid = buf.get_u32_le();
        let uid = buf.get_u32_le();
        let mount_ns = buf.get_u32_le();
        let pid_ns = buf.get_u32_le();
        let mut comm = [0u8; COMM_LEN];
        buf.copy_to_slice(&mut comm);
        let event_id = EventId(buf.get_u32_le());
        let argnum = buf.get_u8();
        buf.advance(3); // alignment padding
        let retval = buf.get_i64_le();
        let stack_id = StackId(buf.get_u32_le());

        Ok(Self {
            timestamp_ns,
            pid,
            tid,
            ppid,
            uid,
            mount_ns,
            pid_ns,
            comm,
            event_id,
            argnum,
            retval,
            stack_id,
        })
    }

    /// Command name as a string, stopping at the first NUL byte.
    #[must_use]
    pub fn comm_str(&self) -> String {
        let end = self.comm.iter().position(|&b| b == 0).unwrap_or(COMM_LEN);
        String::from_utf8_lossy(&self.comm[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&123_456_789u64.to_le_bytes()); // timestamp_ns
        buf.extend_from_slice(&100u32.to_le_bytes()); // pid
        buf.extend_from_slice(&101u32.to_le_bytes()); // tid
        buf.extend_from_slice(&1u32.to_le_bytes()); // ppid
        buf.extend_from_slice(&1000u32.to_le_bytes()); // uid
        buf.extend_from_slice(&0xAAu32.to_le_bytes()); // mount_ns
        buf.extend_from_slice(&0xBBu32.to_le_bytes()); // pid_ns
        let mut comm = [0u8; COMM_LEN];
        comm[..4].copy_from_slice(b"bash");
        buf.extend_from_slice(&comm);
        buf.extend_from_slice(&7u32.to_le_bytes()); // event_id
        buf.push(2); // argnum
        buf.extend_from_slice(&[0, 0, 0]); // padding
        buf.extend_from_slice(&(-1i64).to_le_bytes()); // retval
        buf.extend_from_slice(&42u32.to_le_bytes()); // stack_id
        buf
    }

    #[test]
    fn test_decode_valid_header() {
        let raw = sample_header();
        assert_eq!(raw.len(), CONTEXT_SIZE);

        let mut cursor = &raw[..];
        let ctx = EventContext::decode(&mut cursor).unwrap();
        assert_eq!(ctx.timestamp_ns, 123_456_789);
        assert_eq!(ctx.pid, 100);
        assert_eq!(ctx.tid, 101);
        assert_eq!(ctx.event_id, EventId(7));
        assert_eq!(ctx.argnum, 2);
        assert_eq!(ctx.retval, -1);
        assert_eq!(ctx.stack_id, StackId(42));
        assert_eq!(ctx.comm_str(), "bash");
        assert!(cursor.is_empty(), "decode must consume exactly CONTEXT_SIZE bytes");
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let raw = sample_header();
        let mut cursor = &raw[..CONTEXT_SIZE - 1];
        let err = EventContext::decode(&mut cursor).unwrap_err();
        assert_eq!(err, WireError::UnexpectedEof { needed: CONTEXT_SIZE, remaining: 67 });
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let mut cursor: &[u8] = &[];
        assert!(EventContext::decode(&mut cursor).is_err());
    }
}
