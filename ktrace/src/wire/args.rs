//! Self-describing tagged argument decoding
//!
//! Each argument on the wire is `tag: u8, type: u8, payload`, with the
//! payload size fixed by the type code (variable-length payloads carry a
//! `u32` length prefix). Decoding consumes from a shared cursor so the
//! decoder stage can pull successive arguments out of one raw buffer.

use std::fmt;

use bytes::Buf;
use ktrace_common::arg_type;

use crate::domain::{ArgTag, WireError};

/// A decoded argument payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I32(i32),
    I64(i64),
    Str(String),
    Bytes(Vec<u8>),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::U8(v) => write!(f, "{v}"),
            ArgValue::U16(v) => write!(f, "{v}"),
            ArgValue::U32(v) => write!(f, "{v}"),
            ArgValue::U64(v) => write!(f, "{v}"),
            ArgValue::I32(v) => write!(f, "{v}"),
            ArgValue::I64(v) => write!(f, "{v}"),
            ArgValue::Str(s) => write!(f, "{s}"),
            ArgValue::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{byte:02X}")?;
                }
                Ok(())
            }
        }
    }
}

fn need(buf: &impl Buf, needed: usize) -> Result<(), WireError> {
    if buf.remaining() < needed {
        return Err(WireError::UnexpectedEof { needed, remaining: buf.remaining() });
    }
    Ok(())
}

fn decode_len_prefixed(buf: &mut impl Buf) -> Result<Vec<u8>, WireError> {
    need(buf, 4)?;
    let len = buf.get_u32_le() as usize;
    need(buf, len)?;
    let mut payload = vec![0u8; len];
    buf.copy_to_slice(&mut payload);
    Ok(payload)
}

/// Decode one tagged argument from the cursor.
///
/// # Errors
/// Returns [`WireError`] when the buffer runs out mid-argument or the type
/// code is unknown. The cursor position after a failure is unspecified
/// beyond "at or past the failing argument"; callers treat the remainder of
/// the buffer as best-effort.
pub fn decode_arg(buf: &mut impl Buf) -> Result<(ArgTag, ArgValue), WireError> {
    need(buf, 2)?;
    let tag = ArgTag(buf.get_u8());
    let type_code = buf.get_u8();

    let value = match type_code {
        arg_type::U8 => {
            need(buf, 1)?;
            ArgValue::U8(buf.get_u8())
        }
        arg_type::U16 => {
            need(buf, 2)?;
            ArgValue::U16(buf.get_u16_le())
        }
        arg_type::U32 => {
            need(buf, 4)?;
            ArgValue::U32(buf.get_u32_le())
        }
        arg_type::U64 => {
            need(buf, 8)?;
            ArgValue::U64(buf.get_u64_le())
        }
        arg_type::I32 => {
            need(buf, 4)?;
            ArgValue::I32(buf.get_i32_le())
        }
        arg_type::I64 => {
            need(buf, 8)?;
            ArgValue::I64(buf.get_i64_le())
        }
        arg_type::STR => {
            let payload = decode_len_prefixed(buf)?;
            ArgValue::Str(String::from_utf8_lossy(&payload).into_owned())
        }
        arg_type::BYTES => ArgValue::Bytes(decode_len_prefixed(buf)?),
        other => return Err(WireError::UnknownArgType(other)),
    };

    Ok((tag, value))
}
