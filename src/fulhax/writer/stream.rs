//! FULHAX output stream (primitive writer).
//!
//! All values are written little-endian at fixed width. Array writes are
//! element-wise with no count prefix; callers write counts explicitly.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::util::{checked_u32, Error, Result};

/// Output stream for writing FULHAX data.
pub struct OStream<W: Write> {
    writer: W,
    pos: u64,
}

impl OStream<BufWriter<File>> {
    /// Create a new output stream for the given file path.
    ///
    /// The file is truncated. It is closed when the stream is dropped.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::new(BufWriter::with_capacity(256 * 1024, file)))
    }
}

macro_rules! scalar_writes {
    ($($(#[$doc:meta])* $name:ident, $array:ident, $ty:ty, $call:ident $(::<$bo:ty>)?;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, value: $ty) -> Result<()> {
                self.writer.$call$(::<$bo>)?(value)?;
                self.pos += std::mem::size_of::<$ty>() as u64;
                Ok(())
            }

            /// Write each element in order, no count prefix.
            pub fn $array(&mut self, values: &[$ty]) -> Result<()> {
                for &value in values {
                    self.$name(value)?;
                }
                Ok(())
            }
        )*
    };
}

impl<W: Write> OStream<W> {
    /// Wrap an arbitrary byte sink.
    pub fn new(writer: W) -> Self {
        Self { writer, pos: 0 }
    }

    /// Get the current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write bytes and advance position.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    scalar_writes! {
        /// Write a u8 value.
        write_u8, write_u8_array, u8, write_u8;
        /// Write an i8 value.
        write_i8, write_i8_array, i8, write_i8;
        /// Write a u16 value (little-endian).
        write_u16, write_u16_array, u16, write_u16::<LittleEndian>;
        /// Write an i16 value (little-endian).
        write_i16, write_i16_array, i16, write_i16::<LittleEndian>;
        /// Write a u32 value (little-endian).
        write_u32, write_u32_array, u32, write_u32::<LittleEndian>;
        /// Write an i32 value (little-endian).
        write_i32, write_i32_array, i32, write_i32::<LittleEndian>;
        /// Write a u64 value (little-endian).
        write_u64, write_u64_array, u64, write_u64::<LittleEndian>;
        /// Write an i64 value (little-endian).
        write_i64, write_i64_array, i64, write_i64::<LittleEndian>;
        /// Write an f32 value (little-endian).
        write_f32, write_f32_array, f32, write_f32::<LittleEndian>;
        /// Write an f64 value (little-endian).
        write_f64, write_f64_array, f64, write_f64::<LittleEndian>;
    }

    /// Write raw character bytes with no length prefix and no terminator.
    pub fn write_chars(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write a `u32` byte count followed by the UTF-8 bytes.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len = checked_u32("string length", s.len())?;
        self.write_u32(len)?;
        self.write_bytes(s.as_bytes())
    }

    /// Write the UTF-8 bytes followed by a single zero byte.
    ///
    /// Strings containing NUL are rejected since they could not be read back.
    pub fn write_cstring(&mut self, s: &str) -> Result<()> {
        if s.as_bytes().contains(&0) {
            return Err(Error::Encoding(format!(
                "interior NUL in zero-terminated string {:?}",
                s
            )));
        }
        self.write_bytes(s.as_bytes())?;
        self.write_u8(0)
    }

    /// Flush the buffer to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

/// Encoded byte length of a length-prefixed string.
#[inline]
pub fn string_size(s: &str) -> u64 {
    4 + s.len() as u64
}
