//! [`std::io::Write`] for byte vectors, behind the `std` feature.
//!
//! A `SpillVec<u8, N>` is an unbounded sink like `Vec<u8>`. An
//! `InlineVec<u8, N>` behaves like `&mut [u8]`: it accepts as many bytes as
//! fit and reports a short write for the rest.

extern crate std;

use std::io::{self, Write};

use crate::{InlineVec, SpillVec};

impl<const N: usize> Write for SpillVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<const N: usize> Write for InlineVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(N - self.len());
        self.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if buf.len() > N - self.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "inline buffer full",
            ));
        }
        self.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
