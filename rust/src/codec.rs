//! File codecs for the two benchmark formats.
//!
//! Every call opens its file, does the whole transfer and drops the handle
//! before returning, on success and on error alike.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::FileFormat;

/// Digits after the decimal point in the ASCII mantissa.
pub const DEFAULT_PRECISION: usize = 5;

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// What a read does when the file holds fewer values than the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Fill what the file provides; the remaining entries keep their values.
    #[default]
    Lenient,
    /// Fail with [`Error::LengthMismatch`] on a short file.
    Strict,
}

impl ReadMode {
    fn check(self, path: &Path, expected: usize, actual: usize) -> Result<usize> {
        match self {
            ReadMode::Strict if actual < expected => Err(Error::LengthMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            }),
            _ => Ok(actual),
        }
    }
}

/// Writes a slice of doubles to a file and reads it back.
pub trait Codec {
    fn format(&self) -> FileFormat;

    /// Create or truncate `path` and store `values` in it.
    fn write(&self, path: &Path, values: &[f64]) -> Result<()>;

    /// Load up to `values.len()` values from `path` in order.
    ///
    /// Returns how many entries were overwritten. If the file cannot be
    /// opened, `values` is left untouched.
    fn read(&self, path: &Path, values: &mut [f64], mode: ReadMode) -> Result<usize>;
}

/// Text codec: one value per line, C-style scientific notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiCodec {
    precision: usize,
}

impl AsciiCodec {
    pub const fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub const fn precision(&self) -> usize {
        self.precision
    }
}

impl Default for AsciiCodec {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Codec for AsciiCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Ascii
    }

    fn write(&self, path: &Path, values: &[f64]) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut out = BufWriter::new(file);
        for &value in values {
            writeln!(out, "{}", Scientific::new(value, self.precision))
                .map_err(|e| Error::io(path, e))?;
        }
        out.flush().map_err(|e| Error::io(path, e))
    }

    fn read(&self, path: &Path, values: &mut [f64], mode: ReadMode) -> Result<usize> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        let mut filled = 0;

        while filled < values.len() {
            line.clear();
            let n = reader.read_line(&mut line).map_err(|e| Error::io(path, e))?;
            if n == 0 {
                break;
            }
            for token in line.split_whitespace() {
                if filled == values.len() {
                    break;
                }
                values[filled] = token.parse().map_err(|_| Error::Parse {
                    path: path.to_path_buf(),
                    index: filled,
                    token: token.to_string(),
                })?;
                filled += 1;
            }
        }

        mode.check(path, values.len(), filled)
    }
}

/// Raw codec: native-endian 8-byte doubles, no header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Binary
    }

    fn write(&self, path: &Path, values: &[f64]) -> Result<()> {
        let mut file = File::create(path).map_err(|e| Error::io(path, e))?;

        // f64 has no padding and u8 has alignment 1, so the slice can be
        // viewed as its native-endian bytes and written in one call.
        let byte_len = std::mem::size_of_val(values);
        let bytes = unsafe { std::slice::from_raw_parts(values.as_ptr() as *const u8, byte_len) };
        file.write_all(bytes).map_err(|e| Error::io(path, e))?;
        file.flush().map_err(|e| Error::io(path, e))
    }

    fn read(&self, path: &Path, values: &mut [f64], mode: ReadMode) -> Result<usize> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let wanted = (values.len() * F64_SIZE) as u64;
        let mut bytes = Vec::with_capacity(values.len() * F64_SIZE);
        file.take(wanted)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(path, e))?;

        // A trailing partial group is ignored.
        let mut filled = 0;
        for (dst, chunk) in values.iter_mut().zip(bytes.chunks_exact(F64_SIZE)) {
            let mut raw = [0u8; F64_SIZE];
            raw.copy_from_slice(chunk);
            *dst = f64::from_ne_bytes(raw);
            filled += 1;
        }

        mode.check(path, values.len(), filled)
    }
}

/// Scientific notation as printed by C's `%.*e`: `d.ddddde+XX`.
#[derive(Debug, Clone, Copy)]
pub struct Scientific {
    value: f64,
    precision: usize,
}

impl Scientific {
    pub const fn new(value: f64, precision: usize) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-inf" } else { "inf" });
        }

        // Rust prints `1.23457e3`; rewrite the exponent as `e+03`.
        let rust = format!("{:.*e}", self.precision, v);
        let (mantissa, exp) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sci(v: f64) -> String {
        Scientific::new(v, DEFAULT_PRECISION).to_string()
    }

    #[test]
    fn test_scientific_matches_c_layout() {
        assert_eq!(sci(1234.5678), "1.23457e+03");
        assert_eq!(sci(0.0), "0.00000e+00");
        assert_eq!(sci(-0.00042), "-4.20000e-04");
        assert_eq!(sci(9.999999), "1.00000e+01");
        assert_eq!(sci(1e-300), "1.00000e-300");
        assert_eq!(sci(f64::NAN), "nan");
        assert_eq!(sci(f64::NEG_INFINITY), "-inf");
        assert_eq!(Scientific::new(2.5, 2).to_string(), "2.50e+00");
    }

    #[test]
    fn test_ascii_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.dat");
        AsciiCodec::default().write(&path, &[1.0, -2.5, 1e10]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1.00000e+00\n-2.50000e+00\n1.00000e+10\n");
    }

    #[test]
    fn test_ascii_reads_any_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.dat");
        std::fs::write(&path, "1.5 2.5\n\n  3.5\t4.5\n5.5\n").unwrap();

        let mut values = [0.0; 4];
        let n = AsciiCodec::default()
            .read(&path, &mut values, ReadMode::Lenient)
            .unwrap();
        assert_eq!(n, 4);
        assert_eq!(values, [1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_ascii_non_finite_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("special.dat");
        let codec = AsciiCodec::default();
        codec
            .write(&path, &[f64::INFINITY, f64::NEG_INFINITY, f64::NAN])
            .unwrap();

        let mut values = [0.0; 3];
        codec.read(&path, &mut values, ReadMode::Strict).unwrap();
        assert_eq!(values[0], f64::INFINITY);
        assert_eq!(values[1], f64::NEG_INFINITY);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_ascii_short_read_keeps_stale_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.dat");
        std::fs::write(&path, "1.0\n2.0\n").unwrap();

        let mut values = [9.0; 4];
        let n = AsciiCodec::default()
            .read(&path, &mut values, ReadMode::Lenient)
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(values, [1.0, 2.0, 9.0, 9.0]);

        let err = AsciiCodec::default()
            .read(&path, &mut values, ReadMode::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch { expected: 4, actual: 2, .. }
        ));
    }

    #[test]
    fn test_ascii_malformed_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.dat");
        std::fs::write(&path, "1.0\nabc\n3.0\n").unwrap();

        let mut values = [0.0; 3];
        let err = AsciiCodec::default()
            .read(&path, &mut values, ReadMode::Lenient)
            .unwrap_err();
        match err {
            Error::Parse { index, token, .. } => {
                assert_eq!(index, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(values, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_binary_bytes_are_native_endian() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.bin");
        BinaryCodec.write(&path, &[1.0, -0.5]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&1.0f64.to_ne_bytes());
        expected.extend_from_slice(&(-0.5f64).to_ne_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_binary_short_and_partial_reads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.bin");
        let mut bytes = 7.0f64.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xAB; 5]);
        std::fs::write(&path, bytes).unwrap();

        let mut values = [1.0; 3];
        let n = BinaryCodec.read(&path, &mut values, ReadMode::Lenient).unwrap();
        assert_eq!(n, 1);
        assert_eq!(values, [7.0, 1.0, 1.0]);

        assert!(matches!(
            BinaryCodec.read(&path, &mut values, ReadMode::Strict),
            Err(Error::LengthMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn test_binary_ignores_trailing_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.bin");
        BinaryCodec.write(&path, &[1.0, 2.0, 3.0]).unwrap();

        let mut values = [0.0; 2];
        let n = BinaryCodec.read(&path, &mut values, ReadMode::Strict).unwrap();
        assert_eq!(n, 2);
        assert_eq!(values, [1.0, 2.0]);
    }

    #[test]
    fn test_missing_file_leaves_buffer_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing");
        let mut values = [4.0; 3];

        for codec in [&AsciiCodec::default() as &dyn Codec, &BinaryCodec] {
            let err = codec.read(&path, &mut values, ReadMode::Lenient).unwrap_err();
            assert!(matches!(err, Error::Io { .. }), "{}: {err}", codec.format());
            assert_eq!(values, [4.0; 3]);
        }
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.bin");
        assert!(matches!(BinaryCodec.write(&path, &[1.0]), Err(Error::Io { .. })));
        assert!(matches!(
            AsciiCodec::default().write(&path, &[1.0]),
            Err(Error::Io { .. })
        ));
    }
}
