use std::io::{self, Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{CoreError, Result};
use crate::traits::{Archive, ArchiveReader};

/// [`ArchiveReader`] backed by the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

/// An open ZIP archive over a borrowed buffer.
pub struct ZipArchiveHandle<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl ArchiveReader for ZipArchiveReader {
    type Archive<'a> = ZipArchiveHandle<'a>;

    fn open<'a>(&self, data: &'a [u8]) -> Result<ZipArchiveHandle<'a>> {
        let archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| CoreError::Archive(e.to_string()))?;
        Ok(ZipArchiveHandle { archive })
    }
}

impl ZipArchiveHandle<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl Archive for ZipArchiveHandle<'_> {
    type Entry<'e>
        = Box<dyn Read + 'e>
    where
        Self: 'e;

    fn entry_size(&mut self, name: &str) -> Result<u64> {
        let file = self
            .archive
            .by_name(name)
            .map_err(|e| entry_error(name, e))?;
        Ok(file.size())
    }

    fn open_entry(&mut self, name: &str) -> Result<Self::Entry<'_>> {
        let file = self
            .archive
            .by_name(name)
            .map_err(|e| entry_error(name, e))?;
        Ok(Box::new(file))
    }
}

fn entry_error(name: &str, err: ZipError) -> CoreError {
    match err {
        ZipError::FileNotFound => CoreError::NotFound(name.to_string()),
        ZipError::Io(e) => CoreError::Io(e),
        other => CoreError::Archive(format!("{name}: {other}")),
    }
}

/// Reads from `reader` until `buf` is full or the stream ends.
///
/// Returns the number of bytes actually read, which is less than `buf.len()`
/// only when the stream ended early.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Yields at most `step` bytes per read and fails once with `Interrupted`.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupted: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_full_fills_across_short_reads() {
        let mut reader = Trickle {
            data: b"abcdefghij",
            step: 3,
            interrupted: false,
        };
        let mut buf = [0u8; 10];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 10);
        assert_eq!(&buf, b"abcdefghij");
    }

    #[test]
    fn read_full_stops_at_eof() {
        let mut reader = Cursor::new(&b"abc"[..]);
        let mut buf = [0u8; 8];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 3);
        assert_eq!(&buf[3..], &[0u8; 5]);
    }

    #[test]
    fn read_full_propagates_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("boom"))
            }
        }
        let mut buf = [0u8; 4];
        assert!(read_full(&mut Broken, &mut buf).is_err());
    }

    #[test]
    fn zip_reader_rejects_non_archives() {
        assert!(matches!(
            ZipArchiveReader.open(&[]),
            Err(CoreError::Archive(_))
        ));
        assert!(ZipArchiveReader.open(b"definitely not a zip").is_err());
    }

    #[test]
    fn zip_reader_reports_entry_sizes() {
        let data = build_zip(&[("a.txt", &b"hello"[..]), ("b.bin", &[7u8; 300][..])]);
        let mut archive = ZipArchiveReader.open(&data).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.entry_size("a.txt").unwrap(), 5);
        assert_eq!(archive.entry_size("b.bin").unwrap(), 300);
    }

    #[test]
    fn zip_reader_missing_entry_is_not_found() {
        let data = build_zip(&[("a.txt", &b"hello"[..])]);
        let mut archive = ZipArchiveReader.open(&data).unwrap();
        assert!(matches!(
            archive.entry_size("missing"),
            Err(CoreError::NotFound(name)) if name == "missing"
        ));
        assert!(matches!(
            archive.open_entry("missing"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn zip_reader_streams_entry_contents() {
        let data = build_zip(&[("a.txt", &b"hello"[..])]);
        let mut archive = ZipArchiveReader.open(&data).unwrap();
        let mut entry = archive.open_entry("a.txt").unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"hello");
    }
}
