// One physical record file per (module, record type) with random record access.
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use libc::{EACCES, EPERM};
use tracing::warn;

use crate::core::error::{Error, ErrorKind};
use crate::core::field::RecordSchema;
use crate::core::schema::{self, RecordType};
use crate::core::version::TigerVersion;

/// Bytes scanned for the first line terminator; longer than any TIGER record.
pub const RECORD_SCAN_LEN: usize = 500;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRecord {
    index: u64,
    bytes: Vec<u8>,
}

impl RawRecord {
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Record bytes with any line terminator removed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// `<dir>/<module><ext>`; the extension follows the case of the module name.
pub fn module_path(dir: &Path, module: &str, record_type: RecordType) -> PathBuf {
    let ext = record_type.extension();
    let lowercase = module
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_lowercase());
    let ext = if lowercase { ext.to_ascii_lowercase() } else { ext };
    dir.join(format!("{module}{ext}"))
}

#[derive(Debug)]
pub struct ModuleFile {
    path: PathBuf,
    module: String,
    version: TigerVersion,
    schema: &'static RecordSchema,
    file: File,
    record_length: u64,
    record_count: u64,
    trailing_bytes: u64,
    version_code: Option<u32>,
}

impl ModuleFile {
    pub fn open(
        dir: &Path,
        module: &str,
        record_type: RecordType,
        version: TigerVersion,
    ) -> Result<Self, Error> {
        let schema = schema::lookup(record_type, version)?;
        let path = module_path(dir, module, record_type);
        Self::open_path(path, module, schema, version)
    }

    pub fn open_path(
        path: impl AsRef<Path>,
        module: &str,
        schema: &'static RecordSchema,
        version: TigerVersion,
    ) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path).map_err(|err| {
            Error::new(open_error_kind(&err))
                .with_path(&path)
                .with_module(module)
                .with_source(err)
        })?;

        let file_size = file
            .metadata()
            .map(|meta| meta.len())
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&path).with_source(err))?;

        let head = read_head(&mut file, &path)?;
        let record_length =
            establish_record_length(&head).unwrap_or(u64::from(schema.record_length));
        let record_count = file_size / record_length;
        let trailing_bytes = file_size % record_length;
        if trailing_bytes != 0 {
            warn!(
                path = %path.display(),
                record_length,
                trailing_bytes,
                "file ends with a partial record; ignoring it"
            );
        }

        Ok(Self {
            path,
            module: module.to_string(),
            version,
            schema,
            file,
            record_length,
            record_count,
            trailing_bytes,
            version_code: parse_version_code(&head),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn record_type(&self) -> RecordType {
        self.schema.record_type
    }

    pub fn version(&self) -> TigerVersion {
        self.version
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    /// Physical record length including line terminators.
    pub fn record_length(&self) -> u64 {
        self.record_length
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Bytes after the last whole record.
    pub fn trailing_bytes(&self) -> u64 {
        self.trailing_bytes
    }

    /// Columns 2-5 of the first record, when they are all digits.
    pub fn version_code(&self) -> Option<u32> {
        self.version_code
    }

    pub fn read_record(&mut self, index: u64) -> Result<RawRecord, Error> {
        if index >= self.record_count {
            return Err(Error::new(ErrorKind::OutOfRange)
                .with_message(format!(
                    "record index past end of file ({} records)",
                    self.record_count
                ))
                .with_path(&self.path)
                .with_record(index));
        }
        let offset = index * self.record_length;
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))?;

        let mut bytes = vec![0u8; self.record_length as usize];
        self.file.read_exact(&mut bytes).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::UnexpectedEof {
                ErrorKind::ShortRead
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_path(&self.path)
                .with_record(index)
                .with_offset(offset)
                .with_source(err)
        })?;

        let data_len = bytes.trim_end_with(|c| c == '\r' || c == '\n').len();
        bytes.truncate(data_len);
        Ok(RawRecord { index, bytes })
    }
}

pub(crate) fn open_error_kind(err: &io::Error) -> ErrorKind {
    let errno = err.raw_os_error().unwrap_or_default();
    if errno == EACCES || errno == EPERM {
        return ErrorKind::Permission;
    }
    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::Permission,
        _ => ErrorKind::Io,
    }
}

fn read_head(file: &mut File, path: &Path) -> Result<Vec<u8>, Error> {
    let mut head = Vec::with_capacity(RECORD_SCAN_LEN);
    file.seek(SeekFrom::Start(0))
        .map_err(|err| Error::new(ErrorKind::Io).with_path(path).with_source(err))?;
    file.take(RECORD_SCAN_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|err| Error::new(ErrorKind::Io).with_path(path).with_source(err))?;
    Ok(head)
}

/// Data bytes of the first line plus every terminator byte that follows it.
fn establish_record_length(head: &[u8]) -> Option<u64> {
    let data_len = head.find_byteset(b"\r\n")?;
    if data_len == 0 {
        return None;
    }
    let terminators = head[data_len..]
        .iter()
        .take_while(|byte| matches!(byte, b'\r' | b'\n'))
        .count();
    Some((data_len + terminators) as u64)
}

fn parse_version_code(head: &[u8]) -> Option<u32> {
    let digits = head.get(1..5)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits.to_str().ok()?.parse().ok()
}
