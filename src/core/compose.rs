//! Purpose: Join a primary record with companion record files of the same module.
//! Exports: `CompanionSpec`, `Join`, `Requirement`, `Contribution`, `Companion`.
//! Exports: `Composite`, `compose`.
//! Role: Used by layers whose features span several record types (RT1+RT2+RT3, RTA+RTS).
//! Invariants: Companion records for one key are returned in file order.
//! Invariants: The key index is built by a single scan, at most once per companion file.
//! Invariants: Zero matches yield an empty contribution, never an error.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::decode::{self, DecodeOptions, DecodedRecord, Point};
use crate::core::error::{Error, ErrorKind};
use crate::core::field::CoordinateColumns;
use crate::core::module_file::{ModuleFile, RawRecord, module_path};
use crate::core::schema::RecordType;
use crate::core::version::TigerVersion;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Join {
    /// Every companion record whose `companion` column equals the primary's `primary` field.
    Key {
        primary: &'static str,
        companion: &'static str,
    },
    /// The companion record at the primary record's local index.
    RecordIndex,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    Required,
    Optional,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Contribution {
    /// Decoded attributes are merged into the feature.
    Fields,
    /// X/Y pairs are appended to the feature's shape; a `(0, 0)` pair ends a record.
    Points(&'static [CoordinateColumns]),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompanionSpec {
    pub record_type: RecordType,
    pub join: Join,
    pub requirement: Requirement,
    pub contribution: Contribution,
}

#[derive(Debug)]
pub struct Companion {
    spec: CompanionSpec,
    file: ModuleFile,
    key_index: Option<HashMap<i64, Vec<u64>>>,
}

impl Companion {
    /// Open the companion file for `module`; `Ok(None)` when an optional file is absent.
    pub fn open(
        dir: &Path,
        module: &str,
        spec: CompanionSpec,
        version: TigerVersion,
    ) -> Result<Option<Self>, Error> {
        match ModuleFile::open(dir, module, spec.record_type, version) {
            Ok(file) => Ok(Some(Self {
                spec,
                file,
                key_index: None,
            })),
            Err(err) if err.kind() == ErrorKind::NotFound => match spec.requirement {
                Requirement::Optional => {
                    warn!(
                        module,
                        record_type = %spec.record_type,
                        "optional companion file missing; features get no companion data"
                    );
                    Ok(None)
                }
                Requirement::Required => Err(err
                    .with_message(format!(
                        "required {} file missing for {version}",
                        spec.record_type
                    ))
                    .with_hint(format!(
                        "Expected {} next to the RT1 file.",
                        module_path(dir, module, spec.record_type).display()
                    ))),
            },
            Err(err) => Err(err),
        }
    }

    pub fn spec(&self) -> &CompanionSpec {
        &self.spec
    }

    pub fn file(&self) -> &ModuleFile {
        &self.file
    }

    /// Raw companion records that belong to the primary record at `local`.
    pub fn records_for(
        &mut self,
        local: u64,
        primary: &DecodedRecord,
    ) -> Result<Vec<RawRecord>, Error> {
        match self.spec.join {
            Join::RecordIndex => {
                if local >= self.file.record_count() {
                    warn!(
                        path = %self.file.path().display(),
                        record = local,
                        count = self.file.record_count(),
                        "companion file has fewer records than the primary file"
                    );
                    return Ok(Vec::new());
                }
                Ok(vec![self.file.read_record(local)?])
            }
            Join::Key { primary: key_field, .. } => {
                let Some(key) = primary.get(key_field).and_then(|value| value.as_i64()) else {
                    debug!(field = key_field, "primary record has no integer join key");
                    return Ok(Vec::new());
                };
                let ids = self.key_index()?.get(&key).cloned().unwrap_or_default();
                if ids.is_empty() {
                    debug!(
                        path = %self.file.path().display(),
                        key,
                        "no companion records for key"
                    );
                }
                ids.into_iter()
                    .map(|id| self.file.read_record(id))
                    .collect()
            }
        }
    }

    fn key_index(&mut self) -> Result<&HashMap<i64, Vec<u64>>, Error> {
        if self.key_index.is_none() {
            let index = self.scan_keys()?;
            self.key_index = Some(index);
        }
        self.key_index.as_ref().ok_or_else(|| {
            Error::new(ErrorKind::Internal).with_message("companion key index missing after build")
        })
    }

    fn scan_keys(&mut self) -> Result<HashMap<i64, Vec<u64>>, Error> {
        let Join::Key { companion, .. } = self.spec.join else {
            return Ok(HashMap::new());
        };
        let field = self.file.schema().field(companion).ok_or_else(|| {
            Error::new(ErrorKind::Schema).with_message(format!(
                "{} has no join column {companion}",
                self.spec.record_type
            ))
        })?;

        let mut index: HashMap<i64, Vec<u64>> = HashMap::new();
        for id in 0..self.file.record_count() {
            let raw = self.file.read_record(id)?;
            let key = decode::decode_field(raw.as_bytes(), field, DecodeOptions::default())?
                .and_then(|value| value.as_i64());
            if let Some(key) = key {
                index.entry(key).or_default().push(id);
            }
        }
        debug!(
            path = %self.file.path().display(),
            records = self.file.record_count(),
            keys = index.len(),
            "built companion key index"
        );
        Ok(index)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composite {
    pub fields: DecodedRecord,
    pub shape: Vec<Point>,
}

/// Merge every companion's contribution for the primary record at `local`.
pub fn compose(
    primary: DecodedRecord,
    local: u64,
    companions: &mut [Companion],
    options: DecodeOptions,
) -> Result<Composite, Error> {
    let mut composite = Composite {
        fields: primary,
        shape: Vec::new(),
    };
    for companion in companions.iter_mut() {
        let records = companion.records_for(local, &composite.fields)?;
        match companion.spec.contribution {
            Contribution::Fields => {
                let schema = companion.file.schema();
                for raw in &records {
                    composite
                        .fields
                        .merge(decode::decode(raw.as_bytes(), schema, options)?);
                }
            }
            Contribution::Points(columns) => {
                for raw in &records {
                    composite.shape.extend(
                        columns
                            .iter()
                            .map_while(|pair| decode::decode_point(raw.as_bytes(), pair)),
                    );
                }
            }
        }
    }
    Ok(composite)
}
