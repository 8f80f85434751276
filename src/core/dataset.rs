//! Purpose: Open a TIGER/Line directory (or single RT1 file) as a set of layers.
//! Exports: `Dataset`, `ModuleSet`.
//! Role: Entry point for library callers and the CLI.
//! Invariants: The module set is sorted, append-only, and fixed once `open` returns.
//! Invariants: The dataset version is resolved once at open and shared by every layer.
//! Invariants: Layers are opened on first request and cached for the session.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{Error, ErrorKind};
use crate::core::layer::{LayerKind, TigerLayer};
use crate::core::module_file::{module_path, open_error_kind};
use crate::core::options::OpenOptions;
use crate::core::schema::RecordType;
use crate::core::version::TigerVersion;

const RT1_SUFFIX: &str = ".RT1";
// RTC records are 112 bytes before 2002; a terminator at this offset means UA 2000.
const UA2000_RTC_TERMINATOR_OFFSET: usize = 112;

/// Module names (RT1 file names without the trailing `1`), in name order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModuleSet {
    names: Vec<String>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

#[derive(Debug)]
pub struct Dataset {
    path: PathBuf,
    dir: PathBuf,
    modules: ModuleSet,
    version: TigerVersion,
    version_code: u32,
    options: OpenOptions,
    layers: BTreeMap<LayerKind, TigerLayer>,
}

impl Dataset {
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let meta = fs::metadata(&path).map_err(|err| {
            Error::new(open_error_kind(&err))
                .with_path(&path)
                .with_source(err)
        })?;

        let (dir, candidates) = if meta.is_dir() {
            (path.clone(), scan_directory(&path)?)
        } else {
            single_file_candidate(&path)?
        };

        let mut modules = ModuleSet::new();
        let mut codes = Vec::new();
        for (name, code) in candidates {
            modules.push(name);
            codes.push(code);
        }
        let Some(&version_code) = codes.first() else {
            return Err(Error::new(ErrorKind::NotFound)
                .with_message("no TIGER/Line modules found")
                .with_path(&path)
                .with_hint(
                    "Expected one or more <module>.RT1 files whose records start with '1'.",
                ));
        };

        let detected = TigerVersion::classify(version_code);
        let detected = match modules.get(0) {
            Some(first) => refine_version(&dir, first, detected),
            None => detected,
        };
        for (name, code) in modules.iter().zip(&codes).skip(1) {
            let module_version = TigerVersion::classify(*code);
            if module_version != TigerVersion::classify(version_code) {
                warn!(
                    module = name,
                    module_version = %module_version,
                    dataset_version = %detected,
                    "module version differs from dataset version"
                );
            }
        }

        let version = match options.version_override {
            Some(forced) => {
                let forced = forced.resolve();
                debug!(detected = %detected, forced = %forced, "version overridden");
                forced
            }
            None => detected,
        };
        if version.is_unknown() {
            warn!(
                code = version_code,
                "unrecognized TIGER version; decoding with the newest layouts"
            );
        }
        debug!(
            path = %path.display(),
            modules = modules.len(),
            version = %version,
            "opened TIGER/Line dataset"
        );

        Ok(Self {
            path,
            dir,
            modules,
            version,
            version_code,
            options,
            layers: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    pub fn version(&self) -> TigerVersion {
        self.version
    }

    /// Raw version code of the first module's first RT1 record.
    pub fn version_code(&self) -> u32 {
        self.version_code
    }

    /// True when the version code matched no known release.
    pub fn version_ambiguous(&self) -> bool {
        self.version.is_unknown()
    }

    pub fn options(&self) -> &OpenOptions {
        &self.options
    }

    pub fn available_layers(&self) -> Vec<LayerKind> {
        LayerKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_available(self.version))
            .collect()
    }

    pub fn layer(&mut self, kind: LayerKind) -> Result<&mut TigerLayer, Error> {
        if !self.layers.contains_key(&kind) {
            let layer = TigerLayer::open(
                kind,
                &self.dir,
                self.modules.iter(),
                self.version,
                self.options.decode_options(),
            )?;
            self.layers.insert(kind, layer);
        }
        self.layers.get_mut(&kind).ok_or_else(|| {
            Error::new(ErrorKind::Internal).with_message("layer missing from cache after open")
        })
    }

    pub fn layer_by_name(&mut self, name: &str) -> Result<&mut TigerLayer, Error> {
        let Some(kind) = LayerKind::from_name(name) else {
            let names: Vec<&str> = self
                .available_layers()
                .into_iter()
                .map(LayerKind::name)
                .collect();
            return Err(Error::new(ErrorKind::NotFound)
                .with_message(format!("no layer named {name}"))
                .with_hint(format!("Available layers: {}.", names.join(", "))));
        };
        self.layer(kind)
    }
}

fn scan_directory(dir: &Path) -> Result<Vec<(String, u32)>, Error> {
    let entries = fs::read_dir(dir).map_err(|err| {
        Error::new(open_error_kind(&err))
            .with_path(dir)
            .with_source(err)
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::new(ErrorKind::Io).with_path(dir).with_source(err))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            debug!(name = ?entry.file_name(), "skipping non-UTF-8 file name");
            continue;
        };
        let Some(module) = module_name(file_name) else {
            continue;
        };
        match probe_rt1(&entry.path()) {
            Ok(Some(code)) => candidates.push((module.to_string(), code)),
            Ok(None) => debug!(file = file_name, "not a TIGER RT1 file; skipping"),
            Err(err) => warn!(file = file_name, error = %err, "unreadable RT1 candidate; skipping"),
        }
    }
    candidates.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(candidates)
}

fn single_file_candidate(path: &Path) -> Result<(PathBuf, Vec<(String, u32)>), Error> {
    let module = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(module_name)
        .ok_or_else(|| {
            Error::new(ErrorKind::Usage)
                .with_message("not a TIGER/Line RT1 file")
                .with_path(path)
                .with_hint("Pass a directory or a file ending in .RT1.")
        })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let candidates = match probe_rt1(path)? {
        Some(code) => vec![(module.to_string(), code)],
        None => {
            debug!(path = %path.display(), "file does not start with an RT1 record");
            Vec::new()
        }
    };
    Ok((dir, candidates))
}

/// `TGR01001.RT1` -> `TGR01001.RT`; `None` for anything not ending in `.RT1`.
fn module_name(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(RT1_SUFFIX.len())?;
    let suffix = file_name.get(split..)?;
    if split == 0 || !suffix.eq_ignore_ascii_case(RT1_SUFFIX) {
        return None;
    }
    file_name.get(..file_name.len() - 1)
}

/// Version code of an RT1 file, or `None` when it does not look like one.
fn probe_rt1(path: &Path) -> Result<Option<u32>, Error> {
    let mut header = [0u8; 5];
    let mut file = File::open(path).map_err(|err| {
        Error::new(open_error_kind(&err))
            .with_path(path)
            .with_source(err)
    })?;
    let mut filled = 0;
    while filled < header.len() {
        let read = file
            .read(&mut header[filled..])
            .map_err(|err| Error::new(ErrorKind::Io).with_path(path).with_source(err))?;
        if read == 0 {
            return Ok(None);
        }
        filled += read;
    }
    if header[0] != b'1' || !header[1..].iter().all(u8::is_ascii_digit) {
        return Ok(None);
    }
    let code = header[1..]
        .iter()
        .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
    Ok(Some(code))
}

fn refine_version(dir: &Path, module: &str, detected: TigerVersion) -> TigerVersion {
    if detected != TigerVersion::Tiger2002 {
        return detected;
    }
    let rtc = module_path(dir, module, RecordType::RtC);
    let mut head = Vec::with_capacity(UA2000_RTC_TERMINATOR_OFFSET + 1);
    let read = File::open(&rtc).and_then(|file| {
        file.take(UA2000_RTC_TERMINATOR_OFFSET as u64 + 1)
            .read_to_end(&mut head)
    });
    if let Err(err) = read {
        debug!(path = %rtc.display(), error = %err, "no RTC file to refine version");
        return detected;
    }
    match head.get(UA2000_RTC_TERMINATOR_OFFSET) {
        Some(b'\r' | b'\n') => {
            debug!(module, "112-byte RTC records; treating dataset as UA 2000");
            TigerVersion::TigerUa2000
        }
        _ => detected,
    }
}
