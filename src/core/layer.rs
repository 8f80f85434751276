//! Purpose: Present one TIGER record type across all modules as a feature layer.
//! Exports: `LayerKind`, `TigerLayer`, `Feature`, `FieldDefn`, `Capability`, `ModuleSummary`.
//! Role: Ties schema lookup, module files, companions and the layer index together.
//! Invariants: Feature ids are dense over `[0, feature_count())` in module order.
//! Invariants: Every feature carries `MODULE` as its first field.
//! Invariants: Modules without the primary file contribute zero features.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::core::compose::{self, Companion, CompanionSpec, Contribution, Join, Requirement};
use crate::core::decode::{self, DecodeOptions, DecodedRecord, Geometry, Point, Value};
use crate::core::error::{Error, ErrorKind};
use crate::core::field::{CoordinateColumns, FieldDescriptor, RecordSchema, ValueType};
use crate::core::index::{LayerIndex, ReadCursor};
use crate::core::module_file::ModuleFile;
use crate::core::schema::{
    self, RT1_FROM_POINT, RT1_TO_POINT, RT2_SHAPE_POINTS, RT7_POINT, RTP_POINT, RTU_POINT,
    RecordType,
};
use crate::core::version::TigerVersion;

pub const MODULE_FIELD: &str = "MODULE";
const FEAT_LIST_FIELD: &str = "FEAT";
const FEAT_MEMBERS: [&str; 5] = ["FEAT1", "FEAT2", "FEAT3", "FEAT4", "FEAT5"];

const SHAPE_POINTS: CompanionSpec = CompanionSpec {
    record_type: RecordType::Rt2,
    join: Join::Key {
        primary: "TLID",
        companion: "TLID",
    },
    requirement: Requirement::Optional,
    contribution: Contribution::Points(&RT2_SHAPE_POINTS),
};

const CHAIN_EXTRAS: CompanionSpec = CompanionSpec {
    record_type: RecordType::Rt3,
    join: Join::RecordIndex,
    requirement: Requirement::Required,
    contribution: Contribution::Fields,
};

const POLYGON_EXTRAS: CompanionSpec = CompanionSpec {
    record_type: RecordType::RtS,
    join: Join::RecordIndex,
    requirement: Requirement::Optional,
    contribution: Contribution::Fields,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LayerKind {
    CompleteChain,
    AltName,
    FeatureIds,
    ZipCodes,
    Landmarks,
    AreaLandmarks,
    KeyFeatures,
    Polygon,
    PolygonCorrections,
    EntityNames,
    PolygonEconomic,
    IdHistory,
    PolyChainLink,
    SpatialMetadata,
    Pip,
    TlidRange,
    ZeroCellId,
    OverUnder,
    ZipPlus4,
}

impl LayerKind {
    pub const ALL: [LayerKind; 19] = [
        LayerKind::CompleteChain,
        LayerKind::AltName,
        LayerKind::FeatureIds,
        LayerKind::ZipCodes,
        LayerKind::Landmarks,
        LayerKind::AreaLandmarks,
        LayerKind::KeyFeatures,
        LayerKind::Polygon,
        LayerKind::PolygonCorrections,
        LayerKind::EntityNames,
        LayerKind::PolygonEconomic,
        LayerKind::IdHistory,
        LayerKind::PolyChainLink,
        LayerKind::SpatialMetadata,
        LayerKind::Pip,
        LayerKind::TlidRange,
        LayerKind::ZeroCellId,
        LayerKind::OverUnder,
        LayerKind::ZipPlus4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::CompleteChain => "CompleteChain",
            LayerKind::AltName => "AltName",
            LayerKind::FeatureIds => "FeatureIds",
            LayerKind::ZipCodes => "ZipCodes",
            LayerKind::Landmarks => "Landmarks",
            LayerKind::AreaLandmarks => "AreaLandmarks",
            LayerKind::KeyFeatures => "KeyFeatures",
            LayerKind::Polygon => "Polygon",
            LayerKind::PolygonCorrections => "PolygonCorrections",
            LayerKind::EntityNames => "EntityNames",
            LayerKind::PolygonEconomic => "PolygonEconomic",
            LayerKind::IdHistory => "IDHistory",
            LayerKind::PolyChainLink => "PolyChainLink",
            LayerKind::SpatialMetadata => "SpatialMetadata",
            LayerKind::Pip => "PIP",
            LayerKind::TlidRange => "TLIDRange",
            LayerKind::ZeroCellId => "ZeroCellID",
            LayerKind::OverUnder => "OverUnder",
            LayerKind::ZipPlus4 => "ZipPlus4",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn primary(self) -> RecordType {
        match self {
            LayerKind::CompleteChain => RecordType::Rt1,
            LayerKind::AltName => RecordType::Rt4,
            LayerKind::FeatureIds => RecordType::Rt5,
            LayerKind::ZipCodes => RecordType::Rt6,
            LayerKind::Landmarks => RecordType::Rt7,
            LayerKind::AreaLandmarks => RecordType::Rt8,
            LayerKind::KeyFeatures => RecordType::Rt9,
            LayerKind::Polygon => RecordType::RtA,
            LayerKind::PolygonCorrections => RecordType::RtB,
            LayerKind::EntityNames => RecordType::RtC,
            LayerKind::PolygonEconomic => RecordType::RtE,
            LayerKind::IdHistory => RecordType::RtH,
            LayerKind::PolyChainLink => RecordType::RtI,
            LayerKind::SpatialMetadata => RecordType::RtM,
            LayerKind::Pip => RecordType::RtP,
            LayerKind::TlidRange => RecordType::RtR,
            LayerKind::ZeroCellId => RecordType::RtT,
            LayerKind::OverUnder => RecordType::RtU,
            LayerKind::ZipPlus4 => RecordType::RtZ,
        }
    }

    /// Companion files joined to the primary record for `version`.
    pub fn companions(self, version: TigerVersion) -> Vec<CompanionSpec> {
        let version = version.schema_version();
        match self {
            LayerKind::CompleteChain if version < TigerVersion::Tiger2002 => {
                vec![CHAIN_EXTRAS, SHAPE_POINTS]
            }
            LayerKind::CompleteChain => vec![SHAPE_POINTS],
            LayerKind::Polygon if version >= TigerVersion::Tiger2000Redistricting => {
                vec![POLYGON_EXTRAS]
            }
            _ => Vec::new(),
        }
    }

    pub fn point_columns(self) -> Option<CoordinateColumns> {
        match self {
            LayerKind::Landmarks => Some(RT7_POINT),
            LayerKind::Pip => Some(RTP_POINT),
            LayerKind::OverUnder => Some(RTU_POINT),
            _ => None,
        }
    }

    pub fn is_available(self, version: TigerVersion) -> bool {
        schema::lookup(self.primary(), version).is_ok()
    }

    fn geometry(self, raw: &[u8], shape: Vec<Point>) -> Option<Geometry> {
        if self == LayerKind::CompleteChain {
            let mut points = Vec::with_capacity(shape.len() + 2);
            points.extend(decode::decode_point(raw, &RT1_FROM_POINT));
            points.extend(shape);
            points.extend(decode::decode_point(raw, &RT1_TO_POINT));
            return (!points.is_empty()).then_some(Geometry::LineString(points));
        }
        self.point_columns()
            .and_then(|columns| decode::decode_point(raw, &columns))
            .map(Geometry::Point)
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    RandomRead,
    FastFeatureCount,
    SequentialWrite,
    RandomWrite,
    FastSpatialFilter,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::RandomRead,
        Capability::FastFeatureCount,
        Capability::SequentialWrite,
        Capability::RandomWrite,
        Capability::FastSpatialFilter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Capability::RandomRead => "RandomRead",
            Capability::FastFeatureCount => "FastFeatureCount",
            Capability::SequentialWrite => "SequentialWrite",
            Capability::RandomWrite => "RandomWrite",
            Capability::FastSpatialFilter => "FastSpatialFilter",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FieldDefn {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Feature {
    pub fid: u64,
    pub fields: DecodedRecord,
    pub geometry: Option<Geometry>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub module: String,
    pub record_type: String,
    pub present: bool,
    pub record_count: u64,
    pub record_length: Option<u64>,
    pub trailing_bytes: u64,
}

#[derive(Debug)]
struct LayerModule {
    name: String,
    primary: Option<ModuleFile>,
    companions: Vec<Companion>,
}

#[derive(Debug)]
pub struct TigerLayer {
    kind: LayerKind,
    version: TigerVersion,
    schema: &'static RecordSchema,
    options: DecodeOptions,
    fields: Vec<FieldDefn>,
    modules: Vec<LayerModule>,
    index: LayerIndex,
    cursor: ReadCursor,
}

impl TigerLayer {
    pub fn open<'a>(
        kind: LayerKind,
        dir: &Path,
        modules: impl IntoIterator<Item = &'a str>,
        version: TigerVersion,
        options: DecodeOptions,
    ) -> Result<Self, Error> {
        let schema = schema::lookup(kind.primary(), version)?;
        let specs = kind.companions(version);
        let fields = field_defns(kind, schema, &specs, version, options)?;

        let mut index = LayerIndex::new();
        let mut layer_modules = Vec::new();
        for name in modules {
            let module = open_module(dir, name, kind, &specs, version)?;
            index.push_module(
                module
                    .primary
                    .as_ref()
                    .map_or(0, |file| file.record_count()),
            );
            layer_modules.push(module);
        }
        index.rebuild();
        debug!(
            layer = kind.name(),
            modules = layer_modules.len(),
            features = index.total_feature_count(),
            "opened layer"
        );

        Ok(Self {
            kind,
            version,
            schema,
            options,
            fields,
            modules: layer_modules,
            index,
            cursor: ReadCursor::new(),
        })
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn version(&self) -> TigerVersion {
        self.version
    }

    pub fn fields(&self) -> &[FieldDefn] {
        &self.fields
    }

    pub fn feature_count(&self) -> u64 {
        self.index.total_feature_count()
    }

    pub fn test_capability(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::RandomRead | Capability::FastFeatureCount
        )
    }

    pub fn modules(&self) -> Vec<ModuleSummary> {
        self.modules
            .iter()
            .map(|module| ModuleSummary {
                module: module.name.clone(),
                record_type: self.kind.primary().to_string(),
                present: module.primary.is_some(),
                record_count: module.primary.as_ref().map_or(0, ModuleFile::record_count),
                record_length: module.primary.as_ref().map(ModuleFile::record_length),
                trailing_bytes: module.primary.as_ref().map_or(0, ModuleFile::trailing_bytes),
            })
            .collect()
    }

    pub fn feature(&mut self, fid: u64) -> Result<Feature, Error> {
        let (module, local) = self.index.global_to_local(fid)?;
        self.read_feature(module, local, fid)
    }

    /// Next feature in module order; `Ok(None)` once every module is exhausted.
    pub fn next_feature(&mut self) -> Result<Option<Feature>, Error> {
        let Some((module, local)) = self.cursor.advance(&self.index) else {
            return Ok(None);
        };
        let fid = self.index.local_to_global(module, local)?;
        self.read_feature(module, local, fid).map(Some)
    }

    pub fn reset_reading(&mut self) {
        self.cursor.reset();
    }

    fn read_feature(&mut self, module: usize, local: u64, fid: u64) -> Result<Feature, Error> {
        let kind = self.kind;
        let schema = self.schema;
        let options = self.options;
        let entry = self.modules.get_mut(module).ok_or_else(|| {
            Error::new(ErrorKind::Internal).with_message(format!("no module at index {module}"))
        })?;
        let file = entry.primary.as_mut().ok_or_else(|| {
            Error::new(ErrorKind::Internal)
                .with_message("feature resolved to a module without a primary file")
                .with_module(&entry.name)
        })?;

        let raw = file
            .read_record(local)
            .map_err(|err| err.with_module(&entry.name))?;
        let record = decode::decode(raw.as_bytes(), schema, options)?;
        let composite = compose::compose(record, local, &mut entry.companions, options)
            .map_err(|err| err.with_module(&entry.name))?;

        let geometry = kind.geometry(raw.as_bytes(), composite.shape);
        let mut fields = composite.fields;
        fields.push(MODULE_FIELD, Value::String(module_label(&entry.name).to_string()));
        if kind == LayerKind::AltName {
            let feats: Vec<i64> = FEAT_MEMBERS
                .iter()
                .filter_map(|name| fields.get(name).and_then(Value::as_i64))
                .filter(|feat| *feat != 0)
                .collect();
            fields.push(FEAT_LIST_FIELD, Value::IntegerList(feats));
        }
        fields.conform(self.fields.iter().map(|defn| (defn.name, defn.value_type)));

        Ok(Feature {
            fid,
            fields,
            geometry,
        })
    }
}

fn open_module(
    dir: &Path,
    name: &str,
    kind: LayerKind,
    specs: &[CompanionSpec],
    version: TigerVersion,
) -> Result<LayerModule, Error> {
    let primary = match ModuleFile::open(dir, name, kind.primary(), version) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(module = name, layer = kind.name(), "module has no file for layer");
            return Ok(LayerModule {
                name: name.to_string(),
                primary: None,
                companions: Vec::new(),
            });
        }
        Err(err) => return Err(err),
    };

    let mut companions = Vec::with_capacity(specs.len());
    for spec in specs {
        if let Some(companion) = Companion::open(dir, name, *spec, version)? {
            companions.push(companion);
        }
    }
    Ok(LayerModule {
        name: name.to_string(),
        primary: Some(primary),
        companions,
    })
}

fn field_defns(
    kind: LayerKind,
    schema: &'static RecordSchema,
    specs: &[CompanionSpec],
    version: TigerVersion,
    options: DecodeOptions,
) -> Result<Vec<FieldDefn>, Error> {
    let mut defns = vec![FieldDefn {
        name: MODULE_FIELD,
        value_type: ValueType::String,
        width: Some(8),
    }];
    add_fields(&mut defns, schema.defined_fields(), options);
    for spec in specs {
        if spec.contribution == Contribution::Fields {
            let companion = schema::lookup(spec.record_type, version)?;
            add_fields(&mut defns, companion.defined_fields(), options);
        }
    }
    if kind == LayerKind::AltName {
        defns.push(FieldDefn {
            name: FEAT_LIST_FIELD,
            value_type: ValueType::IntegerList,
            width: None,
        });
    }
    Ok(defns)
}

fn add_fields<'a>(
    defns: &mut Vec<FieldDefn>,
    fields: impl Iterator<Item = &'a FieldDescriptor>,
    options: DecodeOptions,
) {
    for field in fields {
        if defns.iter().any(|defn| defn.name == field.name) {
            continue;
        }
        defns.push(FieldDefn {
            name: field.name,
            value_type: options.value_type(field),
            width: Some(field.len),
        });
    }
}

/// Module name as reported in `MODULE`: the file stem without its `.RT` tail.
fn module_label(name: &str) -> &str {
    name.strip_suffix(".RT")
        .or_else(|| name.strip_suffix(".rt"))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::{Capability, FieldDefn, LayerKind, TigerLayer, module_label};
    use crate::core::decode::{DecodeOptions, Geometry, Point, Value};
    use crate::core::error::ErrorKind;
    use crate::core::field::ValueType;
    use crate::core::schema::RecordType;
    use crate::core::version::TigerVersion;
    use std::fs;
    use std::path::Path;

    fn rt1_line(code: &str, tlid: u64, name: &str, from: (i64, i64), to: (i64, i64)) -> String {
        let head = format!("1{code}{tlid:>10} A  {name:<30}");
        let mut line = format!("{head:<190}");
        line.push_str(&format!("{:>+10}{:>+9}{:>+10}{:>+9}", from.0, from.1, to.0, to.1));
        assert_eq!(line.len(), 228);
        line
    }

    fn rt2_line(tlid: u64, rtsq: u32, points: &[(i64, i64)]) -> String {
        let mut line = format!("21002{tlid:>10}{rtsq:>3}");
        for i in 0..10 {
            let (x, y) = points.get(i).copied().unwrap_or((0, 0));
            line.push_str(&format!("{x:>+10}{y:>+9}"));
        }
        line
    }

    fn write_lines(dir: &Path, file: &str, lines: &[String]) {
        let mut body = lines.join("\r\n");
        body.push_str("\r\n");
        fs::write(dir.join(file), body).expect("write");
    }

    #[test]
    fn complete_chain_joins_shape_points_between_endpoints() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_lines(
            dir.path(),
            "TGR06075.RT1",
            &[
                rt1_line(
                    "1002",
                    10,
                    "Main",
                    (-122_000_000, 37_000_000),
                    (-122_000_003, 37_000_003),
                ),
                rt1_line("1002", 11, "Oak", (-121_000_000, 36_000_000), (-121_000_001, 36_000_001)),
            ],
        );
        write_lines(
            dir.path(),
            "TGR06075.RT2",
            &[
                rt2_line(10, 1, &[(-122_000_001, 37_000_001)]),
                rt2_line(99, 1, &[(-1_000_000, 1_000_000)]),
                rt2_line(10, 2, &[(-122_000_002, 37_000_002)]),
            ],
        );

        let mut layer = TigerLayer::open(
            LayerKind::CompleteChain,
            dir.path(),
            ["TGR06075.RT"],
            TigerVersion::Tiger2002,
            DecodeOptions::default(),
        )
        .expect("layer");
        assert_eq!(layer.feature_count(), 2);
        assert_eq!(layer.fields()[0].name, "MODULE");

        let feature = layer.feature(0).expect("feature 0");
        assert_eq!(
            feature.fields.get("MODULE").and_then(Value::as_str),
            Some("TGR06075")
        );
        assert_eq!(feature.fields.get("TLID"), Some(&Value::Integer(10)));
        assert_eq!(feature.fields.get("FENAME").and_then(Value::as_str), Some("Main"));
        assert!(feature.fields.get("RTSQ").is_none());
        assert_eq!(
            feature.geometry,
            Some(Geometry::LineString(vec![
                Point { x: -122.0, y: 37.0 },
                Point { x: -122.000001, y: 37.000001 },
                Point { x: -122.000002, y: 37.000002 },
                Point { x: -122.000003, y: 37.000003 },
            ]))
        );

        let feature = layer.feature(1).expect("feature 1");
        let Some(Geometry::LineString(points)) = feature.geometry else {
            panic!("expected line");
        };
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn sequential_reads_span_modules_and_skip_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_lines(
            dir.path(),
            "TGR01001.RT4",
            &[format!("41002{:>10}{:>3}{:>8}{:>8}{:>8}{:>8}{:>8}", 5, 1, 700, 0, 701, 0, 0)],
        );
        write_lines(
            dir.path(),
            "TGR01005.RT4",
            &[
                format!("41002{:>10}{:>3}{:>8}{:>8}{:>8}{:>8}{:>8}", 8, 1, 0, 0, 0, 0, 0),
                format!("41002{:>10}{:>3}{:>8}{:>8}{:>8}{:>8}{:>8}", 9, 1, 12, 0, 0, 0, 0),
            ],
        );

        let mut layer = TigerLayer::open(
            LayerKind::AltName,
            dir.path(),
            ["TGR01001.RT", "TGR01003.RT", "TGR01005.RT"],
            TigerVersion::Tiger2002,
            DecodeOptions::default(),
        )
        .expect("layer");
        assert_eq!(layer.feature_count(), 3);
        let summaries = layer.modules();
        assert!(!summaries[1].present);
        assert_eq!(summaries[2].record_count, 2);

        let mut seen = Vec::new();
        while let Some(feature) = layer.next_feature().expect("next") {
            seen.push(feature);
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].fields.get("FEAT"), Some(&Value::IntegerList(vec![700, 701])));
        assert!(seen[0].fields.get("FEAT1").is_none());
        assert_eq!(seen[1].fields.get("FEAT"), Some(&Value::IntegerList(Vec::new())));
        assert_eq!(
            seen[2].fields.get("MODULE").and_then(Value::as_str),
            Some("TGR01005")
        );
        assert_eq!(seen[2].fid, 2);
        assert!(seen[2].geometry.is_none());
        assert!(layer.next_feature().expect("end").is_none());

        layer.reset_reading();
        assert_eq!(layer.next_feature().expect("again").map(|f| f.fid), Some(0));
    }

    #[test]
    fn pre_2002_chains_require_rt3() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_lines(
            dir.path(),
            "TGR01001.RT1",
            &[rt1_line("1298", 1, "Elm", (-1_000_000, 1_000_000), (-2_000_000, 2_000_000))],
        );
        let err = TigerLayer::open(
            LayerKind::CompleteChain,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger1998,
            DecodeOptions::default(),
        )
        .expect_err("rt3 required");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn field_types_follow_lfield_option() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layer = TigerLayer::open(
            LayerKind::CompleteChain,
            dir.path(),
            std::iter::empty::<&str>(),
            TigerVersion::Tiger2003,
            DecodeOptions {
                lfield_as_string: true,
            },
        )
        .expect("layer");
        let zipl = layer
            .fields()
            .iter()
            .find(|defn| defn.name == "ZIPL")
            .expect("ZIPL");
        assert_eq!(zipl.value_type, ValueType::String);
        let tlid = layer.fields().iter().find(|defn| defn.name == "TLID").expect("TLID");
        assert_eq!(tlid.value_type, ValueType::Integer);
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn capabilities_and_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layer = TigerLayer::open(
            LayerKind::Pip,
            dir.path(),
            std::iter::empty::<&str>(),
            TigerVersion::Tiger2003,
            DecodeOptions::default(),
        )
        .expect("layer");
        assert!(layer.test_capability(Capability::RandomRead));
        assert!(layer.test_capability(Capability::FastFeatureCount));
        assert!(!layer.test_capability(Capability::SequentialWrite));
        assert!(!layer.test_capability(Capability::RandomWrite));
        assert!(!layer.test_capability(Capability::FastSpatialFilter));

        assert_eq!(LayerKind::from_name("idhistory"), Some(LayerKind::IdHistory));
        assert_eq!(LayerKind::from_name("Nope"), None);
        assert!(!LayerKind::Pip.is_available(TigerVersion::Tiger1995));
        assert!(LayerKind::Polygon.companions(TigerVersion::Tiger1999).is_empty());
        assert_eq!(module_label("tgr01001.rt"), "tgr01001");
    }

    fn field_names(fields: &[FieldDefn]) -> Vec<&'static str> {
        fields.iter().map(|defn| defn.name).collect()
    }

    #[test]
    fn polygon_merges_rts_by_record_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rta = |polyid: u64| format!("{:<110}", format!("A100201001CEN01{polyid:>10}06"));
        write_lines(dir.path(), "TGR01001.RTA", &[rta(77), rta(78)]);
        write_lines(
            dir.path(),
            "TGR01001.RTS",
            &[format!("{:<120}", format!("S100201001CEN01{:>10}1", 99))],
        );

        let mut layer = TigerLayer::open(
            LayerKind::Polygon,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger2002,
            DecodeOptions::default(),
        )
        .expect("layer");
        assert_eq!(layer.feature_count(), 2);
        assert!(layer.fields().iter().any(|defn| defn.name == "WATER"));

        let feature = layer.feature(0).expect("feature 0");
        assert_eq!(feature.fields.get("POLYID"), Some(&Value::Integer(77)));
        assert_eq!(feature.fields.get("STATECU"), Some(&Value::Integer(6)));
        assert_eq!(feature.fields.get("WATER"), Some(&Value::Integer(1)));
        assert!(feature.geometry.is_none());

        // no RTS record at index 1
        let feature = layer.feature(1).expect("feature 1");
        assert_eq!(feature.fields.get("POLYID"), Some(&Value::Integer(78)));
        assert_eq!(feature.fields.get("WATER"), Some(&Value::Integer(0)));
        let names: Vec<&str> = feature.fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, field_names(layer.fields()));
    }

    #[test]
    fn point_layers_decode_coordinates_and_skip_zero_pairs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let rtp = |polyid: u64, x: i64, y: i64| {
            format!("P100201001CEN01{polyid:>10}{x:>+10}{y:>+9}0")
        };
        write_lines(dir.path(), "TGR01001.RTP", &[rtp(1, -86_500_000, 32_250_000), rtp(2, 0, 0)]);
        let mut pip = TigerLayer::open(
            LayerKind::Pip,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger2002,
            DecodeOptions::default(),
        )
        .expect("pip layer");
        let feature = pip.feature(0).expect("feature 0");
        assert_eq!(
            feature.geometry,
            Some(Geometry::Point(Point { x: -86.5, y: 32.25 }))
        );
        assert!(feature.fields.get("POLYLONG").is_none());
        assert!(pip.feature(1).expect("feature 1").geometry.is_none());

        let rt7 = |land: u64, x: i64, y: i64| {
            format!("{:<74}", format!("7100201001{land:>10}BD82{:<30}{x:>+10}{y:>+9}", "Park"))
        };
        write_lines(dir.path(), "TGR01001.RT7", &[rt7(5, 0, 0), rt7(6, -87_250_000, 30_500_000)]);
        let mut landmarks = TigerLayer::open(
            LayerKind::Landmarks,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger2002,
            DecodeOptions::default(),
        )
        .expect("landmark layer");
        let feature = landmarks.feature(0).expect("feature 0");
        assert_eq!(feature.fields.get("LANAME").and_then(Value::as_str), Some("Park"));
        assert!(feature.geometry.is_none());
        assert_eq!(
            landmarks.feature(1).expect("feature 1").geometry,
            Some(Geometry::Point(Point { x: -87.25, y: 30.5 }))
        );
    }

    #[test]
    fn missing_companion_records_zero_fill_their_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_lines(
            dir.path(),
            "TGR01001.RT1",
            &[
                rt1_line("1298", 1, "Elm", (-1_000_000, 1_000_000), (-2_000_000, 2_000_000)),
                rt1_line("1298", 2, "Ash", (-3_000_000, 3_000_000), (-4_000_000, 4_000_000)),
            ],
        );
        write_lines(
            dir.path(),
            "TGR01001.RT3",
            &[format!("{:<111}", format!("31298{:>10}06", 1))],
        );

        let mut layer = TigerLayer::open(
            LayerKind::CompleteChain,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger1998,
            DecodeOptions::default(),
        )
        .expect("layer");
        let first = layer.feature(0).expect("feature 0");
        assert_eq!(first.fields.get("STATE90L"), Some(&Value::Integer(6)));

        let second = layer.feature(1).expect("feature 1");
        assert_eq!(second.fields.get("TLID"), Some(&Value::Integer(2)));
        assert_eq!(second.fields.get("STATE90L"), Some(&Value::Integer(0)));
        assert_eq!(second.fields.get("AITSR"), Some(&Value::Integer(0)));
        assert_eq!(second.fields.get("BLK90L"), Some(&Value::String(String::new())));

        let expected = field_names(layer.fields());
        for feature in [&first, &second] {
            let names: Vec<&str> = feature.fields.iter().map(|(name, _)| name).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn polygon_side_tables_exist_from_2002() {
        for kind in [
            LayerKind::PolygonCorrections,
            LayerKind::PolygonEconomic,
            LayerKind::SpatialMetadata,
        ] {
            assert!(!kind.is_available(TigerVersion::Tiger2000Census));
            assert!(kind.is_available(TigerVersion::Tiger2002));
            assert_eq!(LayerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(LayerKind::PolygonCorrections.primary(), RecordType::RtB);
        assert_eq!(LayerKind::PolygonEconomic.primary(), RecordType::RtE);
        assert_eq!(LayerKind::SpatialMetadata.primary(), RecordType::RtM);

        let dir = tempfile::tempdir().expect("tempdir");
        write_lines(
            dir.path(),
            "TGR01001.RTE",
            &[format!("{:<73}", format!("E100201001CEN01{:>10}0600", 12))],
        );
        let mut layer = TigerLayer::open(
            LayerKind::PolygonEconomic,
            dir.path(),
            ["TGR01001.RT"],
            TigerVersion::Tiger2003,
            DecodeOptions::default(),
        )
        .expect("layer");
        let feature = layer.feature(0).expect("feature 0");
        assert_eq!(feature.fields.get("POLYID"), Some(&Value::Integer(12)));
        assert_eq!(feature.fields.get("STATEEC"), Some(&Value::Integer(6)));
        assert_eq!(feature.fields.get("COUNTYEC"), Some(&Value::Integer(0)));
        assert_eq!(
            feature.fields.get("MODULE").and_then(Value::as_str),
            Some("TGR01001")
        );
    }
}
