// ============================================================
// Layer 4 — Tabular Dataset Definitions
// ============================================================
// The delimited-text datasets, described as data.
//
//   adult        census income         ", " separated, no header
//   bank         bank marketing        ";" separated, header, quoted
//   creditcard   credit card default   CSV export of the "Data" sheet
//   dermatology  skin disease          all attributes one-hot
//   diabetes     hospital readmission  everything non-numeric one-hot
//   kddcup       network intrusion     41 typed attributes
//   nursery      nursery admissions    all attributes one-hot
//   skin         skin segmentation     tab separated RGB
//   wbc          breast cancer         id column not used
//
// Unknown values are "?" everywhere; rows with a "?" in a used
// column are dropped by the prepare pipeline before encoding.

use crate::data::datasets::{numbered, ColumnLayout, TabularParser};
use crate::data::loader::DelimitedFormat;
use crate::domain::columns::ColumnSpec;

const NONE: [&str; 0] = [];

pub fn adult() -> TabularParser {
    const ALL: [&str; 15] = [
        "age", "workclass", "fnlwgt", "education", "education-num", "marital-status",
        "occupation", "relationship", "race", "sex", "capital-gain", "capital-loss",
        "hours-per-week", "native-country", "label",
    ];
    let spec = ColumnSpec::new(
        ["age", "fnlwgt", "education-num", "capital-gain", "capital-loss", "hours-per-week"],
        [
            "workclass", "education", "marital-status", "occupation", "relationship", "race",
            "sex", "native-country",
        ],
        "label",
    );
    TabularParser::new("adult", DelimitedFormat::headerless(ALL), ColumnLayout::Explicit(spec))
}

pub fn bank() -> TabularParser {
    let spec = ColumnSpec::new(
        ["age", "balance", "day", "duration", "campaign", "pdays", "previous"],
        [
            "job", "marital", "education", "default", "housing", "loan", "contact", "month",
            "poutcome",
        ],
        "y",
    );
    TabularParser::new(
        "bank",
        DelimitedFormat::csv().with_delimiter(';'),
        ColumnLayout::Explicit(spec),
    )
}

/// The spreadsheet has two header rows (X1..X23,Y then the
/// human-readable names); the export keeps both, so the second
/// is skipped.
pub fn creditcard() -> TabularParser {
    let spec = ColumnSpec::new(numbered("X", 1..=23), NONE, "Y");
    TabularParser::new(
        "creditcard",
        DelimitedFormat::csv().with_skip_rows(1),
        ColumnLayout::Explicit(spec),
    )
}

pub fn dermatology() -> TabularParser {
    let attrs = numbered("a", 1..=34);
    let mut names = attrs.clone();
    names.push("class".to_string());
    let spec = ColumnSpec::new(Vec::<String>::new(), attrs, "class");
    TabularParser::new("dermatology", DelimitedFormat::headerless(names), ColumnLayout::Explicit(spec))
}

pub fn diabetes() -> TabularParser {
    let layout = ColumnLayout::NumericThenRest {
        numeric: [
            "time_in_hospital", "num_procedures", "num_lab_procedures", "num_medications",
            "number_outpatient", "number_emergency", "number_inpatient", "number_diagnoses",
        ]
        .map(String::from)
        .to_vec(),
        label: "readmitted".to_string(),
    };
    TabularParser::new("diabetes", DelimitedFormat::csv(), layout).ignoring(&[
        "encounter_id",
        "patient_nbr",
        "payer_code",
        "medical_specialty",
        "weight",
        "race",
    ])
}

/// (name, is_symbolic) for the 41 connection attributes
const KDD_ATTRIBUTES: [(&str, bool); 41] = [
    ("duration", false), ("protocol_type", true), ("service", true), ("flag", true),
    ("src_bytes", false), ("dst_bytes", false), ("land", true), ("wrong_fragment", false),
    ("urgent", false), ("hot", false), ("num_failed_logins", false), ("logged_in", true),
    ("num_compromised", false), ("root_shell", false), ("su_attempted", false),
    ("num_root", false), ("num_file_creations", false), ("num_shells", false),
    ("num_access_files", false), ("num_outbound_cmds", false), ("is_host_login", true),
    ("is_guest_login", true), ("count", false), ("srv_count", false), ("serror_rate", false),
    ("srv_serror_rate", false), ("rerror_rate", false), ("srv_rerror_rate", false),
    ("same_srv_rate", false), ("diff_srv_rate", false), ("srv_diff_host_rate", false),
    ("dst_host_count", false), ("dst_host_srv_count", false),
    ("dst_host_same_srv_rate", false), ("dst_host_diff_srv_rate", false),
    ("dst_host_same_src_port_rate", false), ("dst_host_srv_diff_host_rate", false),
    ("dst_host_serror_rate", false), ("dst_host_srv_serror_rate", false),
    ("dst_host_rerror_rate", false), ("dst_host_srv_rerror_rate", false),
];

pub fn kddcup() -> TabularParser {
    let numeric = KDD_ATTRIBUTES.iter().filter(|(_, sym)| !sym).map(|(n, _)| *n);
    let symbolic = KDD_ATTRIBUTES.iter().filter(|(_, sym)| *sym).map(|(n, _)| *n);
    let names = KDD_ATTRIBUTES.iter().map(|(n, _)| *n).chain(["label"]);

    TabularParser::new(
        "kddcup",
        DelimitedFormat::headerless(names),
        ColumnLayout::Explicit(ColumnSpec::new(numeric, symbolic, "label")),
    )
}

pub fn nursery() -> TabularParser {
    const ATTRS: [&str; 8] =
        ["parents", "has_nurs", "form", "children", "housing", "finance", "social", "health"];
    let names = ATTRS.iter().copied().chain(["class"]);
    TabularParser::new(
        "nursery",
        DelimitedFormat::headerless(names),
        ColumnLayout::Explicit(ColumnSpec::new(NONE, ATTRS, "class")),
    )
}

pub fn skin() -> TabularParser {
    TabularParser::new(
        "skin",
        DelimitedFormat::headerless(["b", "g", "r", "class"]).with_delimiter('\t'),
        ColumnLayout::AllNumeric { label: "class".to_string() },
    )
}

pub fn wbc() -> TabularParser {
    const FEATURES: [&str; 9] = [
        "clump_thickness", "cell_size_uniformity", "cell_shape_uniformity", "marginal_adhesion",
        "epithelial_cell_size", "bare_nuclei", "bland_chromatin", "normal_nucleoli", "mitoses",
    ];
    let names = ["id"].into_iter().chain(FEATURES).chain(["class"]);
    TabularParser::new(
        "wbc",
        DelimitedFormat::headerless(names),
        ColumnLayout::Explicit(ColumnSpec::new(FEATURES, NONE, "class")),
    )
}
