//! Wire names of the raw customer attributes.
//!
//! These names are shared with the training data and the model artifacts, so
//! they are kept verbatim.

/// Reference date of the snapshot
pub const REFERENCE_DATE: &str = "fecha_dato";
/// Customer identifier
pub const CUSTOMER_ID: &str = "ncodpers";
pub const AGE: &str = "age";
/// Contract start date
pub const CONTRACT_START: &str = "fecha_alta";
/// Customer tenure in months
pub const TENURE: &str = "antiguedad";
/// Last date as primary customer
pub const CONTRACT_END: &str = "ult_fec_cli_1t";
/// Customer type at the start of the month ("P" = potential)
pub const RELATION_INDICATOR: &str = "indrel_1mes";
/// Gross household income
pub const INCOME: &str = "renta";
/// Product column added by candidate expansion
pub const PRODUCT_NAME: &str = "product_name";

/// Categorical attributes carried from the snapshot to the encoder.
pub const SNAPSHOT_CATEGORICALS: [&str; 10] = [
    "sexo",
    "ind_nuevo",
    "indrel",
    "tiprel_1mes",
    "indext",
    "canal_entrada",
    "cod_prov",
    "nomprov",
    "ind_actividad_cliente",
    "segmento",
];

/// Attributes dominated by a single value; removed during correction.
pub const DROPPED_ATTRIBUTES: [&str; 7] = [
    "ind_empleado",
    "pais_residencia",
    RELATION_INDICATOR,
    "indresi",
    "conyuemp",
    "indfall",
    "tipodom",
];

/// Corrupt tenure value found in the source extracts
pub const TENURE_SENTINEL: f64 = -999999.0;

/// Numeric code that replaces the "P" relation indicator
pub const RELATION_POTENTIAL_CODE: f64 = 99.0;

/// Textual missing-value marker used by the source extracts
pub const NA_TOKEN: &str = "NA";
