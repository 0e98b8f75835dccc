//! A reference request used by the harness binary, the CLI and benchmarks.

use serde_json::{json, Value};

/// Customer id of the reference request
pub const SAMPLE_CUSTOMER_ID: i64 = 1375586;

/// Raw attributes of the reference customer, exactly as the extracts
/// deliver them (including the attributes dropped during correction).
pub fn reference_record() -> Value {
    json!({
        "fecha_dato": "2016-05-28",
        "ncodpers": SAMPLE_CUSTOMER_ID,
        "ind_empleado": "N",
        "pais_residencia": "ES",
        "sexo": "H",
        "age": 36,
        "fecha_alta": "2015-01-12",
        "ind_nuevo": 0.0,
        "antiguedad": 16,
        "indrel": 1.0,
        "ult_fec_cli_1t": null,
        "indrel_1mes": "1.0",
        "tiprel_1mes": "A",
        "indresi": "S",
        "indext": "N",
        "conyuemp": null,
        "canal_entrada": "KHL",
        "indfall": "N",
        "tipodom": 1.0,
        "cod_prov": 29.0,
        "nomprov": "MALAGA",
        "ind_actividad_cliente": 1.0,
        "renta": 87218.1,
        "segmento": "02 - PARTICULARES",
    })
}

/// Full request envelope around [`reference_record`]
pub fn reference_request() -> Value {
    json!({
        "user_id": SAMPLE_CUSTOMER_ID,
        "model_params": reference_record(),
    })
}
