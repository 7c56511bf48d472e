//! CSV ingestion of payroll exports.
//!
//! Expected headers:
//! nome,matricula,cpf,sexo,cargo,cargo_nivel,dataadmissao,datarescisao,datanascimento,tipo_rubrica,codigo_rubrica,valor,ano_calculo,mes_calculo

use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeProfile, PayrollRecord, RubricType};

#[derive(serde::Deserialize)]
struct CsvRow {
    nome: String,
    matricula: String,
    cpf: String,
    sexo: String,
    cargo: String,
    cargo_nivel: String,
    dataadmissao: Option<String>,
    datarescisao: Option<String>,
    datanascimento: Option<String>,
    tipo_rubrica: String,
    codigo_rubrica: String,
    valor: String,
    ano_calculo: String,
    mes_calculo: String,
}

/// The normalized output of one payroll CSV load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPayroll {
    /// The rubric line records, in file order.
    pub records: Vec<PayrollRecord>,
    /// One profile per employee, first occurrence wins.
    pub profiles: Vec<EmployeeProfile>,
}

/// Loads and normalizes a payroll CSV export from a reader.
///
/// Each row yields one [`PayrollRecord`]; employee metadata columns are
/// collected into one [`EmployeeProfile`] per matricula. Rows stay in file
/// order, which later pins the detection grouping order.
///
/// # Errors
///
/// Any field that cannot be coerced fails the load with
/// [`EngineError::MalformedRecord`] carrying the 1-based data-row line
/// number, so no malformed record ever reaches the detectors.
pub fn load_payroll_csv<R: BufRead>(reader: R) -> EngineResult<LoadedPayroll> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    let mut profiles: Vec<EmployeeProfile> = Vec::new();

    for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let line = i + 1;
        let row = row?;

        let rubric_type = parse_rubric_type(&row.tipo_rubrica, line)?;
        let value = row.valor.parse::<Decimal>().map_err(|e| {
            EngineError::MalformedRecord {
                line,
                field: "valor".to_string(),
                message: e.to_string(),
            }
        })?;
        let year = parse_int::<i32>(&row.ano_calculo, "ano_calculo", line)?;
        let month = parse_int::<u32>(&row.mes_calculo, "mes_calculo", line)?;
        if !(1..=12).contains(&month) {
            return Err(EngineError::MalformedRecord {
                line,
                field: "mes_calculo".to_string(),
                message: format!("month {} is outside 1-12", month),
            });
        }

        if !profiles.iter().any(|p| p.employee_id == row.matricula) {
            profiles.push(EmployeeProfile {
                employee_id: row.matricula.clone(),
                name: row.nome.clone(),
                cpf: row.cpf.clone(),
                sex: row.sexo.clone(),
                role: row.cargo.clone(),
                role_level: row.cargo_nivel.clone(),
                admission_date: parse_date(row.dataadmissao.as_deref(), "dataadmissao", line)?,
                termination_date: parse_date(row.datarescisao.as_deref(), "datarescisao", line)?,
                birth_date: parse_date(row.datanascimento.as_deref(), "datanascimento", line)?,
            });
        }

        records.push(PayrollRecord {
            employee_id: row.matricula,
            rubric_code: row.codigo_rubrica,
            rubric_type,
            value,
            year,
            month,
        });
    }

    Ok(LoadedPayroll { records, profiles })
}

/// Loads and normalizes a payroll CSV export from a file path.
pub fn load_payroll_csv_from_path<P: AsRef<Path>>(path: P) -> EngineResult<LoadedPayroll> {
    let file = File::open(path)?;
    load_payroll_csv(BufReader::new(file))
}

fn parse_rubric_type(raw: &str, line: usize) -> EngineResult<RubricType> {
    match raw {
        "BASE" | "base" => Ok(RubricType::Base),
        "RENDIMENTO" | "rendimento" => Ok(RubricType::Income),
        "DESCONTO" | "desconto" => Ok(RubricType::Discount),
        other => Err(EngineError::MalformedRecord {
            line,
            field: "tipo_rubrica".to_string(),
            message: format!("unknown rubric type: {}", other),
        }),
    }
}

fn parse_int<T: std::str::FromStr>(raw: &str, field: &str, line: usize) -> EngineResult<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| EngineError::MalformedRecord {
        line,
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_date(raw: Option<&str>, field: &str, line: usize) -> EngineResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| EngineError::MalformedRecord {
                line,
                field: field.to_string(),
                message: e.to_string(),
            }),
    }
}
