use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{Penguin, PenguinDataset, Species};

/// The dataset shipped with the binary, in palmerpenguins' CSV layout.
const BUNDLED_CSV: &str = include_str!("../../assets/penguins.csv");

/// Columns every source must provide.
pub const COLUMNS: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse the dataset compiled into the binary.
pub fn load_bundled() -> Result<PenguinDataset> {
    read_csv(BUNDLED_CSV.as_bytes()).context("parsing bundled penguins.csv")
}

/// Load a penguin dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the palmerpenguins columns, `NA` for missing
/// * `.json`    – `[{ "species": "Adelie", "bill_length_mm": 39.1, ... }, ...]`
/// * `.parquet` – flat columns with the same names; nulls for missing
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} penguins from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(source: R) -> Result<PenguinDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(DataError::MissingColumn(missing.to_string()).into());
    }

    let rows = reader
        .deserialize::<Penguin>()
        .enumerate()
        // +2: one for the header, one for 1-based numbering
        .map(|(i, rec)| rec.with_context(|| format!("CSV line {}", i + 2)))
        .collect::<Result<Vec<_>>>()?;

    Ok(PenguinDataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PenguinDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<Penguin> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(PenguinDataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Column types are cast on read, so integer or float32 measurements and
/// dictionary-encoded strings (Pandas categoricals) all work.
fn load_parquet(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        rows.extend(batch_rows(&batch)?);
    }

    Ok(PenguinDataset::from_rows(rows))
}

fn batch_rows(batch: &RecordBatch) -> Result<Vec<Penguin>> {
    let species = column(batch, "species", &DataType::Utf8)?;
    let island = column(batch, "island", &DataType::Utf8)?;
    let sex = column(batch, "sex", &DataType::Utf8)?;
    let measurements = [
        column(batch, "bill_length_mm", &DataType::Float64)?,
        column(batch, "bill_depth_mm", &DataType::Float64)?,
        column(batch, "flipper_length_mm", &DataType::Float64)?,
        column(batch, "body_mass_g", &DataType::Float64)?,
    ];
    let year = column(batch, "year", &DataType::Float64)?;

    let species = species.as_string::<i32>();
    let island = island.as_string::<i32>();
    let sex = sex.as_string::<i32>();
    let [bill_len, bill_depth, flipper, mass] =
        measurements.each_ref().map(|c| c.as_primitive::<Float64Type>());
    let year = year.as_primitive::<Float64Type>();

    let float_at = |arr: &arrow::array::Float64Array, row: usize| {
        (!arr.is_null(row))
            .then(|| arr.value(row))
            .filter(|v| !v.is_nan())
    };

    (0..batch.num_rows())
        .map(|row| {
            let species: Species = if species.is_null(row) {
                anyhow::bail!("Row {row}: species is null");
            } else {
                species
                    .value(row)
                    .parse()
                    .with_context(|| format!("Row {row}"))?
            };
            let year = match float_at(year, row) {
                Some(y) if y.fract() != 0.0 => {
                    anyhow::bail!("Row {row}: year {y} is not a whole number")
                }
                y => y.map(|y| y as i64),
            };
            Ok(Penguin {
                species,
                island: if island.is_null(row) {
                    String::new()
                } else {
                    island.value(row).to_string()
                },
                bill_length_mm: float_at(bill_len, row),
                bill_depth_mm: float_at(bill_depth, row),
                flipper_length_mm: float_at(flipper, row),
                body_mass_g: float_at(mass, row),
                sex: (!sex.is_null(row))
                    .then(|| sex.value(row).to_string())
                    .filter(|s| !s.is_empty() && s != super::model::NA),
                year,
            })
        })
        .collect()
}

/// Look up a column by name and cast it to `to`.
fn column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    cast(batch.column(idx), to).with_context(|| format!("converting column '{name}' to {to}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SMALL_CSV: &str = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Torgersen,39.1,18.7,181,3750,male,2007
Adelie,Torgersen,NA,NA,NA,NA,NA,2007
Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
Chinstrap,Dream,46.5,17.9,192,3500,female,2007
";

    fn write_temp(ext: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn bundled_dataset_has_all_species() {
        let ds = load_bundled().unwrap();
        assert_eq!(ds.len(), 344);
        assert_eq!(ds.count_by_species(Species::Adelie), 152);
        assert_eq!(ds.count_by_species(Species::Gentoo), 124);
        assert_eq!(ds.count_by_species(Species::Chinstrap), 68);
        assert!(ds.rows().iter().any(|p| p.body_mass_g.is_none()));
    }

    #[test]
    fn csv_na_becomes_missing() {
        let file = write_temp("csv", SMALL_CSV.as_bytes());
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 4);
        let first = &ds.rows()[0];
        assert_eq!(first.bill_length_mm, Some(39.1));
        assert_eq!(first.flipper_length_mm, Some(181.0));
        assert_eq!(first.sex.as_deref(), Some("male"));
        let blank = &ds.rows()[1];
        assert_eq!(blank.bill_length_mm, None);
        assert_eq!(blank.body_mass_g, None);
        assert_eq!(blank.sex, None);
        assert_eq!(blank.year, Some(2007));
    }

    #[test]
    fn unknown_species_is_an_error() {
        let csv = SMALL_CSV.replace("Chinstrap", "Emperor");
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Emperor"), "{err:#}");
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "species,island\nAdelie,Dream\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingColumn(c)) if c == "bill_length_mm"
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp("xlsx", b"");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedExtension(e)) if e == "xlsx"
        ));
    }

    #[test]
    fn json_matches_csv() {
        let csv = read_csv(SMALL_CSV.as_bytes()).unwrap();
        let json = serde_json::to_string(csv.rows()).unwrap();
        let file = write_temp("json", json.as_bytes());
        let from_json = load_file(file.path()).unwrap();
        assert_eq!(from_json.rows(), csv.rows());
    }

    #[test]
    fn parquet_matches_csv() {
        let csv = read_csv(SMALL_CSV.as_bytes()).unwrap();
        let rows = csv.rows();

        let strings = |f: fn(&Penguin) -> Option<String>| {
            Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>())) as ArrayRef
        };
        let floats = |f: fn(&Penguin) -> Option<f64>| {
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>())) as ArrayRef
        };

        let schema = Arc::new(Schema::new(vec![
            Field::new("species", DataType::Utf8, false),
            Field::new("island", DataType::Utf8, false),
            Field::new("bill_length_mm", DataType::Float64, true),
            Field::new("bill_depth_mm", DataType::Float64, true),
            Field::new("flipper_length_mm", DataType::Float64, true),
            Field::new("body_mass_g", DataType::Float64, true),
            Field::new("sex", DataType::Utf8, true),
            Field::new("year", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                strings(|p| Some(p.species.to_string())),
                strings(|p| Some(p.island.clone())),
                floats(|p| p.bill_length_mm),
                floats(|p| p.bill_depth_mm),
                floats(|p| p.flipper_length_mm),
                floats(|p| p.body_mass_g),
                strings(|p| p.sex.clone()),
                Arc::new(Int64Array::from(rows.iter().map(|p| p.year).collect::<Vec<_>>())),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let from_parquet = load_file(file.path()).unwrap();
        assert_eq!(from_parquet.rows(), rows);
    }

    #[test]
    fn fractional_parquet_year_is_rejected() {
        let text = |v: &str| Arc::new(StringArray::from(vec![v])) as ArrayRef;
        let num = |v: f64| Arc::new(Float64Array::from(vec![v])) as ArrayRef;
        let batch = RecordBatch::try_from_iter([
            ("species", text("Adelie")),
            ("island", text("Dream")),
            ("bill_length_mm", num(39.1)),
            ("bill_depth_mm", num(18.7)),
            ("flipper_length_mm", num(181.0)),
            ("body_mass_g", num(3750.0)),
            ("sex", text("male")),
            ("year", num(2007.5)),
        ])
        .unwrap();
        let err = batch_rows(&batch).unwrap_err();
        assert!(err.to_string().contains("not a whole number"));
    }
}
