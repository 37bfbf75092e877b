use std::error::Error;

use csv::Reader;
use num_enum::TryFromPrimitive;

/// Columns of `android_rotation_vectors.csv`: the rotation vector followed by the
/// expected canonical orientation, quaternion and row-major matrix.
#[repr(usize)]
#[derive(Debug, Clone, Copy, TryFromPrimitive)]
pub enum RotationFixtureColumn {
    X,
    Y,
    Z,
    W,
    Orientation0,
    Orientation1,
    Orientation2,
    Qx,
    Qy,
    Qz,
    Qw,
    M11,
    M12,
    M13,
    M21,
    M22,
    M23,
    M31,
    M32,
    M33,
}

impl From<RotationFixtureColumn> for usize {
    fn from(value: RotationFixtureColumn) -> Self {
        value as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    fn add_range(&mut self, first: RotationFixtureColumn, count: usize) -> &mut Self {
        let first = usize::from(first);
        self.columns.extend(first..first + count);
        self
    }

    pub fn add_rotation_vector(&mut self) -> &mut Self {
        self.add_range(RotationFixtureColumn::X, 4)
    }

    pub fn add_orientation(&mut self) -> &mut Self {
        self.add_range(RotationFixtureColumn::Orientation0, 3)
    }

    pub fn add_quaternion(&mut self) -> &mut Self {
        self.add_range(RotationFixtureColumn::Qx, 4)
    }

    pub fn add_rotation_matrix(&mut self) -> &mut Self {
        self.add_range(RotationFixtureColumn::M11, 9)
    }
}

pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    data.into_iter()
        .map(|row| -> Result<T, Box<dyn Error>> {
            let values = columns
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()?;
            T::try_from(values).map_err(|_| "Failed to convert to T".into())
        })
        .collect()
}
