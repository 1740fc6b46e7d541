//! Parses `.npy` bytes into unnamed column series.

use npyz::{DType, NpyFile, Order};
use polars::prelude::{NamedFrom, Series};

use crate::error::FormatProblem;

/// A 2-D array split into one series per column.
///
/// Series are named `column_<index>` until a format specification names them.
#[derive(Debug, Clone)]
pub struct RawArray {
    pub rows: usize,
    pub columns: Vec<Series>,
}

impl RawArray {
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Parses a complete `.npy` file held in memory.
pub fn parse_array(bytes: &[u8]) -> Result<RawArray, FormatProblem> {
    let npy = NpyFile::new(bytes).map_err(malformed)?;

    let shape = npy.shape().to_vec();
    if shape.len() != 2 {
        return Err(FormatProblem::Dimensions {
            dimensions: shape.len(),
        });
    }
    let layout = Layout {
        rows: to_usize(shape[0])?,
        cols: to_usize(shape[1])?,
        order: npy.order(),
    };

    let dtype = match npy.dtype() {
        DType::Plain(type_str) => type_str.to_string(),
        other => {
            return Err(FormatProblem::UnsupportedDtype {
                dtype: format!("{other:?}"),
            });
        }
    };

    // Strip the byte-order marker; npyz handles either endianness.
    let code = dtype.trim_start_matches(['<', '>', '=', '|']).to_string();
    let columns = match code.as_str() {
        "f8" => layout.split(npy.into_vec::<f64>().map_err(malformed)?),
        "f4" => layout.split(npy.into_vec::<f32>().map_err(malformed)?),
        "i8" => layout.split(npy.into_vec::<i64>().map_err(malformed)?),
        "i4" => layout.split(npy.into_vec::<i32>().map_err(malformed)?),
        "i2" => layout.split(npy.into_vec::<i16>().map_err(malformed)?),
        "i1" => layout.split(npy.into_vec::<i8>().map_err(malformed)?),
        "u8" => layout.split(npy.into_vec::<u64>().map_err(malformed)?),
        "u4" => layout.split(npy.into_vec::<u32>().map_err(malformed)?),
        "u2" => layout.split(npy.into_vec::<u16>().map_err(malformed)?),
        "u1" => layout.split(npy.into_vec::<u8>().map_err(malformed)?),
        _ => return Err(FormatProblem::UnsupportedDtype { dtype }),
    };

    Ok(RawArray {
        rows: layout.rows,
        columns,
    })
}

struct Layout {
    rows: usize,
    cols: usize,
    order: Order,
}

impl Layout {
    fn offset(&self, row: usize, col: usize) -> usize {
        match self.order {
            Order::C => row * self.cols + col,
            Order::Fortran => col * self.rows + row,
        }
    }

    fn split<T>(&self, data: Vec<T>) -> Vec<Series>
    where
        T: Copy,
        Series: NamedFrom<Vec<T>, [T]>,
    {
        (0..self.cols)
            .map(|col| {
                let values: Vec<T> = (0..self.rows)
                    .map(|row| data[self.offset(row, col)])
                    .collect();
                Series::new(format!("column_{col}").into(), values)
            })
            .collect()
    }
}

fn to_usize(dim: u64) -> Result<usize, FormatProblem> {
    usize::try_from(dim).map_err(|_| FormatProblem::Malformed {
        message: format!("dimension {dim} does not fit in memory"),
    })
}

fn malformed(err: std::io::Error) -> FormatProblem {
    FormatProblem::Malformed {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npyz::WriterBuilder;

    fn npy_bytes(shape: &[u64], order: Order, values: &[f64]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut writer = npyz::WriteOptions::<f64>::new()
            .default_dtype()
            .shape(shape)
            .order(order)
            .writer(&mut buffer)
            .begin_nd()
            .unwrap();
        writer.extend(values.iter().copied()).unwrap();
        writer.finish().unwrap();
        buffer
    }

    #[test]
    fn test_parse_c_order() {
        let bytes = npy_bytes(&[2, 3], Order::C, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let array = parse_array(&bytes).unwrap();

        assert_eq!(array.rows, 2);
        assert_eq!(array.width(), 3);
        let second: Vec<Option<f64>> = array.columns[1].f64().unwrap().into_iter().collect();
        assert_eq!(second, vec![Some(2.0), Some(5.0)]);
    }

    #[test]
    fn test_parse_fortran_order() {
        let bytes = npy_bytes(&[2, 3], Order::Fortran, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        let array = parse_array(&bytes).unwrap();

        let second: Vec<Option<f64>> = array.columns[1].f64().unwrap().into_iter().collect();
        assert_eq!(second, vec![Some(2.0), Some(5.0)]);
    }

    #[test]
    fn test_one_dimensional_array_is_rejected() {
        let bytes = npy_bytes(&[3], Order::C, &[1.0, 2.0, 3.0]);
        let result = parse_array(&bytes);

        assert!(matches!(
            result,
            Err(FormatProblem::Dimensions { dimensions: 1 })
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let result = parse_array(b"definitely not numpy");
        assert!(matches!(result, Err(FormatProblem::Malformed { .. })));
    }
}
