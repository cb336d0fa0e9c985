//! Readers for constellation, mapping and parity files.
//!
//! All three formats are plain whitespace-separated integers:
//!
//! - constellation: `x y` pairs, any number per line;
//! - mappings: one mapping of `q` point indices per line;
//! - parities: one parity of `n` exponents per line.
//!
//! In mapping and parity files, blank lines and lines starting with `#`
//! are skipped.

use std::io::BufRead;
use std::str::FromStr;

use crate::constellation::{Constellation, Mapping, Point};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::parity::Parity;

fn parse<T: FromStr>(token: &str, line: usize, what: &'static str) -> Result<T> {
    token.parse().map_err(|_| Error::Malformed {
        line,
        what,
        token: token.to_owned(),
    })
}

/// Reads a constellation.
///
/// # Errors
///
/// [`Error::Malformed`] for a non-integer token or a trailing unpaired
/// coordinate, [`Error::ConstellationSize`] unless the point count is a
/// power of two between 2 and 1024, [`Error::Io`] if reading fails.
pub fn read_constellation<R: BufRead>(reader: R) -> Result<Constellation> {
    let mut points = Vec::new();
    let mut pending: Option<(i32, usize, String)> = None;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        for token in line.split_whitespace() {
            let value: i32 = parse(token, number, "point coordinate")?;
            match pending.take() {
                Some((x, _, _)) => points.push(Point::new(x, value)),
                None => pending = Some((value, number, token.to_owned())),
            }
        }
    }
    if let Some((_, line, token)) = pending {
        return Err(Error::Malformed {
            line,
            what: "point (missing y coordinate)",
            token,
        });
    }
    Constellation::new(points)
}

/// Non-comment lines of a text stream with their 1-based numbers.
#[derive(Debug)]
struct Records<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Next record as `(line, text)`, or `None` at end of input.
    fn next_record(&mut self) -> Option<Result<(usize, &str)>> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }
            let text = self.buf.trim();
            if !text.is_empty() && !text.starts_with('#') {
                break;
            }
        }
        Some(Ok((self.line, self.buf.trim())))
    }
}

/// Stream of mappings for a field of `size` elements, one per line.
#[derive(Debug)]
pub struct MappingReader<R> {
    records: Records<R>,
    size: usize,
}

impl<R: BufRead> MappingReader<R> {
    /// Mappings of `size` entries read from `reader`.
    pub fn new(reader: R, size: usize) -> Self {
        Self {
            records: Records::new(reader),
            size,
        }
    }
}

impl<R: BufRead> Iterator for MappingReader<R> {
    type Item = Result<Mapping>;

    fn next(&mut self) -> Option<Result<Mapping>> {
        let size = self.size;
        let (line, text) = match self.records.next_record()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };
        let values: Result<Vec<usize>> = text
            .split_whitespace()
            .map(|t| parse(t, line, "mapping value"))
            .collect();
        Some(
            values
                .and_then(|v| Mapping::new(v, size))
                .map_err(|e| e.at_line(line)),
        )
    }
}

/// Stream of parities of length `length`, one per line, brought to
/// canonical form as they are read.
#[derive(Debug)]
pub struct ParityReader<'a, R> {
    records: Records<R>,
    field: &'a Field,
    length: usize,
}

impl<'a, R: BufRead> ParityReader<'a, R> {
    /// Parities of `length` exponents over `field` read from `reader`.
    pub fn new(reader: R, field: &'a Field, length: usize) -> Self {
        Self {
            records: Records::new(reader),
            field,
            length,
        }
    }
}

impl<R: BufRead> Iterator for ParityReader<'_, R> {
    type Item = Result<Parity>;

    fn next(&mut self) -> Option<Result<Parity>> {
        let (field, length) = (self.field, self.length);
        let (line, text) = match self.records.next_record()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };
        let exponents: Result<Vec<u32>> = text
            .split_whitespace()
            .map(|t| parse(t, line, "parity exponent"))
            .collect();
        let parity = exponents.and_then(|h| {
            if h.len() != length {
                return Err(Error::ParityLength {
                    expected: length,
                    found: h.len(),
                });
            }
            Parity::canonical(h, field)
        });
        Some(parity.map_err(|e| e.at_line(line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constellation_pairs_span_lines() {
        let c = read_constellation("-1 -1  1 -1\n-1\n1\n 1 1\n".as_bytes()).unwrap();
        assert_eq!(
            c.points(),
            &[
                Point::new(-1, -1),
                Point::new(1, -1),
                Point::new(-1, 1),
                Point::new(1, 1)
            ]
        );
    }

    #[test]
    fn constellation_errors() {
        assert!(matches!(
            read_constellation("0 0\n1 x\n".as_bytes()),
            Err(Error::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            read_constellation("0 0 1 1\n2\n".as_bytes()),
            Err(Error::Malformed { line: 2, token, .. }) if token == "2"
        ));
        assert!(matches!(
            read_constellation("0 0 1 1 2 2\n".as_bytes()),
            Err(Error::ConstellationSize { count: 3 })
        ));
        assert!(matches!(
            read_constellation("".as_bytes()),
            Err(Error::ConstellationSize { count: 0 })
        ));
    }

    #[test]
    fn mappings_one_per_line() {
        let text = "# identity\n0 1 2 3\n\n3 2 1 0\n";
        let maps: Vec<_> = MappingReader::new(text.as_bytes(), 4)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[1].as_slice(), &[3, 2, 1, 0]);
    }

    #[test]
    fn mapping_errors_carry_line_numbers() {
        let mut r = MappingReader::new("0 1 2 3\n0 1 2\n0 1 2 9\n0 1 a 3\n".as_bytes(), 4);
        assert!(r.next().unwrap().is_ok());
        let e = r.next().unwrap().unwrap_err();
        assert_eq!(e.to_string(), "line 2: incomplete mapping: expected 4 values, found 3");
        assert!(matches!(
            r.next().unwrap(),
            Err(Error::AtLine { line: 3, .. })
        ));
        assert!(matches!(
            r.next().unwrap(),
            Err(Error::Malformed { line: 4, .. })
        ));
        assert!(r.next().is_none());
    }

    #[test]
    fn parities_are_canonicalized() {
        let f = Field::with_degree(3).unwrap();
        let text = "2 5 3\n# skipped\n 0 0 0 \n";
        let hs: Vec<_> = ParityReader::new(text.as_bytes(), &f, 3)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(hs[0].exponents(), &[3, 1, 0]);
        assert_eq!(hs[1].exponents(), &[0, 0, 0]);
    }

    #[test]
    fn parity_length_is_checked() {
        let f = Field::with_degree(3).unwrap();
        let mut r = ParityReader::new("1 0\n".as_bytes(), &f, 3);
        assert!(matches!(
            r.next(),
            Some(Err(Error::AtLine { line: 1, source }))
                if matches!(*source, Error::ParityLength { expected: 3, found: 2 })
        ));
    }
}
