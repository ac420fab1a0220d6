use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::analyzer::InterpretationRecord;
use crate::sweep::SweepPoint;

pub fn write_records_csv(path: &Path, records: &[InterpretationRecord]) -> io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    writeln!(f, "qubit,p0,p1,x,y,z,purity,pure")?;
    for r in records {
        let [p0, p1] = r.probabilities;
        let [x, y, z] = r.bloch_vector;
        writeln!(
            f,
            "{},{},{},{},{},{},{},{}",
            r.index, p0, p1, x, y, z, r.purity, r.is_pure
        )?;
    }
    f.flush()
}

pub fn write_sweep_csv(path: &Path, points: &[SweepPoint]) -> io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    writeln!(f, "gamma,q0_purity,q0_x,q0_y,q0_z,q1_purity,q1_x,q1_y,q1_z")?;
    for p in points {
        let [a, b] = &p.records;
        writeln!(
            f,
            "{},{},{},{},{},{},{},{},{}",
            p.gamma,
            a.purity,
            a.bloch_vector[0],
            a.bloch_vector[1],
            a.bloch_vector[2],
            b.purity,
            b.bloch_vector[0],
            b.bloch_vector[1],
            b.bloch_vector[2]
        )?;
    }
    f.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_csv_has_header_and_rows() {
        let rec = InterpretationRecord {
            index: 1,
            bloch_vector: [0.5, 0.0, -0.5],
            probabilities: [0.25, 0.75],
            purity: 0.75,
            is_pure: false,
        };
        let path = std::env::temp_dir().join(format!("records-{}.csv", std::process::id()));
        write_records_csv(&path, &[rec]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("qubit,p0,p1,x,y,z,purity,pure"));
        assert_eq!(lines.next(), Some("1,0.25,0.75,0.5,0,-0.5,0.75,false"));
        assert_eq!(lines.next(), None);
    }
}
