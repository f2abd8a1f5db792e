use crate::encode::CnfFormula;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Serializes a formula in the DIMACS CNF format: a comment line naming the
/// output, a blank comment line, the `p cnf <nvars> <nclauses>` header, then
/// one 0-terminated line of space-separated literals per clause. Templated
/// families are expanded on the fly.
pub fn write<W: Write>(out: &mut W, name: &str, formula: &CnfFormula) -> io::Result<()> {
    writeln!(out, "c {name}")?;
    writeln!(out, "c")?;
    writeln!(
        out,
        "p cnf {} {}",
        formula.num_vars(),
        formula.clause_count()
    )?;

    for clause in formula.clauses() {
        for lit in &clause {
            write!(out, "{lit} ")?;
        }
        writeln!(out, "0")?;
    }

    Ok(())
}

/// Writes the formula to `path`, naming it after the file name.
pub fn write_to_path(path: &Path, formula: &CnfFormula) -> io::Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out, &name, formula)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::build_formula;
    use crate::model::{HpChain, Lattice};

    fn rendered(sequence: &str, k: u32) -> (CnfFormula, String) {
        let chain: HpChain = sequence.parse().unwrap();
        let lattice = Lattice::new(chain.lattice_width());
        let formula = build_formula(&chain, &lattice, k);
        let mut buffer = Vec::new();
        write(&mut buffer, "test.cnf", &formula).unwrap();
        (formula, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn leads_with_comments_and_the_problem_line() {
        let (formula, text) = rendered("101", 1);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("c test.cnf"));
        assert_eq!(lines.next(), Some("c"));
        assert_eq!(
            lines.next(),
            Some(
                format!("p cnf {} {}", formula.num_vars(), formula.clause_count()).as_str()
            )
        );
    }

    #[test]
    fn declared_clause_count_matches_the_clause_lines() {
        let (_, text) = rendered("1011", 2);
        let header: Vec<&str> = text.lines().nth(2).unwrap().split(' ').collect();
        let nclauses: usize = header[3].parse().unwrap();
        let clause_lines = text.lines().skip(3).count();
        assert_eq!(clause_lines, nclauses);
    }

    #[test]
    fn every_clause_line_is_zero_terminated_and_in_range() {
        let (formula, text) = rendered("101", 1);
        for line in text.lines().skip(3) {
            assert!(line.ends_with(" 0") || line == "0", "line: {line}");
            for token in line.split(' ') {
                let lit: i64 = token.parse().unwrap();
                assert!(lit.unsigned_abs() <= formula.num_vars() as u64);
            }
        }
    }

    #[test]
    fn write_to_path_names_the_formula_after_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain_k3.cnf");
        let chain: HpChain = "101".parse().unwrap();
        let formula = build_formula(&chain, &Lattice::new(3), 1);

        write_to_path(&path, &formula).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("c chain_k3.cnf\n"));
    }
}
